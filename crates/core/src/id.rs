//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a form session (one purchase order being captured).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(Uuid);

impl FormId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for FormId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FormId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("FormId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Locally unique identifier of a REQ section within one form.
///
/// Allocated from a monotonic counter rather than a clock, so sections created
/// back to back can never collide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(u64);

impl SectionId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

impl FromStr for SectionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("section-").unwrap_or(s);
        raw.parse::<u64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("SectionId: {e}")))
    }
}

/// Monotonic source of [`SectionId`]s.
///
/// `peek` lets pure decision code name the id the next section will get;
/// `advance` commits it when the corresponding event is applied. The counter
/// never goes backwards, so ids are not reused after sections are removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionIdAllocator {
    next: u64,
}

impl SectionIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> SectionId {
        SectionId(self.next)
    }

    /// Mark `id` as used; later allocations are strictly greater.
    pub fn advance(&mut self, id: SectionId) {
        self.next = self.next.max(id.0 + 1);
    }
}

impl Default for SectionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_strictly_increasing() {
        let mut alloc = SectionIdAllocator::new();
        let mut taken = Vec::new();
        for _ in 0..3 {
            let id = alloc.peek();
            alloc.advance(id);
            taken.push(id);
        }
        assert!(taken[0] < taken[1] && taken[1] < taken[2]);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut alloc = SectionIdAllocator::new();
        let peeked = alloc.peek();
        assert_eq!(alloc.peek(), peeked);
        alloc.advance(peeked);
        assert_ne!(alloc.peek(), peeked);
    }

    #[test]
    fn advance_never_rewinds() {
        let mut alloc = SectionIdAllocator::new();
        alloc.advance(SectionId::from_raw(10));
        alloc.advance(SectionId::from_raw(3));
        assert_eq!(alloc.peek(), SectionId::from_raw(11));
    }

    #[test]
    fn section_id_parses_with_or_without_prefix() {
        assert_eq!("section-7".parse::<SectionId>().unwrap(), SectionId::from_raw(7));
        assert_eq!("7".parse::<SectionId>().unwrap(), SectionId::from_raw(7));
        assert!("section-x".parse::<SectionId>().is_err());
    }

    #[test]
    fn form_id_round_trips_through_display() {
        let id = FormId::new();
        let parsed: FormId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn section_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&SectionId::from_raw(4)).unwrap();
        assert_eq!(json, "4");
    }
}
