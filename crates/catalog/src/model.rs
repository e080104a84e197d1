//! Catalog records as supplied by the reference-data feed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use talentpo_core::{DomainError, DomainResult, ValueObject};

use crate::ids::{ClientId, ReqId, TalentId};

/// A candidate talent eligible for a REQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentCatalogEntry {
    pub id: TalentId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ValueObject for TalentCatalogEntry {}

/// A requisition offered by a client, with its pool of talents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqCatalogEntry {
    pub id: ReqId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub talents: Vec<TalentCatalogEntry>,
}

impl ValueObject for ReqCatalogEntry {}

impl ReqCatalogEntry {
    /// Check the entry can safely seed a REQ section.
    ///
    /// Talent ids key per-talent state (selection, rate errors), so they must
    /// be present and unique within the REQ.
    pub fn check_well_formed(&self) -> DomainResult<()> {
        if self.id.is_blank() {
            return Err(DomainError::invalid_id("REQ entry without id"));
        }
        check_talents(&self.id, &self.talents)
    }
}

/// Check a talent list for blank or duplicate ids.
fn check_talents(req: &ReqId, talents: &[TalentCatalogEntry]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(talents.len());
    for talent in talents {
        if talent.id.is_blank() {
            return Err(DomainError::invalid_id(format!(
                "talent without id under REQ {req}"
            )));
        }
        if !seen.insert(talent.id.as_str()) {
            return Err(DomainError::conflict(format!(
                "duplicate talent {} under REQ {req}",
                talent.id
            )));
        }
    }
    Ok(())
}

/// A client and the REQs it has open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub reqs: Vec<ReqCatalogEntry>,
}
