//! Selection and annotation state of one talent inside one REQ section.

use serde::{Deserialize, Serialize};

use talentpo_catalog::{TalentCatalogEntry, TalentId};
use talentpo_core::Entity;

/// A talent as it appears in a REQ section.
///
/// `id`, `name`, `email` and `role` are a snapshot of the catalog taken when
/// the REQ was chosen. The rest is user input. When the talent is not
/// selected its rate and notes may hold stale values; they are never
/// validated in that state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentEntry {
    id: TalentId,
    name: String,
    email: String,
    role: Option<String>,
    selected: bool,
    assigned_rate: String,
    notes: String,
    contract_duration: String,
}

impl TalentEntry {
    /// Fresh, unselected entry for a catalog talent.
    pub fn from_catalog(entry: &TalentCatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            email: entry.email.clone(),
            role: entry.role.clone().filter(|r| !r.trim().is_empty()),
            selected: false,
            assigned_rate: String::new(),
            notes: String::new(),
            contract_duration: String::new(),
        }
    }

    pub fn id_typed(&self) -> &TalentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Subtitle shown next to the name: the role, or the email without one.
    pub fn display_role(&self) -> &str {
        self.role.as_deref().unwrap_or(self.email.as_str())
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn assigned_rate(&self) -> &str {
        &self.assigned_rate
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn contract_duration(&self) -> &str {
        &self.contract_duration
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn apply_patch(&mut self, patch: &TalentPatch) {
        if let Some(rate) = &patch.assigned_rate {
            self.assigned_rate = rate.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(duration) = &patch.contract_duration {
            self.contract_duration = duration.clone();
        }
    }
}

impl Entity for TalentEntry {
    type Id = TalentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Partial update of a talent's editable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_duration: Option<String>,
}

impl TalentPatch {
    pub fn rate(rate: impl Into<String>) -> Self {
        Self {
            assigned_rate: Some(rate.into()),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn with_contract_duration(mut self, months: impl Into<String>) -> Self {
        self.contract_duration = Some(months.into());
        self
    }

    /// Whether applying the patch to `entry` would change anything.
    pub fn changes(&self, entry: &TalentEntry) -> bool {
        let differs = |new: &Option<String>, current: &str| {
            new.as_deref().is_some_and(|v| v != current)
        };
        differs(&self.assigned_rate, entry.assigned_rate.as_str())
            || differs(&self.notes, entry.notes.as_str())
            || differs(&self.contract_duration, entry.contract_duration.as_str())
    }
}
