//! REQ sections: one requisition of the PO and its candidate talents.

use serde::{Deserialize, Serialize};

use talentpo_catalog::{CatalogLookup, ClientId, ReqId, TalentCatalogEntry, TalentId};
use talentpo_core::{Entity, SectionId};

use crate::talent::{TalentEntry, TalentPatch};

/// The catalog data a section is seeded from when a REQ is chosen.
///
/// Resolved while deciding (against the catalog) and carried inside the event,
/// so applying the event never consults the catalog again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReqSnapshot {
    pub req_id: ReqId,
    pub title: String,
    pub talents: Vec<TalentCatalogEntry>,
}

impl ReqSnapshot {
    /// Look `req` up among `client`'s REQs.
    ///
    /// Returns `None` when the REQ is not offered to the client, and also when
    /// the catalog entry is malformed: such a section falls back to an empty
    /// identity instead of carrying broken talent keys.
    pub fn resolve(catalog: &dyn CatalogLookup, client: &ClientId, req: &ReqId) -> Option<Self> {
        // REQ ids are only unique per client, so the talents come from the
        // client's own entry rather than a catalog-wide lookup.
        let entry = catalog.find_req(client, req)?;
        if let Err(err) = entry.check_well_formed() {
            tracing::warn!(client_id = %client, req_id = %req, error = %err, "malformed catalog REQ; leaving section empty");
            return None;
        }

        Some(Self {
            req_id: entry.id.clone(),
            title: entry.title.clone(),
            talents: entry.talents.clone(),
        })
    }
}

/// One requisition of the purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReqSection {
    section_id: SectionId,
    req_id: Option<ReqId>,
    req_title: String,
    talents: Vec<TalentEntry>,
}

impl ReqSection {
    /// A new section with no REQ chosen and no talents.
    pub fn create(section_id: SectionId) -> Self {
        Self {
            section_id,
            req_id: None,
            req_title: String::new(),
            talents: Vec::new(),
        }
    }

    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    pub fn req_id(&self) -> Option<&ReqId> {
        self.req_id.as_ref()
    }

    pub fn req_title(&self) -> &str {
        &self.req_title
    }

    pub fn talents(&self) -> &[TalentEntry] {
        &self.talents
    }

    pub fn talent(&self, talent_id: &TalentId) -> Option<&TalentEntry> {
        self.talents.iter().find(|t| t.id_typed() == talent_id)
    }

    pub fn selected_talents(&self) -> impl Iterator<Item = &TalentEntry> {
        self.talents.iter().filter(|t| t.is_selected())
    }

    pub fn selected_count(&self) -> usize {
        self.selected_talents().count()
    }

    /// Whether a REQ is chosen.
    pub fn has_identity(&self) -> bool {
        self.req_id.is_some()
    }

    /// Heading for the section: the REQ title, or `REQ #<n>` (1-based) until
    /// one is chosen.
    pub fn display_title(&self, index: usize) -> String {
        if self.req_title.is_empty() {
            format!("REQ #{}", index + 1)
        } else {
            self.req_title.clone()
        }
    }

    /// Replace identity and talents wholesale. No talent state survives.
    pub(crate) fn seed(&mut self, snapshot: Option<&ReqSnapshot>) {
        match snapshot {
            Some(snapshot) => {
                self.req_id = Some(snapshot.req_id.clone());
                self.req_title = snapshot.title.clone();
                self.talents = snapshot.talents.iter().map(TalentEntry::from_catalog).collect();
            }
            None => {
                self.req_id = None;
                self.req_title.clear();
                self.talents.clear();
            }
        }
    }

    /// Whether toggling `talent_id` to `selected` would change anything.
    ///
    /// With `exclusive`, every other talent ends up deselected, so a selected
    /// neighbour also counts as a change.
    pub(crate) fn toggle_would_change(
        &self,
        talent_id: &TalentId,
        selected: bool,
        exclusive: bool,
    ) -> bool {
        let Some(target) = self.talent(talent_id) else {
            return false;
        };
        if target.is_selected() != selected {
            return true;
        }
        exclusive
            && self
                .selected_talents()
                .any(|t| t.id_typed() != talent_id)
    }

    pub(crate) fn toggle_talent(&mut self, talent_id: &TalentId, selected: bool, exclusive: bool) {
        if self.talent(talent_id).is_none() {
            return;
        }
        for talent in &mut self.talents {
            if talent.id_typed() == talent_id {
                talent.set_selected(selected);
            } else if exclusive {
                talent.set_selected(false);
            }
        }
    }

    pub(crate) fn update_talent(&mut self, talent_id: &TalentId, patch: &TalentPatch) {
        if let Some(talent) = self.talents.iter_mut().find(|t| t.id_typed() == talent_id) {
            talent.apply_patch(patch);
        }
    }
}

impl Entity for ReqSection {
    type Id = SectionId;

    fn id(&self) -> &Self::Id {
        &self.section_id
    }
}
