use serde::{Deserialize, Serialize};

use talentpo_catalog::{CatalogLookup, ClientId, ReqId, TalentId};
use talentpo_core::{Aggregate, AggregateRoot, DomainError, FormId, SectionId, SectionIdAllocator};

use crate::header::{Currency, HeaderField, PoHeader, PoType};
use crate::mode::{FormMode, ResetReason};
use crate::section::{ReqSection, ReqSnapshot};
use crate::talent::TalentPatch;
use crate::validation::{self, ErrorReport};

/// Aggregate root: the purchase order being captured in one form session.
///
/// All state changes go through [`FormCommand`]s. While the form is locked the
/// only commands that do anything are `Edit` and `NewForm`; everything else is
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderForm {
    id: FormId,
    header: PoHeader,
    req_sections: Vec<ReqSection>,
    mode: FormMode,
    errors: ErrorReport,
    section_ids: SectionIdAllocator,
    version: u64,
}

impl PurchaseOrderForm {
    pub fn new(id: FormId) -> Self {
        Self {
            id,
            header: PoHeader::default(),
            req_sections: Vec::new(),
            mode: FormMode::Draft,
            errors: ErrorReport::default(),
            section_ids: SectionIdAllocator::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> FormId {
        self.id
    }

    pub fn header(&self) -> &PoHeader {
        &self.header
    }

    pub fn req_sections(&self) -> &[ReqSection] {
        &self.req_sections
    }

    pub fn section(&self, section_id: SectionId) -> Option<&ReqSection> {
        self.req_sections.iter().find(|s| s.section_id() == section_id)
    }

    pub fn section_index(&self, section_id: SectionId) -> Option<usize> {
        self.req_sections.iter().position(|s| s.section_id() == section_id)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode.is_locked()
    }

    /// The last published error report (empty until a submit fails).
    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    /// Run the validation engine against the current state.
    pub fn validate(&self) -> ErrorReport {
        validation::validate(&self.header, &self.req_sections)
    }
}

impl AggregateRoot for PurchaseOrderForm {
    type Id = FormId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// A user intent against the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormCommand {
    /// Set a header field from its form value. Setting `clientId` runs the
    /// client cascade.
    SetField { field: HeaderField, value: String },
    AddSection,
    RemoveSection { section_id: SectionId },
    /// Choose a REQ for a section; a blank id clears the section.
    SelectReq { section_id: SectionId, req_id: ReqId },
    ToggleTalent { section_id: SectionId, talent_id: TalentId, selected: bool },
    UpdateTalent { section_id: SectionId, talent_id: TalentId, patch: TalentPatch },
    Submit,
    Edit,
    NewForm,
    Reset,
}

impl FormCommand {
    pub fn set_field(field: HeaderField, value: impl Into<String>) -> Self {
        FormCommand::SetField {
            field,
            value: value.into(),
        }
    }

    /// Commands that mutate form content (as opposed to mode transitions).
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            FormCommand::Submit | FormCommand::Edit | FormCommand::NewForm | FormCommand::Reset
        )
    }
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormEvent {
    /// Client changed; the section list is replaced by `seed_section` alone
    /// (or emptied when no client is chosen).
    ClientChanged {
        client_id: Option<ClientId>,
        seed_section: Option<SectionId>,
    },
    PoTypeChanged { po_type: Option<PoType> },
    CurrencyChanged { currency: Currency },
    TextFieldChanged { field: HeaderField, value: String },
    SectionAdded { section_id: SectionId },
    SectionRemoved { section_id: SectionId },
    /// Section re-seeded from `req`, or cleared when `req` is `None`.
    ReqSelected { section_id: SectionId, req: Option<ReqSnapshot> },
    /// With `exclusive`, every other talent of the section is deselected.
    TalentToggled {
        section_id: SectionId,
        talent_id: TalentId,
        selected: bool,
        exclusive: bool,
    },
    TalentUpdated {
        section_id: SectionId,
        talent_id: TalentId,
        patch: TalentPatch,
    },
    SubmissionRejected { report: ErrorReport },
    Locked,
    Unlocked,
    Cleared { reason: ResetReason },
}

impl FormEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            FormEvent::ClientChanged { .. } => "po.form.client_changed",
            FormEvent::PoTypeChanged { .. } => "po.form.po_type_changed",
            FormEvent::CurrencyChanged { .. } => "po.form.currency_changed",
            FormEvent::TextFieldChanged { .. } => "po.form.field_changed",
            FormEvent::SectionAdded { .. } => "po.form.section_added",
            FormEvent::SectionRemoved { .. } => "po.form.section_removed",
            FormEvent::ReqSelected { .. } => "po.form.req_selected",
            FormEvent::TalentToggled { .. } => "po.form.talent_toggled",
            FormEvent::TalentUpdated { .. } => "po.form.talent_updated",
            FormEvent::SubmissionRejected { .. } => "po.form.submission_rejected",
            FormEvent::Locked => "po.form.locked",
            FormEvent::Unlocked => "po.form.unlocked",
            FormEvent::Cleared { .. } => "po.form.cleared",
        }
    }
}

impl Aggregate for PurchaseOrderForm {
    type Command = FormCommand;
    type Event = FormEvent;
    type Error = DomainError;
    type Context = dyn CatalogLookup;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            FormEvent::ClientChanged {
                client_id,
                seed_section,
            } => {
                self.header.client_id = client_id.clone();
                self.req_sections.clear();
                if let Some(section_id) = seed_section {
                    self.section_ids.advance(*section_id);
                    self.req_sections.push(ReqSection::create(*section_id));
                }
                self.errors.clear_field(HeaderField::ClientId);
                self.errors.clear_sections();
            }
            FormEvent::PoTypeChanged { po_type } => {
                self.header.po_type = *po_type;
                self.errors.clear_field(HeaderField::PoType);
            }
            FormEvent::CurrencyChanged { currency } => {
                self.header.currency = *currency;
                self.errors.clear_field(HeaderField::Currency);
            }
            FormEvent::TextFieldChanged { field, value } => {
                if let Some(slot) = self.header.text_mut(*field) {
                    *slot = value.clone();
                }
                self.errors.clear_field(*field);
            }
            FormEvent::SectionAdded { section_id } => {
                self.section_ids.advance(*section_id);
                self.req_sections.push(ReqSection::create(*section_id));
                self.errors.section_added();
            }
            FormEvent::SectionRemoved { section_id } => {
                if let Some(index) = self.section_index(*section_id) {
                    self.req_sections.remove(index);
                    self.errors.section_removed(index);
                }
            }
            FormEvent::ReqSelected { section_id, req } => {
                if let Some(index) = self.section_index(*section_id) {
                    self.req_sections[index].seed(req.as_ref());
                    self.errors.clear_section(index);
                }
            }
            FormEvent::TalentToggled {
                section_id,
                talent_id,
                selected,
                exclusive,
            } => {
                if let Some(index) = self.section_index(*section_id) {
                    self.req_sections[index].toggle_talent(talent_id, *selected, *exclusive);
                }
            }
            FormEvent::TalentUpdated {
                section_id,
                talent_id,
                patch,
            } => {
                if let Some(index) = self.section_index(*section_id) {
                    self.req_sections[index].update_talent(talent_id, patch);
                    if patch.assigned_rate.is_some() {
                        self.errors.clear_rate(index, talent_id);
                    }
                }
            }
            FormEvent::SubmissionRejected { report } => {
                self.errors = report.clone();
            }
            FormEvent::Locked => {
                self.mode = FormMode::Locked;
                self.errors = ErrorReport::default();
            }
            FormEvent::Unlocked => {
                self.mode = FormMode::Draft;
                self.errors = ErrorReport::default();
            }
            FormEvent::Cleared { .. } => {
                // Section ids keep counting so stale callbacks cannot hit new sections.
                self.header = PoHeader::default();
                self.req_sections.clear();
                self.errors = ErrorReport::default();
                self.mode = FormMode::Draft;
            }
        }

        self.version += 1;
    }

    fn handle(
        &self,
        command: &Self::Command,
        catalog: &Self::Context,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            FormCommand::Submit => return Ok(self.handle_submit()),
            FormCommand::Edit => return Ok(self.handle_edit()),
            FormCommand::NewForm => return Ok(self.handle_new_form()),
            FormCommand::Reset => return Ok(self.handle_reset()),
            _ => {}
        }

        if self.mode.is_locked() {
            return Ok(Vec::new());
        }

        match command {
            FormCommand::SetField { field, value } => self.handle_set_field(*field, value),
            FormCommand::AddSection => Ok(self.handle_add_section()),
            FormCommand::RemoveSection { section_id } => Ok(self.handle_remove_section(*section_id)),
            FormCommand::SelectReq { section_id, req_id } => {
                Ok(self.handle_select_req(*section_id, req_id, catalog))
            }
            FormCommand::ToggleTalent {
                section_id,
                talent_id,
                selected,
            } => Ok(self.handle_toggle(*section_id, talent_id, *selected)),
            FormCommand::UpdateTalent {
                section_id,
                talent_id,
                patch,
            } => Ok(self.handle_update_talent(*section_id, talent_id, patch)),
            FormCommand::Submit | FormCommand::Edit | FormCommand::NewForm | FormCommand::Reset => {
                Ok(Vec::new())
            }
        }
    }
}

impl PurchaseOrderForm {
    fn handle_set_field(&self, field: HeaderField, value: &str) -> Result<Vec<FormEvent>, DomainError> {
        let event = match field {
            HeaderField::ClientId => {
                let client_id = (!value.trim().is_empty()).then(|| ClientId::new(value.trim()));
                if client_id == self.header.client_id {
                    return Ok(Vec::new());
                }
                let seed_section = client_id.as_ref().map(|_| self.section_ids.peek());
                FormEvent::ClientChanged {
                    client_id,
                    seed_section,
                }
            }
            HeaderField::PoType => {
                let po_type = PoType::parse_optional(value)?;
                if po_type == self.header.po_type {
                    return Ok(Vec::new());
                }
                FormEvent::PoTypeChanged { po_type }
            }
            HeaderField::Currency => {
                let currency: Currency = value.parse()?;
                if currency == self.header.currency {
                    return Ok(Vec::new());
                }
                FormEvent::CurrencyChanged { currency }
            }
            text => {
                if self.header.text(text).is_some_and(|current| current == value) {
                    return Ok(Vec::new());
                }
                FormEvent::TextFieldChanged {
                    field: text,
                    value: value.to_string(),
                }
            }
        };
        Ok(vec![event])
    }

    fn handle_add_section(&self) -> Vec<FormEvent> {
        // REQ options come from the client, so a section needs one first.
        if self.header.client_id.is_none() {
            return Vec::new();
        }
        vec![FormEvent::SectionAdded {
            section_id: self.section_ids.peek(),
        }]
    }

    fn handle_remove_section(&self, section_id: SectionId) -> Vec<FormEvent> {
        if self.section(section_id).is_none() {
            return Vec::new();
        }
        vec![FormEvent::SectionRemoved { section_id }]
    }

    fn handle_select_req(
        &self,
        section_id: SectionId,
        req_id: &ReqId,
        catalog: &dyn CatalogLookup,
    ) -> Vec<FormEvent> {
        let Some(section) = self.section(section_id) else {
            return Vec::new();
        };

        let req = match (&self.header.client_id, req_id.is_blank()) {
            (Some(client_id), false) => {
                if section.req_id() == Some(req_id) {
                    return Vec::new();
                }
                ReqSnapshot::resolve(catalog, client_id, req_id)
            }
            _ => None,
        };

        if req.is_none() && !section.has_identity() && section.talents().is_empty() {
            return Vec::new();
        }

        vec![FormEvent::ReqSelected { section_id, req }]
    }

    fn handle_toggle(&self, section_id: SectionId, talent_id: &TalentId, selected: bool) -> Vec<FormEvent> {
        let Some(section) = self.section(section_id) else {
            return Vec::new();
        };

        // Individual POs allow one talent per section: selecting one drops the rest.
        let exclusive = selected && self.header.po_type == Some(PoType::Individual);
        if !section.toggle_would_change(talent_id, selected, exclusive) {
            return Vec::new();
        }

        vec![FormEvent::TalentToggled {
            section_id,
            talent_id: talent_id.clone(),
            selected,
            exclusive,
        }]
    }

    fn handle_update_talent(
        &self,
        section_id: SectionId,
        talent_id: &TalentId,
        patch: &TalentPatch,
    ) -> Vec<FormEvent> {
        let Some(talent) = self.section(section_id).and_then(|s| s.talent(talent_id)) else {
            return Vec::new();
        };
        if !patch.changes(talent) {
            return Vec::new();
        }

        vec![FormEvent::TalentUpdated {
            section_id,
            talent_id: talent_id.clone(),
            patch: patch.clone(),
        }]
    }

    fn handle_submit(&self) -> Vec<FormEvent> {
        if self.mode.is_locked() {
            return Vec::new();
        }
        let report = self.validate();
        if report.is_empty() {
            vec![FormEvent::Locked]
        } else {
            vec![FormEvent::SubmissionRejected { report }]
        }
    }

    fn handle_edit(&self) -> Vec<FormEvent> {
        match self.mode {
            FormMode::Locked => vec![FormEvent::Unlocked],
            FormMode::Draft => Vec::new(),
        }
    }

    fn handle_new_form(&self) -> Vec<FormEvent> {
        match self.mode {
            FormMode::Locked => vec![FormEvent::Cleared {
                reason: ResetReason::NewForm,
            }],
            FormMode::Draft => Vec::new(),
        }
    }

    fn handle_reset(&self) -> Vec<FormEvent> {
        match self.mode {
            FormMode::Draft => vec![FormEvent::Cleared {
                reason: ResetReason::UserReset,
            }],
            FormMode::Locked => Vec::new(),
        }
    }
}
