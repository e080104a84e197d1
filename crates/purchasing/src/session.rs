//! Form session: the entry points and read views offered to the UI layer.
//!
//! A session owns one [`PurchaseOrderForm`] and the (read-only) catalog it
//! draws REQs and talents from. Every mutation runs to completion, cascade
//! included, before the call returns, so a submit can never observe a
//! half-reset section.

use talentpo_catalog::{CatalogLookup, Client, ReqCatalogEntry, ReqId, TalentId};
use talentpo_core::{Aggregate, AggregateRoot, DomainResult, FormId, SectionId};

use crate::form::{FormCommand, FormEvent, PurchaseOrderForm};
use crate::header::{Currency, HeaderField, PoType};
use crate::mode::{FormMode, SubmitOutcome};
use crate::section::ReqSection;
use crate::talent::{TalentEntry, TalentPatch};
use crate::validation::{ErrorReport, SectionErrors};

/// One user's form session.
#[derive(Debug, Clone)]
pub struct FormSession<C> {
    catalog: C,
    form: PurchaseOrderForm,
}

impl<C: CatalogLookup + 'static> FormSession<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_form_id(catalog, FormId::new())
    }

    pub fn with_form_id(catalog: C, form_id: FormId) -> Self {
        Self {
            catalog,
            form: PurchaseOrderForm::new(form_id),
        }
    }

    pub fn form(&self) -> &PurchaseOrderForm {
        &self.form
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn into_form(self) -> PurchaseOrderForm {
        self.form
    }

    pub fn mode(&self) -> FormMode {
        self.form.mode()
    }

    pub fn errors(&self) -> &ErrorReport {
        self.form.errors()
    }

    /// Run one command against the form and apply what it decides.
    pub fn dispatch(&mut self, command: &FormCommand) -> DomainResult<Vec<FormEvent>> {
        let events = self.form.execute(command, &self.catalog)?;

        if events.is_empty() && command.is_edit() && self.form.is_locked() {
            tracing::debug!(form_id = %self.form.id_typed(), ?command, "form is locked; edit ignored");
        }
        for event in &events {
            self.trace_event(event);
        }

        Ok(events)
    }

    /// Dispatch a command whose input is already typed, so it cannot be
    /// rejected as malformed.
    fn run(&mut self, command: FormCommand) -> Vec<FormEvent> {
        match self.dispatch(&command) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(error = %err, ?command, "command rejected");
                Vec::new()
            }
        }
    }

    fn trace_event(&self, event: &FormEvent) {
        let form_id = self.form.id_typed();
        let version = self.form.version();
        match event {
            FormEvent::ClientChanged { client_id, .. } => {
                tracing::debug!(%form_id, version, client_id = ?client_id, "client changed; REQ sections reset");
            }
            FormEvent::SectionAdded { section_id } | FormEvent::SectionRemoved { section_id } => {
                tracing::debug!(%form_id, version, %section_id, event = event.event_type(), "REQ section list changed");
            }
            FormEvent::ReqSelected { section_id, req } => {
                tracing::debug!(
                    %form_id,
                    version,
                    %section_id,
                    req_id = req.as_ref().map(|r| r.req_id.as_str()),
                    talents = req.as_ref().map_or(0, |r| r.talents.len()),
                    "REQ section re-seeded"
                );
            }
            FormEvent::SubmissionRejected { report } => {
                tracing::info!(%form_id, version, errors = report.len(), "submission rejected");
            }
            FormEvent::Locked => tracing::info!(%form_id, version, "purchase order submitted; form locked"),
            FormEvent::Unlocked => tracing::info!(%form_id, version, "form unlocked for editing"),
            FormEvent::Cleared { reason } => tracing::info!(%form_id, version, ?reason, "form cleared"),
            other => tracing::trace!(%form_id, version, event = other.event_type(), "form updated"),
        }
    }

    // ── header ──────────────────────────────────────────────────────

    /// Set a header field from its form value.
    ///
    /// Fails only for malformed input (PO type or currency outside the
    /// allowed set). Ignored while locked.
    pub fn set_field(&mut self, field: HeaderField, value: impl Into<String>) -> DomainResult<()> {
        self.dispatch(&FormCommand::set_field(field, value)).map(|_| ())
    }

    /// Like [`set_field`](Self::set_field) but addressed by the field's form
    /// name (`"poNumber"`, ...).
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> DomainResult<()> {
        let field: HeaderField = name.parse()?;
        self.set_field(field, value)
    }

    /// Choose the client (empty to clear). Resets the REQ sections.
    pub fn select_client(&mut self, client_id: &str) {
        self.run(FormCommand::set_field(HeaderField::ClientId, client_id));
    }

    pub fn set_po_type(&mut self, po_type: Option<PoType>) {
        let value = po_type.map_or("", |t| t.as_str());
        self.run(FormCommand::set_field(HeaderField::PoType, value));
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.run(FormCommand::set_field(HeaderField::Currency, currency.as_str()));
    }

    // ── REQ sections ────────────────────────────────────────────────

    /// Append an empty REQ section; returns its id, or `None` when ignored.
    pub fn add_section(&mut self) -> Option<SectionId> {
        self.run(FormCommand::AddSection)
            .into_iter()
            .find_map(|e| match e {
                FormEvent::SectionAdded { section_id } => Some(section_id),
                _ => None,
            })
    }

    /// Remove a section. Returns whether anything was removed.
    pub fn remove_section(&mut self, section_id: SectionId) -> bool {
        !self.run(FormCommand::RemoveSection { section_id }).is_empty()
    }

    /// Choose the REQ of a section (empty or unknown id clears it).
    pub fn select_req(&mut self, section_id: SectionId, req_id: impl Into<ReqId>) {
        self.run(FormCommand::SelectReq {
            section_id,
            req_id: req_id.into(),
        });
    }

    pub fn toggle_talent(&mut self, section_id: SectionId, talent_id: impl Into<TalentId>, selected: bool) {
        self.run(FormCommand::ToggleTalent {
            section_id,
            talent_id: talent_id.into(),
            selected,
        });
    }

    pub fn update_talent_fields(
        &mut self,
        section_id: SectionId,
        talent_id: impl Into<TalentId>,
        patch: TalentPatch,
    ) {
        self.run(FormCommand::UpdateTalent {
            section_id,
            talent_id: talent_id.into(),
            patch,
        });
    }

    // ── mode ────────────────────────────────────────────────────────

    /// Validate and, if everything passes, lock the form.
    pub fn submit(&mut self) -> SubmitOutcome {
        let events = self.run(FormCommand::Submit);
        match events.first() {
            Some(FormEvent::Locked) => SubmitOutcome::Locked,
            Some(FormEvent::SubmissionRejected { report }) => SubmitOutcome::Rejected {
                errors: report.len(),
            },
            _ => SubmitOutcome::Ignored,
        }
    }

    /// Locked -> Draft, keeping all values. Returns whether the mode changed.
    pub fn edit(&mut self) -> bool {
        !self.run(FormCommand::Edit).is_empty()
    }

    /// Locked -> Draft with a blank form.
    pub fn new_form(&mut self) -> bool {
        !self.run(FormCommand::NewForm).is_empty()
    }

    /// Clear a draft.
    pub fn reset(&mut self) -> bool {
        !self.run(FormCommand::Reset).is_empty()
    }

    // ── views ───────────────────────────────────────────────────────

    pub fn header_field(&self, field: HeaderField) -> FieldView<'_> {
        FieldView {
            field,
            label: field.label(),
            value: self.form.header().value(field),
            error: self.form.errors().field(field),
            read_only: self.form.is_locked(),
        }
    }

    pub fn header_fields(&self) -> Vec<FieldView<'_>> {
        HeaderField::ALL.into_iter().map(|f| self.header_field(f)).collect()
    }

    /// Display name of the chosen client (shown instead of the picker when
    /// locked).
    pub fn client_name(&self) -> Option<&str> {
        let client_id = self.form.header().client_id.as_ref()?;
        self.catalog.client(client_id).map(|c| c.name.as_str())
    }

    /// Clients to offer in the client picker.
    pub fn client_options(&self) -> &[Client] {
        self.catalog.clients()
    }

    /// REQs of the chosen client, for the REQ picker of every section.
    pub fn req_options(&self) -> &[ReqCatalogEntry] {
        match &self.form.header().client_id {
            Some(client_id) => self.catalog.reqs_for_client(client_id),
            None => &[],
        }
    }

    /// Whether to offer "add another REQ": only Group POs while drafting.
    pub fn can_add_section(&self) -> bool {
        !self.form.is_locked()
            && self.form.header().client_id.is_some()
            && self.form.header().po_type == Some(PoType::Group)
    }

    /// Form-level error shown above the sections.
    pub fn sections_error(&self) -> Option<&str> {
        self.form.errors().missing_sections()
    }

    pub fn sections(&self) -> Vec<SectionView<'_>> {
        self.form
            .req_sections()
            .iter()
            .enumerate()
            .map(|(index, section)| SectionView {
                index,
                section,
                errors: self.form.errors().section(index),
                read_only: self.form.is_locked(),
            })
            .collect()
    }

    pub fn section(&self, section_id: SectionId) -> Option<SectionView<'_>> {
        let index = self.form.section_index(section_id)?;
        self.sections().into_iter().nth(index)
    }
}

/// A header field as the UI should render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub field: HeaderField,
    pub label: &'static str,
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub read_only: bool,
}

/// A REQ section with its errors.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    pub index: usize,
    pub section: &'a ReqSection,
    pub errors: Option<&'a SectionErrors>,
    pub read_only: bool,
}

impl<'a> SectionView<'a> {
    pub fn section_id(&self) -> SectionId {
        self.section.section_id()
    }

    pub fn title(&self) -> String {
        self.section.display_title(self.index)
    }

    pub fn req_error(&self) -> Option<&'a str> {
        self.errors.and_then(|e| e.req.as_deref())
    }

    pub fn talents_error(&self) -> Option<&'a str> {
        self.errors.and_then(|e| e.talents.as_deref())
    }

    /// Every talent of the REQ, for the editable view.
    pub fn talents(&self) -> Vec<TalentView<'a>> {
        let errors = self.errors;
        self.section
            .talents()
            .iter()
            .map(|entry| TalentView {
                entry,
                rate_error: errors.and_then(|e| e.rate_error(entry.id_typed())),
            })
            .collect()
    }

    /// Selected talents only, for the locked summary table.
    pub fn summary(&self) -> Vec<SummaryRow<'a>> {
        self.section
            .selected_talents()
            .map(|t| SummaryRow {
                name: t.name(),
                role_or_email: t.display_role(),
                rate: if t.assigned_rate().is_empty() { "-" } else { t.assigned_rate() },
            })
            .collect()
    }
}

/// A talent row of the editable view.
#[derive(Debug, Clone, Copy)]
pub struct TalentView<'a> {
    pub entry: &'a TalentEntry,
    pub rate_error: Option<&'a str>,
}

impl TalentView<'_> {
    /// Rate, notes and contract duration are only shown for selected talents.
    pub fn shows_fields(&self) -> bool {
        self.entry.is_selected()
    }
}

/// A row of the locked summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow<'a> {
    pub name: &'a str,
    pub role_or_email: &'a str,
    pub rate: &'a str,
}
