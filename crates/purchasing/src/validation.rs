//! Validation engine: a pure function from form state to an error report.
//!
//! Every rule is evaluated independently and all failures are collected, so
//! the user sees every problem at once and can fix them in any order. Nothing
//! here mutates the form; a submit attempt may run it any number of times.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use talentpo_catalog::TalentId;

use crate::header::{HeaderField, PoHeader, PoType};
use crate::section::ReqSection;

pub const CLIENT_REQUIRED: &str = "Client is required";
pub const PO_TYPE_REQUIRED: &str = "PO Type is required";
pub const PO_NUMBER_REQUIRED: &str = "PO Number required";
pub const BUDGET_REQUIRED: &str = "Budget required";
pub const FIELD_REQUIRED: &str = "Required";
pub const END_BEFORE_START: &str = "End date before start date";
pub const BUDGET_FORMAT: &str = "Budget must be a whole number of 1 to 5 digits";
pub const EMAIL_FORMAT: &str = "Enter a valid email address";
pub const PO_NUMBER_FORMAT: &str = "PO Number may only contain letters, digits, spaces and - _ . /";
pub const REQ_REQUIRED: &str = "REQ Name required";
pub const SELECT_EXACTLY_ONE: &str = "Select exactly 1 talent";
pub const SELECT_AT_LEAST_TWO: &str = "Select at least 2 talents for Group PO";
pub const RATE_REQUIRED: &str = "Assigned rate required";
pub const SECTIONS_REQUIRED: &str = "At least one REQ section required";

/// Errors of one REQ section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionErrors {
    /// No REQ chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req: Option<String>,
    /// Selected-talent count does not fit the PO type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talents: Option<String>,
    /// Selected talents without an assigned rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rates: BTreeMap<TalentId, String>,
}

impl SectionErrors {
    pub fn is_empty(&self) -> bool {
        self.req.is_none() && self.talents.is_none() && self.rates.is_empty()
    }

    pub fn rate_error(&self, talent_id: &TalentId) -> Option<&str> {
        self.rates.get(talent_id).map(String::as_str)
    }

    /// Flat `key -> message` view: `reqId`, `talents`, `rate_<talentId>`.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::with_capacity(2 + self.rates.len());
        if let Some(msg) = &self.req {
            out.push(("reqId".to_string(), msg.as_str()));
        }
        if let Some(msg) = &self.talents {
            out.push(("talents".to_string(), msg.as_str()));
        }
        for (talent_id, msg) in &self.rates {
            out.push((format!("rate_{talent_id}"), msg.as_str()));
        }
        out
    }

    fn len(&self) -> usize {
        usize::from(self.req.is_some()) + usize::from(self.talents.is_some()) + self.rates.len()
    }
}

/// Result of one validation pass.
///
/// `sections` is index-aligned with the form's REQ sections; a passing
/// section holds `None` at its index. When the form has no sections at all,
/// `missing_sections` carries the single form-level error instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    header: BTreeMap<HeaderField, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    missing_sections: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sections: Vec<Option<SectionErrors>>,
}

impl ErrorReport {
    /// `true` iff every rule passed.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.missing_sections.is_none()
            && self.sections.iter().all(Option::is_none)
    }

    /// Number of individual messages in the report.
    pub fn len(&self) -> usize {
        self.header.len()
            + usize::from(self.missing_sections.is_some())
            + self.sections.iter().flatten().map(SectionErrors::len).sum::<usize>()
    }

    pub fn header(&self) -> &BTreeMap<HeaderField, String> {
        &self.header
    }

    pub fn field(&self, field: HeaderField) -> Option<&str> {
        self.header.get(&field).map(String::as_str)
    }

    pub fn missing_sections(&self) -> Option<&str> {
        self.missing_sections.as_deref()
    }

    pub fn sections(&self) -> &[Option<SectionErrors>] {
        &self.sections
    }

    /// Errors of the section at `index`, if it failed.
    pub fn section(&self, index: usize) -> Option<&SectionErrors> {
        self.sections.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn clear_field(&mut self, field: HeaderField) {
        self.header.remove(&field);
    }

    /// Drop everything tied to the section list (client cascade).
    pub(crate) fn clear_sections(&mut self) {
        self.missing_sections = None;
        self.sections.clear();
    }

    pub(crate) fn clear_section(&mut self, index: usize) {
        if let Some(slot) = self.sections.get_mut(index) {
            *slot = None;
        }
    }

    pub(crate) fn clear_rate(&mut self, index: usize, talent_id: &TalentId) {
        if let Some(Some(errors)) = self.sections.get_mut(index) {
            errors.rates.remove(talent_id);
            if errors.is_empty() {
                self.sections[index] = None;
            }
        }
    }

    /// Keep alignment when a section is appended.
    pub(crate) fn section_added(&mut self) {
        self.missing_sections = None;
        if !self.sections.is_empty() {
            self.sections.push(None);
        }
    }

    /// Keep alignment when the section at `index` is removed.
    pub(crate) fn section_removed(&mut self, index: usize) {
        if index < self.sections.len() {
            self.sections.remove(index);
        }
    }
}

/// Validate a header and its REQ sections.
pub fn validate(header: &PoHeader, sections: &[ReqSection]) -> ErrorReport {
    let mut report = ErrorReport {
        header: validate_header(header),
        ..ErrorReport::default()
    };

    if sections.is_empty() {
        report.missing_sections = Some(SECTIONS_REQUIRED.to_string());
        return report;
    }

    let per_section: Vec<Option<SectionErrors>> = sections
        .iter()
        .map(|s| {
            let errors = validate_section(header.po_type, s);
            (!errors.is_empty()).then_some(errors)
        })
        .collect();
    if per_section.iter().any(Option::is_some) {
        report.sections = per_section;
    }

    report
}

fn validate_header(header: &PoHeader) -> BTreeMap<HeaderField, String> {
    let mut errors = BTreeMap::new();

    for field in HeaderField::ALL.into_iter().filter(HeaderField::is_required) {
        if header.value(field).trim().is_empty() {
            errors.insert(field, required_message(field).to_string());
        }
    }

    let start = header.po_start_date.trim();
    let end = header.po_end_date.trim();
    if !start.is_empty() && !end.is_empty() && end_before_start(start, end) {
        errors.insert(HeaderField::PoEndDate, END_BEFORE_START.to_string());
    }

    let budget = header.budget.trim();
    if !budget.is_empty() && !is_valid_budget(budget) {
        errors.insert(HeaderField::Budget, BUDGET_FORMAT.to_string());
    }

    let email = header.received_from_email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(HeaderField::ReceivedFromEmail, EMAIL_FORMAT.to_string());
    }

    let po_number = header.po_number.trim();
    if !po_number.is_empty() && !is_valid_po_number(po_number) {
        errors.insert(HeaderField::PoNumber, PO_NUMBER_FORMAT.to_string());
    }

    errors
}

fn validate_section(po_type: Option<PoType>, section: &ReqSection) -> SectionErrors {
    let mut errors = SectionErrors::default();

    if !section.has_identity() {
        errors.req = Some(REQ_REQUIRED.to_string());
    }

    let selected = section.selected_count();
    match po_type {
        Some(PoType::Individual) if selected != 1 => {
            errors.talents = Some(SELECT_EXACTLY_ONE.to_string());
        }
        Some(PoType::Group) if selected < 2 => {
            errors.talents = Some(SELECT_AT_LEAST_TWO.to_string());
        }
        _ => {}
    }

    for talent in section.selected_talents() {
        if talent.assigned_rate().trim().is_empty() {
            errors
                .rates
                .insert(talent.id_typed().clone(), RATE_REQUIRED.to_string());
        }
    }

    errors
}

fn required_message(field: HeaderField) -> &'static str {
    match field {
        HeaderField::ClientId => CLIENT_REQUIRED,
        HeaderField::PoType => PO_TYPE_REQUIRED,
        HeaderField::PoNumber => PO_NUMBER_REQUIRED,
        HeaderField::Budget => BUDGET_REQUIRED,
        _ => FIELD_REQUIRED,
    }
}

/// Calendar comparison when both sides are `YYYY-MM-DD`, lexicographic
/// otherwise.
fn end_before_start(start: &str, end: &str) -> bool {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    match (parse(start), parse(end)) {
        (Some(start), Some(end)) => end < start,
        _ => end < start,
    }
}

fn is_valid_budget(budget: &str) -> bool {
    (1..=5).contains(&budget.len()) && budget.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_valid_po_number(po_number: &str) -> bool {
    po_number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentpo_catalog::{ClientId, ReqId, TalentCatalogEntry};
    use talentpo_core::SectionId;

    use crate::section::ReqSnapshot;
    use crate::talent::TalentPatch;

    fn valid_header(po_type: PoType) -> PoHeader {
        PoHeader {
            client_id: Some(ClientId::new("c1")),
            po_type: Some(po_type),
            po_number: "PO-2024/001".to_string(),
            received_on: "2024-01-02".to_string(),
            received_from_name: "Priya".to_string(),
            received_from_email: "priya@example.com".to_string(),
            po_start_date: "2024-01-01".to_string(),
            po_end_date: "2024-12-31".to_string(),
            budget: "50000".to_string(),
            ..PoHeader::default()
        }
    }

    fn section(talents: &[&str]) -> ReqSection {
        let snapshot = ReqSnapshot {
            req_id: ReqId::new("R1"),
            title: "Backend".to_string(),
            talents: talents
                .iter()
                .map(|id| TalentCatalogEntry {
                    id: TalentId::new(*id),
                    name: id.to_string(),
                    email: format!("{id}@example.com"),
                    role: None,
                })
                .collect(),
        };
        let mut section = ReqSection::create(SectionId::from_raw(1));
        section.seed(Some(&snapshot));
        section
    }

    fn select(section: &mut ReqSection, id: &str, rate: &str) {
        let id = TalentId::new(id);
        section.toggle_talent(&id, true, false);
        section.update_talent(&id, &TalentPatch::rate(rate));
    }

    #[test]
    fn empty_form_reports_every_required_field_and_missing_sections() {
        let report = validate(&PoHeader::default(), &[]);
        assert_eq!(report.header().len(), 9);
        assert_eq!(report.field(HeaderField::ClientId), Some(CLIENT_REQUIRED));
        assert_eq!(report.field(HeaderField::ReceivedOn), Some(FIELD_REQUIRED));
        assert_eq!(report.field(HeaderField::Currency), None);
        assert_eq!(report.missing_sections(), Some(SECTIONS_REQUIRED));
        assert!(report.sections().is_empty());
        assert_eq!(report.len(), 10);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut header = valid_header(PoType::Individual);
        header.received_from_name = "   ".to_string();
        let mut s = section(&["T1"]);
        select(&mut s, "T1", "10");
        let report = validate(&header, &[s]);
        assert_eq!(report.field(HeaderField::ReceivedFromName), Some(FIELD_REQUIRED));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn fully_valid_individual_form_passes() {
        let mut s = section(&["T1", "T2"]);
        select(&mut s, "T2", "100");
        let report = validate(&valid_header(PoType::Individual), &[s]);
        assert!(report.is_empty(), "{report:?}");
    }

    #[test]
    fn end_date_before_start_date() {
        let mut header = valid_header(PoType::Individual);
        header.po_start_date = "2024-01-01".to_string();
        header.po_end_date = "2023-12-31".to_string();
        let report = validate(&header, &[]);
        assert_eq!(report.field(HeaderField::PoEndDate), Some(END_BEFORE_START));
        assert_eq!(report.field(HeaderField::PoStartDate), None);
    }

    #[test]
    fn date_order_only_checked_when_both_present() {
        let mut header = valid_header(PoType::Individual);
        header.po_start_date.clear();
        let report = validate(&header, &[]);
        assert_eq!(report.field(HeaderField::PoStartDate), Some(FIELD_REQUIRED));
        assert_eq!(report.field(HeaderField::PoEndDate), None);
    }

    #[test]
    fn same_day_start_and_end_is_fine() {
        assert!(!end_before_start("2024-05-05", "2024-05-05"));
        assert!(end_before_start("2024-05-05", "2024-05-04"));
        // non-ISO input falls back to string order
        assert!(end_before_start("b", "a"));
    }

    #[test]
    fn budget_format() {
        assert!(is_valid_budget("0"));
        assert!(is_valid_budget("99999"));
        assert!(!is_valid_budget("100000"));
        assert!(!is_valid_budget("12.5"));
        assert!(!is_valid_budget("-5"));

        let mut header = valid_header(PoType::Individual);
        header.budget = "1e3".to_string();
        let report = validate(&header, &[]);
        assert_eq!(report.field(HeaderField::Budget), Some(BUDGET_FORMAT));
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn po_number_charset() {
        assert!(is_valid_po_number("PO 2024/01-a_b.c"));
        assert!(!is_valid_po_number("PO#1"));
        assert!(!is_valid_po_number("PO,1"));
    }

    #[test]
    fn section_without_req_is_reported() {
        let report = validate(
            &valid_header(PoType::Group),
            &[ReqSection::create(SectionId::from_raw(9))],
        );
        let errors = report.section(0).expect("section errors");
        assert_eq!(errors.req.as_deref(), Some(REQ_REQUIRED));
        assert_eq!(errors.talents.as_deref(), Some(SELECT_AT_LEAST_TWO));
    }

    #[test]
    fn individual_requires_exactly_one() {
        let header = valid_header(PoType::Individual);

        let none = section(&["T1", "T2"]);
        let report = validate(&header, &[none]);
        assert_eq!(
            report.section(0).and_then(|e| e.talents.as_deref()),
            Some(SELECT_EXACTLY_ONE)
        );

        // two selected (possible after switching type from Group)
        let mut two = section(&["T1", "T2"]);
        select(&mut two, "T1", "1");
        select(&mut two, "T2", "1");
        let report = validate(&header, &[two]);
        assert_eq!(
            report.section(0).and_then(|e| e.talents.as_deref()),
            Some(SELECT_EXACTLY_ONE)
        );
    }

    #[test]
    fn group_requires_two_and_rates_for_each_selected() {
        let mut s = section(&["T1", "T2", "T3"]);
        select(&mut s, "T1", "100");
        select(&mut s, "T2", "  ");
        let report = validate(&valid_header(PoType::Group), &[s]);

        let errors = report.section(0).expect("section errors");
        assert_eq!(errors.talents, None);
        assert_eq!(errors.rate_error(&TalentId::new("T2")), Some(RATE_REQUIRED));
        assert_eq!(errors.rate_error(&TalentId::new("T1")), None);
        assert_eq!(errors.rate_error(&TalentId::new("T3")), None);

        let keys: Vec<_> = errors.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["rate_T2".to_string()]);
    }

    #[test]
    fn stale_rate_on_deselected_talent_is_ignored() {
        let mut s = section(&["T1", "T2"]);
        let t1 = TalentId::new("T1");
        s.update_talent(&t1, &TalentPatch::rate(""));
        s.toggle_talent(&t1, true, true);
        s.toggle_talent(&t1, false, true);
        select(&mut s, "T2", "40");
        let report = validate(&valid_header(PoType::Individual), &[s]);
        assert!(report.is_empty(), "{report:?}");
    }

    #[test]
    fn passing_sections_hold_none_at_their_index() {
        let mut good = section(&["T1"]);
        select(&mut good, "T1", "10");
        let bad = ReqSection::create(SectionId::from_raw(2));
        let report = validate(&valid_header(PoType::Individual), &[good, bad]);

        assert_eq!(report.sections().len(), 2);
        assert!(report.sections()[0].is_none());
        assert!(report.sections()[1].is_some());
    }

    #[test]
    fn no_po_type_skips_cardinality() {
        let mut header = valid_header(PoType::Group);
        header.po_type = None;
        let report = validate(&header, &[section(&["T1"])]);
        assert_eq!(report.field(HeaderField::PoType), Some(PO_TYPE_REQUIRED));
        assert!(report.section(0).is_none());
    }

    #[test]
    fn report_is_deterministic() {
        let header = valid_header(PoType::Group);
        let sections = vec![section(&["T1", "T2"])];
        assert_eq!(validate(&header, &sections), validate(&header, &sections));
    }

    #[test]
    fn clear_rate_drops_emptied_slot() {
        let mut s = section(&["T1", "T2"]);
        select(&mut s, "T1", "");
        select(&mut s, "T2", "5");
        let mut report = validate(&valid_header(PoType::Group), &[s]);
        assert!(report.section(0).is_some());

        report.clear_rate(0, &TalentId::new("T1"));
        assert!(report.section(0).is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn report_serializes_with_form_field_names() {
        let report = validate(&PoHeader::default(), &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["header"]["clientId"], CLIENT_REQUIRED);
        assert_eq!(json["missingSections"], SECTIONS_REQUIRED);
    }
}
