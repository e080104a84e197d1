//! PO header fields: the flat part of the form above the REQ sections.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use talentpo_catalog::ClientId;
use talentpo_core::{DomainError, DomainResult, ValueObject};

/// Names of the header fields, as used by the presentation layer and as keys
/// of the header part of an error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    ClientId,
    PoType,
    PoNumber,
    ReceivedOn,
    ReceivedFromName,
    ReceivedFromEmail,
    PoStartDate,
    PoEndDate,
    Budget,
    Currency,
}

impl HeaderField {
    /// Display order of the header.
    pub const ALL: [HeaderField; 10] = [
        HeaderField::ClientId,
        HeaderField::PoType,
        HeaderField::PoNumber,
        HeaderField::ReceivedOn,
        HeaderField::ReceivedFromName,
        HeaderField::ReceivedFromEmail,
        HeaderField::PoStartDate,
        HeaderField::PoEndDate,
        HeaderField::Budget,
        HeaderField::Currency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::ClientId => "clientId",
            HeaderField::PoType => "poType",
            HeaderField::PoNumber => "poNumber",
            HeaderField::ReceivedOn => "receivedOn",
            HeaderField::ReceivedFromName => "receivedFromName",
            HeaderField::ReceivedFromEmail => "receivedFromEmail",
            HeaderField::PoStartDate => "poStartDate",
            HeaderField::PoEndDate => "poEndDate",
            HeaderField::Budget => "budget",
            HeaderField::Currency => "currency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeaderField::ClientId => "Client",
            HeaderField::PoType => "PO Type",
            HeaderField::PoNumber => "PO Number",
            HeaderField::ReceivedOn => "Received On",
            HeaderField::ReceivedFromName => "Received From - Name",
            HeaderField::ReceivedFromEmail => "Received From - Email",
            HeaderField::PoStartDate => "PO Start Date",
            HeaderField::PoEndDate => "PO End Date",
            HeaderField::Budget => "Budget",
            HeaderField::Currency => "Currency",
        }
    }

    /// Every header field except the currency (which always has a value) is
    /// required.
    pub fn is_required(&self) -> bool {
        !matches!(self, HeaderField::Currency)
    }
}

impl core::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown header field `{s}`")))
    }
}

/// Whether one PO covers a single talent per REQ or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoType {
    Individual,
    Group,
}

impl ValueObject for PoType {}

impl PoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoType::Individual => "Individual",
            PoType::Group => "Group",
        }
    }

    /// Parse a form value; empty means "not chosen yet".
    pub fn parse_optional(value: &str) -> DomainResult<Option<PoType>> {
        match value.trim() {
            "" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for PoType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Individual" => Ok(PoType::Individual),
            "Group" => Ok(PoType::Group),
            other => Err(DomainError::validation(format!(
                "PO type must be Individual or Group, got `{other}`"
            ))),
        }
    }
}

impl core::fmt::Display for PoType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
}

impl ValueObject for Currency {}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(DomainError::validation(format!(
                "currency must be INR, USD or EUR, got `{other}`"
            ))),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header values of a purchase order.
///
/// Free-text fields keep exactly what the user typed; trimming only happens
/// during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoHeader {
    pub client_id: Option<ClientId>,
    pub po_type: Option<PoType>,
    pub po_number: String,
    pub received_on: String,
    pub received_from_name: String,
    pub received_from_email: String,
    pub po_start_date: String,
    pub po_end_date: String,
    pub budget: String,
    pub currency: Currency,
}

impl PoHeader {
    /// Current value of `field` in its form (string) representation.
    pub fn value(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::ClientId => self.client_id.as_ref().map_or("", |c| c.as_str()),
            HeaderField::PoType => self.po_type.as_ref().map_or("", |t| t.as_str()),
            HeaderField::Currency => self.currency.as_str(),
            text => self.text(text).map_or("", String::as_str),
        }
    }

    /// Free-text field storage; `None` for the typed fields.
    pub(crate) fn text(&self, field: HeaderField) -> Option<&String> {
        match field {
            HeaderField::PoNumber => Some(&self.po_number),
            HeaderField::ReceivedOn => Some(&self.received_on),
            HeaderField::ReceivedFromName => Some(&self.received_from_name),
            HeaderField::ReceivedFromEmail => Some(&self.received_from_email),
            HeaderField::PoStartDate => Some(&self.po_start_date),
            HeaderField::PoEndDate => Some(&self.po_end_date),
            HeaderField::Budget => Some(&self.budget),
            HeaderField::ClientId | HeaderField::PoType | HeaderField::Currency => None,
        }
    }

    pub(crate) fn text_mut(&mut self, field: HeaderField) -> Option<&mut String> {
        match field {
            HeaderField::PoNumber => Some(&mut self.po_number),
            HeaderField::ReceivedOn => Some(&mut self.received_on),
            HeaderField::ReceivedFromName => Some(&mut self.received_from_name),
            HeaderField::ReceivedFromEmail => Some(&mut self.received_from_email),
            HeaderField::PoStartDate => Some(&mut self.po_start_date),
            HeaderField::PoEndDate => Some(&mut self.po_end_date),
            HeaderField::Budget => Some(&mut self.budget),
            HeaderField::ClientId | HeaderField::PoType | HeaderField::Currency => None,
        }
    }
}
