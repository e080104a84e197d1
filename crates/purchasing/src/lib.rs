//! Purchase order capture: header, REQ sections and per-talent selection.
//!
//! This crate holds the form-state rules only (cascades, selection
//! constraints, validation, Draft/Locked mode). Rendering, routing and
//! persistence live outside; the catalog is injected through
//! [`talentpo_catalog::CatalogLookup`].

pub mod form;
pub mod header;
pub mod mode;
pub mod section;
pub mod session;
pub mod talent;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use form::{FormCommand, FormEvent, PurchaseOrderForm};
pub use header::{Currency, HeaderField, PoHeader, PoType};
pub use mode::{FormMode, ResetReason, SubmitOutcome};
pub use section::{ReqSection, ReqSnapshot};
pub use session::{FieldView, FormSession, SectionView, SummaryRow, TalentView};
pub use talent::{TalentEntry, TalentPatch};
pub use validation::{ErrorReport, SectionErrors, validate};
