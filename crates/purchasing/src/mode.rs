//! Draft / Locked mode of the form.

use serde::{Deserialize, Serialize};

/// Whether the form accepts edits.
///
/// Transitions:
/// - `Draft --submit (valid)--> Locked`
/// - `Locked --edit--> Draft` (values kept, errors cleared)
/// - `Locked --new form--> Draft` (everything cleared)
/// - `Draft --reset--> Draft` (everything cleared)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Draft,
    Locked,
}

impl FormMode {
    pub fn is_locked(&self) -> bool {
        *self == FormMode::Locked
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Draft => "draft",
            FormMode::Locked => "locked",
        }
    }
}

impl core::fmt::Display for FormMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Validation passed; the form is now locked.
    Locked,
    /// Validation failed; the form stays in Draft and the report is published.
    Rejected { errors: usize },
    /// The form was already locked; nothing happened.
    Ignored,
}

impl SubmitOutcome {
    /// Failed submissions move the user's focus to the top of the form.
    pub fn should_focus_top(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected { .. })
    }
}

/// Why the form was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetReason {
    /// Reset button while drafting.
    UserReset,
    /// "New form" after a submission.
    NewForm,
}
