//! Replay a scripted list of form commands against a fresh session.

use serde::Serialize;

use talentpo_catalog::CatalogLookup;
use talentpo_purchasing::{ErrorReport, FormCommand, FormMode, FormSession, PurchaseOrderForm};

/// What one scripted command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub step: usize,
    pub command: FormCommand,
    pub events: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub mode: FormMode,
    pub errors: ErrorReport,
    pub steps: Vec<StepOutcome>,
    pub form: PurchaseOrderForm,
}

/// Run every command in order. Malformed commands are recorded and skipped.
pub fn replay<C: CatalogLookup + 'static>(catalog: C, commands: Vec<FormCommand>) -> ReplayReport {
    let mut session = FormSession::new(catalog);
    let mut steps = Vec::with_capacity(commands.len());

    for (step, command) in commands.into_iter().enumerate() {
        let outcome = match session.dispatch(&command) {
            Ok(events) => StepOutcome {
                step,
                events: events.iter().map(|e| e.event_type()).collect(),
                command,
                error: None,
            },
            Err(err) => {
                tracing::warn!(step, error = %err, "scripted command rejected");
                StepOutcome {
                    step,
                    command,
                    events: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        };
        steps.push(outcome);
    }

    let form = session.into_form();
    ReplayReport {
        mode: form.mode(),
        errors: form.errors().clone(),
        steps,
        form,
    }
}
