// ai-services-core/src/application/validation.rs

use crate::domain::validation::{
    CheckFailure, CheckStatus, PRIVILEGE_RULE, Severity, SkipSet, ValidationRegistry,
    ValidationReport,
};
use crate::ports::ProgressReporter;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Error, Debug, Diagnostic)]
pub enum ValidationError {
    /// The privilege rule failed: nothing else was checked.
    #[error("root privileges are required: {cause}")]
    #[diagnostic(code(ai_services::validation::privileges))]
    PrivilegesRequired { cause: String, hint: String },

    #[error("{count} validation check(s) failed")]
    #[diagnostic(
        code(ai_services::validation::failed),
        help("Fix the reported checks, or skip them with --skip-validation <name,...>.")
    )]
    ChecksFailed {
        count: usize,
        failures: Vec<CheckFailure>,
    },
}

impl ValidationError {
    /// Remediation hints in check order.
    pub fn hints(&self) -> Vec<&str> {
        match self {
            ValidationError::PrivilegesRequired { hint, .. } => vec![hint.as_str()],
            ValidationError::ChecksFailed { failures, .. } => {
                failures.iter().map(|f| f.hint.as_str()).collect()
            }
        }
    }
}

pub fn skipped_notice(name: &str) -> String {
    format!(
        "{name} check skipped; Proceeding without validation may result in deployment failure."
    )
}

/// Runs every rule of `registry` in registration order.
///
/// Skipped rules only produce a notice. A failing privilege rule aborts the run,
/// Error-level failures are aggregated, Warning-level failures are reported and
/// recorded but never fail the run.
#[instrument(skip_all, fields(registry = registry.name()))]
pub async fn run_validation(
    registry: &ValidationRegistry,
    skip: &SkipSet,
    reporter: &dyn ProgressReporter,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(registry.name());
    let mut failures: Vec<CheckFailure> = Vec::new();

    for rule in registry.rules() {
        let name = rule.name();

        if skip.contains(name) {
            let notice = skipped_notice(name);
            warn!(rule = name, "Check skipped");
            reporter.warning(&notice);
            report.record(name, CheckStatus::Skipped, notice);
            continue;
        }

        reporter.start(&format!("Validating {name}..."));
        debug!(rule = name, "Verifying");

        match rule.verify().await {
            Ok(()) => {
                let message = rule.message();
                reporter.success(&message);
                report.record(name, CheckStatus::Passed, message);
            }
            Err(err) if name == PRIVILEGE_RULE => {
                let (cause, hint) = (err.to_string(), rule.hint());
                reporter.failure(&cause, Some(&hint));
                warn!(rule = name, %cause, "Privilege check failed, aborting validation");
                return Err(ValidationError::PrivilegesRequired { cause, hint });
            }
            Err(err) => match rule.level() {
                Severity::Error => {
                    let failure = CheckFailure {
                        name: name.to_string(),
                        cause: err.to_string(),
                        hint: rule.hint(),
                    };
                    reporter.failure(&failure.cause, Some(&failure.hint));
                    warn!(rule = name, cause = %failure.cause, "Check failed");
                    failures.push(failure);
                }
                Severity::Warning => {
                    let cause = err.to_string();
                    reporter.warning(&cause);
                    warn!(rule = name, %cause, "Check reported a warning");
                    report.record(name, CheckStatus::Warned, cause);
                }
            },
        }
    }

    if !failures.is_empty() {
        return Err(ValidationError::ChecksFailed {
            count: failures.len(),
            failures,
        });
    }

    info!(
        passed = report.passed().len(),
        warnings = report.warnings().len(),
        skipped = report.skipped().len(),
        "All validations passed"
    );
    Ok(report)
}
