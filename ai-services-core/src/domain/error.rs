// ai-services-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Rule '{rule}' is already registered in the {registry} registry")]
    #[diagnostic(
        code(ai_services::domain::duplicate_rule),
        help("Rule names are used by --skip-validation and must be unique per registry.")
    )]
    DuplicateRule { registry: String, rule: String },

    #[error("Unknown runtime '{0}'")]
    #[diagnostic(
        code(ai_services::domain::runtime),
        help("Supported runtimes are 'podman' and 'openshift'.")
    )]
    UnknownRuntime(String),
}
