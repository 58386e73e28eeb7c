// ai-services-core/src/domain/validation/mod.rs

pub mod outcome;
pub mod registry;
pub mod rule;
pub mod skip;

pub use outcome::{CheckFailure, CheckRecord, CheckStatus, ValidationReport};
pub use registry::ValidationRegistry;
pub use rule::{PRIVILEGE_RULE, Rule, RuleError, Severity};
pub use skip::SkipSet;
