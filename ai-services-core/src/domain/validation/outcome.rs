// ai-services-core/src/domain/validation/outcome.rs

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Warning-level failure: reported, never fails the run.
    Warned,
    Skipped,
}

/// What happened to one rule during a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

/// An Error-level rule failure, kept for the aggregate result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub name: String,
    pub cause: String,
    pub hint: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.cause)
    }
}

/// Result of a run where no Error-level rule failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub registry: String,
    pub checks: Vec<CheckRecord>,
}

impl ValidationReport {
    pub fn new(registry: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            checks: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, status: CheckStatus, message: impl Into<String>) {
        self.checks.push(CheckRecord {
            name: name.to_string(),
            status,
            message: message.into(),
        });
    }

    fn with_status(&self, status: CheckStatus) -> impl Iterator<Item = &CheckRecord> {
        self.checks.iter().filter(move |c| c.status == status)
    }

    pub fn passed(&self) -> Vec<&CheckRecord> {
        self.with_status(CheckStatus::Passed).collect()
    }

    pub fn warnings(&self) -> Vec<&CheckRecord> {
        self.with_status(CheckStatus::Warned).collect()
    }

    pub fn skipped(&self) -> Vec<&CheckRecord> {
        self.with_status(CheckStatus::Skipped).collect()
    }
}
