// ai-services-core/src/domain/validation/registry.rs

use crate::domain::error::DomainError;
use crate::domain::validation::rule::Rule;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Ordered set of rules for one substrate.
///
/// Written once at start-up, read during validation. Readers get a snapshot
/// and never hold the lock while rules run.
pub struct ValidationRegistry {
    name: String,
    rules: RwLock<Vec<Arc<dyn Rule>>>,
}

impl ValidationRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a rule. Names must be unique within the registry.
    pub fn register<R: Rule + 'static>(&self, rule: R) -> Result<(), DomainError> {
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);

        if rules.iter().any(|r| r.name() == rule.name()) {
            return Err(DomainError::DuplicateRule {
                registry: self.name.clone(),
                rule: rule.name().to_string(),
            });
        }

        debug!(registry = %self.name, rule = rule.name(), "Registering validation rule");
        rules.push(Arc::new(rule));
        Ok(())
    }

    /// Snapshot of the registered rules, in registration order.
    pub fn rules(&self) -> Vec<Arc<dyn Rule>> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| r.name().to_string())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ValidationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRegistry")
            .field("name", &self.name)
            .field("rules", &self.names())
            .finish()
    }
}
