// ai-services-core/src/domain/validation/skip.rs

use crate::domain::validation::registry::ValidationRegistry;
use std::collections::BTreeSet;

/// Rule names the caller asked to leave out of a run.
///
/// Built from `--skip-validation a,b` style values: items are split on commas,
/// trimmed and lower-cased, empty items are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet(BTreeSet<String>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = values
            .into_iter()
            .flat_map(|v| {
                v.as_ref()
                    .split(',')
                    .map(|part| part.trim().to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|part| !part.is_empty())
            .collect();
        Self(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Entries that match no rule of `registry`. They have no effect on a run.
    pub fn unknown<'a>(&'a self, registry: &ValidationRegistry) -> Vec<&'a str> {
        self.iter().filter(|name| !registry.contains(name)).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkipSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::parse(iter)
    }
}
