// ai-services-core/src/application/help.rs

use crate::domain::validation::ValidationRegistry;
use std::fmt::Write;

/// Help text listing the checks of each registry, for `--skip-validation`.
pub fn describe_checks(registries: &[&ValidationRegistry]) -> String {
    let mut text = String::from("Available checks to skip:\n");
    for registry in registries {
        let rules = registry.rules();
        let width = rules.iter().map(|r| r.name().len()).max().unwrap_or(0);

        let _ = writeln!(text, "\n  {}:", registry.name());
        for rule in &rules {
            let _ = writeln!(
                text,
                "    {:<width$}  {}",
                rule.name(),
                rule.description(),
                width = width
            );
        }
    }
    text
}
