// ai-services/src/commands/validate.rs
//
// USE CASE: Validate the runtime prerequisites.

use super::AppContext;
use ai_services_core::application::ValidationError;
use ai_services_core::domain::validation::SkipSet;
use ai_services_core::infrastructure::SpinnerReporter;
use tracing::warn;

pub async fn execute(ctx: &AppContext, skip_validation: &[String]) -> anyhow::Result<()> {
    let factory = ctx.factory()?;
    let skip = SkipSet::parse(skip_validation);

    let unknown = skip.unknown(factory.registry());
    if !unknown.is_empty() {
        warn!(checks = ?unknown, runtime = %ctx.runtime(), "Ignoring unknown checks in --skip-validation");
    }

    println!("🔍 Validating {} runtime...", ctx.runtime());
    let reporter = SpinnerReporter::new();
    let result = factory.validate(&skip, &reporter).await;
    drop(reporter);

    match result {
        Ok(report) => {
            let warnings = report.warnings();
            if !warnings.is_empty() {
                println!("⚠️  {} warning(s):", warnings.len());
                for check in warnings {
                    println!("   - {}: {}", check.name, check.message);
                }
            }
            println!("✨ All validations passed");
            Ok(())
        }
        Err(err) => {
            if let ValidationError::ChecksFailed { failures, .. } = &err {
                eprintln!("\n❌ Failed checks:");
                for failure in failures {
                    eprintln!("   - {failure}");
                    eprintln!("     HINT: {}", failure.hint);
                }
            } else {
                for hint in err.hints() {
                    eprintln!("\n   HINT: {hint}");
                }
            }
            Err(err.into())
        }
    }
}
