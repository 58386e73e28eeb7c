// ai-services/src/commands/configure.rs
//
// USE CASE: Provision the runtime prerequisites.

use super::AppContext;
use ai_services_core::infrastructure::SpinnerReporter;
use anyhow::Context;

pub async fn execute(ctx: &AppContext) -> anyhow::Result<()> {
    println!("🔧 Configuring {} runtime...", ctx.runtime());

    let factory = ctx.factory()?;
    let reporter = SpinnerReporter::new();
    factory
        .create()
        .configure(&reporter)
        .await
        .with_context(|| format!("Bootstrap configuration failed for runtime '{}'", ctx.runtime()))?;

    println!("✨ {} runtime configured successfully", ctx.runtime());
    Ok(())
}
