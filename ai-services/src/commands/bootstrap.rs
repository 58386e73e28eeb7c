// ai-services/src/commands/bootstrap.rs
//
// USE CASE: Composite bootstrap (configure, then validate).

use super::{AppContext, configure, validate};

pub async fn execute(ctx: &AppContext) -> anyhow::Result<()> {
    // a configure failure returns before any check runs
    configure::execute(ctx).await?;
    validate::execute(ctx, &[]).await?;

    println!("🎉 Bootstrap completed for {} runtime", ctx.runtime());
    Ok(())
}
