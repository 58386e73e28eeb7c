// ai-services/src/commands/version.rs

use super::AppContext;

pub fn execute(ctx: &AppContext) -> anyhow::Result<()> {
    println!("ai-services version {}", env!("CARGO_PKG_VERSION"));
    println!("runtime: {}", ctx.runtime());
    Ok(())
}
