use crate::Context;
use crate::cli::ApplyArgs;
use crate::config;
use crate::output;
use anyhow::Result;

/// Report the action apply would take, without mutating anything
pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let target = config::resolve_declaration(args.declaration)?.into_target()?;
    let client = super::connect(&args.connection)?;

    let plan = client.plan(&target)?;
    output::plan(ctx, &plan)
}
