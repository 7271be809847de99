use crate::Context;
use crate::cli::ApplyArgs;
use crate::config;
use crate::output;
use anyhow::Result;

/// Converge the declared contact point
pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let target = config::resolve_declaration(args.declaration)?.into_target()?;
    let client = super::connect(&args.connection)?;

    let outcome = client.apply(&target)?;
    output::outcome(ctx, target.uid(), &outcome)
}
