use crate::Context;
use crate::cli::ShowArgs;
use crate::output;
use anyhow::{Result, bail};

pub fn run(ctx: &Context, args: ShowArgs) -> Result<()> {
    if args.uid.trim().is_empty() {
        bail!("uid must not be empty");
    }
    let client = super::connect(&args.connection)?;
    let contact_point = client.get(&args.uid)?;
    output::contact_point(ctx, &args.uid, contact_point.as_ref())
}
