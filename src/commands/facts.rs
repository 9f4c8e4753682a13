//! `rigging facts` - show what a device reports about itself

use crate::Context;
use crate::cli::FactsArgs;
use crate::commands;
use anyhow::{Context as _, Result};

pub fn run(ctx: &Context, args: FactsArgs) -> Result<()> {
    let device = commands::open_device(&ctx.settings, &args.target)?;
    let facts = device
        .facts()
        .with_context(|| format!("Could not read facts from {}", device.name()))?;
    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}
