//! `rigging types` - describe the built-in resource types

use crate::Context;
use crate::cli::TypesArgs;
use crate::ui;
use anyhow::Result;
use declarative::{AttributeDef, DefaultValue, Provider};

pub fn run(ctx: &Context, args: TypesArgs) -> Result<()> {
    let registry = crate::resource::registry();

    match &args.name {
        Some(name) => describe(ctx, registry.require(name)?),
        None => {
            for provider in registry.iter() {
                describe(ctx, provider);
            }
        }
    }
    Ok(())
}

fn describe(ctx: &Context, provider: &dyn Provider) {
    ui::header(provider.type_name());
    if !ctx.quiet {
        ui::dim(&provider.description());
    }
    for def in provider.schema().attributes() {
        ui::kv(def.name, &attribute_summary(def));
    }
}

/// `<kind>[, default <value>][ - <doc>]`
fn attribute_summary(def: &AttributeDef) -> String {
    let mut summary = def.kind.describe();
    match &def.default {
        Some(DefaultValue::Value(value)) => summary.push_str(&format!(", default '{value}'")),
        Some(DefaultValue::Namevar) => summary.push_str(", defaults to the title"),
        None => {}
    }
    if !def.doc.is_empty() {
        summary.push_str(" - ");
        summary.push_str(def.doc);
    }
    summary
}
