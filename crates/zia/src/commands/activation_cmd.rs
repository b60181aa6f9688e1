//! `zia activate` / `zia status`.

use serde_json::{Map, Value};

use zia_api::models::Activation;
use zia_provider::Meta;

use crate::error::CliError;
use crate::output;

use super::Context;

fn print_status(status: &Activation, ctx: &Context) -> Result<(), CliError> {
    let mut attributes = Map::new();
    attributes.insert("status".into(), Value::String(status.status.clone()));
    let out = output::render_attributes(ctx.format, &status.status, &attributes)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

pub async fn activate(meta: &Meta, ctx: &Context) -> Result<(), CliError> {
    let status = meta.client.activate().await?;
    output::note("activated", "pending configuration", ctx.color, ctx.quiet);
    print_status(&status, ctx)
}

pub async fn status(meta: &Meta, ctx: &Context) -> Result<(), CliError> {
    let status = meta.client.activation_status().await?;
    print_status(&status, ctx)
}
