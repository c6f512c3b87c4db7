//! Implements the render command
use crate::{cli::Args, command::common, result::Result};

/// Execute render command: print the ticket the template would produce.
pub async fn execute(args: &Args, template_url: &str) -> Result<()> {
    let service =
        common::build_service(args, common::service_config().build()?)?;

    let ticket = service.render(template_url).await?;

    println!("{}", serde_json::to_string_pretty(&ticket)?);

    Ok(())
}
