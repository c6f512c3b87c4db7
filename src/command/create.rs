//! Implements the create command
use log::*;

use crate::{
    cli::{Args, CreateOptions},
    command::common,
    result::Result,
};

/// Execute create command: render the template and create the ticket.
pub async fn execute(
    args: &Args,
    template_url: &str,
    options: CreateOptions,
) -> Result<()> {
    let mut builder = common::service_config();
    builder
        .close_last_issue(options.close_last_issue)
        .dry_run(options.dry_run);

    if let Some(script) = options.check_before_create_issue {
        builder.check_before_create_issue(script);
    }

    let service = common::build_service(args, builder.build()?)?;

    let ticket = service.create(template_url).await?;

    if options.dry_run {
        return Ok(());
    }

    match ticket.url {
        Some(url) => info!("created: {url}"),
        None => info!("created: {}", ticket.title),
    }

    Ok(())
}
