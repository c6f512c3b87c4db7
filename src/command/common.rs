//! Common functionality shared between commands
use chrono::Local;
use log::*;

use crate::{
    cli::Args,
    guard::BashScriptRunner,
    repository::factory::RepositoryFactory,
    result::Result,
    service::{IssueService, IssueServiceConfig, IssueServiceConfigBuilder},
};

/// Service config seeded with the current local time.
pub fn service_config() -> IssueServiceConfigBuilder {
    let now = Local::now().fixed_offset();
    debug!("reference time: {}", now.to_rfc3339());

    let mut builder = IssueServiceConfig::builder();
    builder.current_time(now);
    builder
}

/// Build an issue service talking to GitHub with the given behaviour.
pub fn build_service(
    args: &Args,
    config: IssueServiceConfig,
) -> Result<IssueService> {
    let github_config = args.get_github_config()?;
    let repositories = RepositoryFactory::create(&github_config)?;

    Ok(IssueService::new(
        repositories,
        Box::new(BashScriptRunner::default()),
        config,
    ))
}
