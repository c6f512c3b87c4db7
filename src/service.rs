//! The issue service: renders a new ticket from a template ticket and the
//! last ticket sharing its labels, then creates it.
//!
//! A run moves through these stages, stopping at the first failure:
//!
//! 1. classify the template URL and pick the issue or discussion repository
//! 2. fetch the template
//! 3. compile title and body
//! 4. require labels on issue templates
//! 5. fetch the last ticket with the same labels
//! 6. render title and body
//! 7. run the guard script, when configured
//! 8. create the ticket
//! 9. close the last ticket, when configured
//!
//! Nothing is written before stage 8, and nothing is closed unless creation
//! succeeded.
use chrono::{DateTime, FixedOffset};
use derive_builder::Builder;
use log::*;

use crate::{
    classifier,
    error::{IssueCreatorError, RepositoryError},
    guard::ScriptRunner,
    repository::{factory::Repositories, traits::TicketRepository},
    template::TemplateRenderer,
    ticket::{LAST_ISSUE_NOT_FOUND, Ticket, TicketKind},
};

/// Link named in the footer of every created ticket.
pub const PROJECT_URL: &str = "https://github.com/rerost/issue-creator";

/// Footer appended to every rendered body.
pub fn attribution_footer(template_url: &str) -> String {
    format!(" \n\n _Created from {template_url} by [issue-creator]({PROJECT_URL})_")
}

/// Behaviour switches of the issue service.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct IssueServiceConfig {
    /// Reference time for every date directive of the run
    pub current_time: DateTime<FixedOffset>,
    /// Close the last ticket after the new one is created
    #[builder(default)]
    pub close_last_issue: bool,
    /// Shell script that must succeed before anything is created
    #[builder(default, setter(into, strip_option))]
    pub check_before_create_issue: Option<String>,
    /// Log writes instead of performing them
    #[builder(default)]
    pub dry_run: bool,
}

impl IssueServiceConfig {
    pub fn builder() -> IssueServiceConfigBuilder {
        IssueServiceConfigBuilder::default()
    }

    fn guard_script(&self) -> Option<&str> {
        self.check_before_create_issue
            .as_deref()
            .filter(|script| !script.trim().is_empty())
    }
}

/// Creates tickets from templates.
pub struct IssueService {
    repositories: Repositories,
    script_runner: Box<dyn ScriptRunner>,
    config: IssueServiceConfig,
}

impl IssueService {
    pub fn new(
        repositories: Repositories,
        script_runner: Box<dyn ScriptRunner>,
        config: IssueServiceConfig,
    ) -> Self {
        Self {
            repositories,
            script_runner,
            config,
        }
    }

    /// Render the ticket `template_url` would produce without writing
    /// anything.
    pub async fn render(
        &self,
        template_url: &str,
    ) -> Result<Ticket, IssueCreatorError> {
        let kind = classifier::classify(template_url);
        let repository = self.repositories.select(kind);
        self.render_ticket(repository, kind, template_url).await
    }

    /// Render and create the ticket for `template_url`, closing the last
    /// ticket when configured.
    ///
    /// Closing is skipped with a warning when the last ticket is the
    /// not-found placeholder, or when it is the template itself.
    pub async fn create(
        &self,
        template_url: &str,
    ) -> Result<Ticket, IssueCreatorError> {
        let kind = classifier::classify(template_url);
        let repository = self.repositories.select(kind);

        let ticket = self.render_ticket(repository, kind, template_url).await?;

        if let Some(script) = self.config.guard_script() {
            self.check_before_create(script).await?;
        }

        if self.config.dry_run {
            warn!("dry_run: would create {kind}: {:#?}", ticket);
            if self.config.close_last_issue {
                warn!(
                    "dry_run: would close last {kind}: {}",
                    ticket.last_issue_url
                );
            }
            return Ok(ticket);
        }

        let created = repository
            .create(&ticket)
            .await
            .map_err(|source| IssueCreatorError::Creation { kind, source })?;

        if !self.config.close_last_issue {
            return Ok(created);
        }

        if ticket.last_issue_url == LAST_ISSUE_NOT_FOUND {
            warn!(
                "no last {kind} exists for labels {:?}: nothing to close",
                ticket.labels
            );
            return Ok(created);
        }

        if ticket.last_issue_url == template_url {
            warn!(
                "last {kind} is the template itself: not closing {template_url}"
            );
            return Ok(created);
        }

        repository
            .close_by_url(&ticket.last_issue_url)
            .await
            .map_err(|source| IssueCreatorError::Close {
                kind,
                url: ticket.last_issue_url.clone(),
                source,
            })?;

        info!("closed last {kind}: {}", ticket.last_issue_url);

        Ok(created)
    }

    async fn render_ticket(
        &self,
        repository: &dyn TicketRepository,
        kind: TicketKind,
        template_url: &str,
    ) -> Result<Ticket, IssueCreatorError> {
        debug!("rendering {kind} template: {template_url}");

        let template =
            repository.find_by_url(template_url).await.map_err(|source| {
                IssueCreatorError::FetchTemplate {
                    kind,
                    url: template_url.to_string(),
                    source,
                }
            })?;

        let compiled =
            TemplateRenderer::new(self.config.current_time).compile(&template)?;

        if kind == TicketKind::Issue && template.labels.is_empty() {
            return Err(IssueCreatorError::MissingLabels);
        }

        let last_issue = match repository.find_last_issue_by_label(&template).await
        {
            Ok(last_issue) => last_issue,
            Err(RepositoryError::LastDiscussionNotFound)
                if kind == TicketKind::Discussion =>
            {
                warn!(
                    "no previous discussion with labels {:?}: using placeholder",
                    template.labels
                );
                Ticket::not_found_placeholder()
            }
            Err(source) => {
                return Err(IssueCreatorError::FetchLastIssue { kind, source });
            }
        };

        let rendered = compiled.render(&last_issue)?;

        let last_issue_url =
            last_issue.url.ok_or(IssueCreatorError::EmptyLastIssueUrl)?;

        let ticket = Ticket {
            owner: template.owner,
            repository: template.repository,
            title: rendered.title,
            body: format!("{}{}", rendered.body, attribution_footer(template_url)),
            labels: template.labels,
            url: None,
            last_issue_url,
            category: template.category,
        };

        if let Ok(json) = serde_json::to_string(&ticket) {
            debug!("rendered {kind}: {json}");
        }

        Ok(ticket)
    }

    async fn check_before_create(
        &self,
        script: &str,
    ) -> Result<(), IssueCreatorError> {
        info!("running check before create issue");

        let output = self.script_runner.run(script).await.map_err(|err| {
            error!("Failed to exec check before create issue: {err}");
            IssueCreatorError::GuardLaunch(err)
        })?;

        if !output.success {
            error!(
                "Failed to exec check before create issue: status: {}, out: {}",
                output.status(),
                output.combined_output()
            );
            return Err(IssueCreatorError::GuardFailed {
                status: output.status(),
                output: output.combined_output(),
            });
        }

        debug!("check before create issue passed");

        Ok(())
    }
}
