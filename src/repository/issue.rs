//! Implements the TicketRepository trait for GitHub issues
use async_trait::async_trait;
use log::*;
use octocrab::{
    Octocrab,
    models::{IssueState, issues::Issue},
    params,
};

use crate::{
    error::RepositoryError,
    repository::{
        config::DEFAULT_PAGE_SIZE, locator::TicketLocator,
        traits::TicketRepository,
    },
    ticket::{Ticket, TicketKind},
};

/// GitHub issues accessed through the REST API.
pub struct IssueRepository {
    instance: Octocrab,
}

impl IssueRepository {
    pub fn new(instance: Octocrab) -> Self {
        Self { instance }
    }
}

/// Convert an API issue into a ticket of `owner/repo`.
fn to_ticket(owner: &str, repo: &str, issue: Issue) -> Ticket {
    Ticket {
        owner: owner.to_string(),
        repository: repo.to_string(),
        title: issue.title,
        body: issue.body.unwrap_or_default(),
        labels: issue.labels.into_iter().map(|l| l.name).collect(),
        url: Some(issue.html_url.to_string()),
        last_issue_url: "".to_string(),
        category: None,
    }
}

#[async_trait]
impl TicketRepository for IssueRepository {
    async fn find_by_url(&self, url: &str) -> Result<Ticket, RepositoryError> {
        let locator = TicketLocator::parse(url, TicketKind::Issue)?;

        debug!(
            "fetching issue #{} of {}/{}",
            locator.number, locator.owner, locator.repo
        );

        let issue = self
            .instance
            .issues(&locator.owner, &locator.repo)
            .get(locator.number)
            .await?;

        Ok(to_ticket(&locator.owner, &locator.repo, issue))
    }

    async fn find_last_issue_by_label(
        &self,
        template: &Ticket,
    ) -> Result<Ticket, RepositoryError> {
        info!(
            "looking for last issue in {}/{} with labels: {:?}",
            template.owner, template.repository, template.labels
        );

        let page = self
            .instance
            .issues(&template.owner, &template.repository)
            .list()
            .labels(&template.labels)
            .state(params::State::All)
            .sort(params::issues::Sort::Created)
            .direction(params::Direction::Descending)
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        // the issues endpoint also lists pull requests
        let issue = page
            .items
            .into_iter()
            .find(|issue| issue.pull_request.is_none())
            .ok_or_else(|| {
                RepositoryError::LastIssueNotFound(template.labels.clone())
            })?;

        info!("found last issue: {}", issue.html_url);

        Ok(to_ticket(&template.owner, &template.repository, issue))
    }

    async fn create(&self, ticket: &Ticket) -> Result<Ticket, RepositoryError> {
        info!(
            "creating issue in {}/{}: {}",
            ticket.owner, ticket.repository, ticket.title
        );

        let issue = self
            .instance
            .issues(&ticket.owner, &ticket.repository)
            .create(ticket.title.clone())
            .body(ticket.body.clone())
            .labels(ticket.labels.clone())
            .send()
            .await?;

        info!("created issue: {}", issue.html_url);

        Ok(to_ticket(&ticket.owner, &ticket.repository, issue))
    }

    async fn close_by_url(&self, url: &str) -> Result<Ticket, RepositoryError> {
        let locator = TicketLocator::parse(url, TicketKind::Issue)?;

        info!("closing issue: {url}");

        let issue = self
            .instance
            .issues(&locator.owner, &locator.repo)
            .update(locator.number)
            .state(IssueState::Closed)
            .send()
            .await?;

        Ok(to_ticket(&locator.owner, &locator.repo, issue))
    }
}
