//! Factory for creating ticket repositories based on configuration.
use octocrab::Octocrab;

use crate::{
    repository::{
        config::GithubConfig, discussion::DiscussionRepository,
        issue::IssueRepository, traits::TicketRepository,
    },
    result::Result,
    ticket::TicketKind,
};

/// One repository per ticket kind.
pub struct Repositories {
    issue: Box<dyn TicketRepository>,
    discussion: Box<dyn TicketRepository>,
}

impl Repositories {
    pub fn new(
        issue: Box<dyn TicketRepository>,
        discussion: Box<dyn TicketRepository>,
    ) -> Self {
        Self { issue, discussion }
    }

    /// Repository serving tickets of `kind`.
    pub fn select(&self, kind: TicketKind) -> &dyn TicketRepository {
        match kind {
            TicketKind::Issue => self.issue.as_ref(),
            TicketKind::Discussion => self.discussion.as_ref(),
        }
    }
}

/// Factory for creating GitHub-backed repositories.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create issue and discussion repositories sharing one API client.
    pub fn create(config: &GithubConfig) -> Result<Repositories> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .build()?;

        Ok(Repositories::new(
            Box::new(IssueRepository::new(instance.clone())),
            Box::new(DiscussionRepository::new(instance)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::traits::MockTicketRepository;

    #[tokio::test]
    async fn selects_repository_by_kind() {
        let mut issue = MockTicketRepository::new();
        issue
            .expect_close_by_url()
            .times(1)
            .returning(|_| Ok(Default::default()));

        let mut discussion = MockTicketRepository::new();
        discussion.expect_close_by_url().times(0);

        let repositories =
            Repositories::new(Box::new(issue), Box::new(discussion));

        repositories
            .select(TicketKind::Issue)
            .close_by_url("https://github.com/o/r/issues/1")
            .await
            .unwrap();
    }
}
