//! Traits related to ticket repositories
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{error::RepositoryError, ticket::Ticket};

/// Storage of tickets of one kind on the hosting platform.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Fetch the ticket addressed by `url`.
    async fn find_by_url(&self, url: &str) -> Result<Ticket, RepositoryError>;

    /// Most recently created ticket carrying every label of `template`.
    async fn find_last_issue_by_label(
        &self,
        template: &Ticket,
    ) -> Result<Ticket, RepositoryError>;

    /// Persist `ticket` and return the created ticket with its URL set.
    async fn create(&self, ticket: &Ticket) -> Result<Ticket, RepositoryError>;

    /// Close the ticket addressed by `url`.
    async fn close_by_url(&self, url: &str) -> Result<Ticket, RepositoryError>;
}
