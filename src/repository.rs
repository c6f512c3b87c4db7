//! Ticket storage on GitHub.
//!
//! Issues and discussions sit behind one [`traits::TicketRepository`] trait;
//! the issue service picks the implementation once per run from the template
//! URL.

/// Connection settings for the GitHub API.
pub mod config;

/// Discussion repository backed by the GraphQL API.
pub mod discussion;

/// Construction and selection of repositories.
pub mod factory;

/// Issue repository backed by the REST API.
pub mod issue;

/// Ticket URL parsing.
pub mod locator;

/// Common trait for ticket repositories.
pub mod traits;
