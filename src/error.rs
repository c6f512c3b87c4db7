//! Custom error types for issue-creator.
//!
//! [`RepositoryError`] is returned by ticket repositories, [`IssueCreatorError`]
//! by the issue service. Every service variant names the stage that failed.

use std::fmt;

use thiserror::Error;

use crate::ticket::TicketKind;

/// Errors surfaced by [`crate::repository::traits::TicketRepository`]
/// implementations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Invalid ticket url: {0}")]
    InvalidUrl(String),

    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("Last issue not found for labels: {0:?}")]
    LastIssueNotFound(Vec<String>),

    #[error("Last discussion not found")]
    LastDiscussionNotFound,

    #[error("Discussion category is required to create a discussion")]
    MissingCategory,

    #[error("Created discussion {url} but failed to label it")]
    Labelling {
        url: String,
        #[source]
        source: Box<RepositoryError>,
    },

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("GitHub GraphQL error: {0}")]
    Graphql(String),
}

impl RepositoryError {
    /// Create an invalid url error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a graphql error
    pub fn graphql(msg: impl Into<String>) -> Self {
        Self::Graphql(msg.into())
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for RepositoryError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code == reqwest::StatusCode::NOT_FOUND =>
            {
                Self::NotFound(source.message.clone())
            }
            _ => Self::Api(err.to_string()),
        }
    }
}

/// Which of the two template programs an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateField {
    Title,
    Body,
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateField::Title => write!(f, "title"),
            TemplateField::Body => write!(f, "body"),
        }
    }
}

/// Main error type for issue service operations.
#[derive(Error, Debug)]
pub enum IssueCreatorError {
    // Fetch errors
    #[error("Failed to fetch template {kind} {url}")]
    FetchTemplate {
        kind: TicketKind,
        url: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to get last {kind}")]
    FetchLastIssue {
        kind: TicketKind,
        #[source]
        source: RepositoryError,
    },

    // Template errors
    #[error("Failed to parse {field}")]
    Parse {
        field: TemplateField,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render {field}")]
    Render {
        field: TemplateField,
        #[source]
        source: tera::Error,
    },

    // Validation errors
    #[error("Requires at least one label")]
    MissingLabels,

    #[error("Invalid last issue passed (empty URL)")]
    EmptyLastIssueUrl,

    // Guard script errors
    #[error("Failed to exec check before create issue: {0}")]
    GuardLaunch(#[from] std::io::Error),

    #[error("Check before create issue failed with status {status}: {output}")]
    GuardFailed { status: String, output: String },

    // Write errors
    #[error("Failed to create {kind}")]
    Creation {
        kind: TicketKind,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to close last {kind} {url}")]
    Close {
        kind: TicketKind,
        url: String,
        #[source]
        source: RepositoryError,
    },
}
