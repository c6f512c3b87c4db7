//! The ticket model shared by issue and discussion repositories.
use derive_builder::Builder;
use serde::Serialize;
use std::fmt;

/// URL given to the prior ticket when no earlier discussion exists for a
/// label set.
pub const LAST_ISSUE_NOT_FOUND: &str = "Last Issue is not found";

/// The two kinds of ticket a template can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TicketKind {
    Issue,
    Discussion,
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketKind::Issue => write!(f, "issue"),
            TicketKind::Discussion => write!(f, "discussion"),
        }
    }
}

/// An issue or discussion, either fetched from GitHub or rendered from a
/// template and waiting to be created.
///
/// Field names serialize in the form template directives use them, e.g.
/// `{{ LastIssue.Title }}` or `{{ LastIssue.URL }}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(setter(into), default)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    pub owner: String,
    pub repository: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    /// Absent until the ticket exists remotely
    #[builder(setter(into, strip_option))]
    #[serde(rename = "URL")]
    pub url: Option<String>,
    /// URL of the ticket this one was rendered from. Only set on rendered
    /// tickets.
    #[serde(rename = "LastIssueURL")]
    pub last_issue_url: String,
    /// Discussion category node id, `None` for issues
    #[builder(setter(into, strip_option))]
    pub category: Option<String>,
}

impl Ticket {
    pub fn builder() -> TicketBuilder {
        TicketBuilder::default()
    }

    /// Placeholder prior ticket used on the first run for a discussion label
    /// set.
    pub fn not_found_placeholder() -> Self {
        Self {
            url: Some(LAST_ISSUE_NOT_FOUND.to_string()),
            ..Default::default()
        }
    }

    /// True when every label of `required` is present on this ticket.
    pub fn has_labels(&self, required: &[String]) -> bool {
        required.iter().all(|label| self.labels.contains(label))
    }
}
