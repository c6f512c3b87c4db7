//! Parsing of ticket URLs into owner, repository and number.
use url::Url;

use crate::{error::RepositoryError, ticket::TicketKind};

/// Location of a single issue or discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl TicketLocator {
    /// Parse `https://<host>/<owner>/<repo>/<issues|discussions>/<number>`,
    /// requiring the resource segment matching `kind`.
    pub fn parse(url: &str, kind: TicketKind) -> Result<Self, RepositoryError> {
        let parsed = Url::parse(url)
            .map_err(|err| RepositoryError::invalid_url(format!("{url}: {err}")))?;

        let segments = parsed
            .path_segments()
            .map(|segments| segments.collect::<Vec<&str>>())
            .unwrap_or_default();

        let expected = match kind {
            TicketKind::Issue => "issues",
            TicketKind::Discussion => "discussions",
        };

        match segments.as_slice() {
            [owner, repo, resource, number]
                if *resource == expected
                    && !owner.is_empty()
                    && !repo.is_empty() =>
            {
                let number = number.parse::<u64>().map_err(|_| {
                    RepositoryError::invalid_url(format!(
                        "{url}: invalid {kind} number"
                    ))
                })?;

                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    number,
                })
            }
            _ => Err(RepositoryError::invalid_url(format!(
                "{url}: expected /<owner>/<repo>/{expected}/<number>"
            ))),
        }
    }
}
