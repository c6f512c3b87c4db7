//! Configuration for GitHub API connections.
use secrecy::SecretString;

/// GitHub REST/GraphQL API base used when none is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Page size when looking up the last ticket for a label set.
pub const DEFAULT_PAGE_SIZE: u8 = 20;
/// Maximum number of repository labels resolved when labelling discussions.
pub const MAX_LABELS: u8 = 100;

/// Connection settings shared by the issue and discussion repositories.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base URL (e.g. "https://api.github.com").
    pub api_url: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}
