//! GraphQL documents and response types for GitHub discussions.
use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;

macro_rules! discussion_fields {
    () => {
        r#"
fragment DiscussionFields on Discussion {
  id
  title
  body
  url
  category {
    id
  }
  labels(first: 100) {
    nodes {
      name
    }
  }
  repository {
    name
    owner {
      login
    }
  }
}"#
    };
}

pub const FIND_DISCUSSION_QUERY: &str = concat!(
    r#"
query FindDiscussion($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) {
      ...DiscussionFields
    }
  }
}"#,
    discussion_fields!()
);

pub const SEARCH_DISCUSSIONS_QUERY: &str = concat!(
    r#"
query SearchDiscussions($query: String!, $first: Int!) {
  search(query: $query, type: DISCUSSION, first: $first) {
    nodes {
      ...DiscussionFields
    }
  }
}"#,
    discussion_fields!()
);

pub const REPOSITORY_META_QUERY: &str = r#"
query RepositoryMeta($owner: String!, $repo: String!, $labels: Int!) {
  repository(owner: $owner, name: $repo) {
    id
    labels(first: $labels) {
      nodes {
        id
        name
      }
    }
  }
}"#;

pub const CREATE_DISCUSSION_MUTATION: &str = concat!(
    r#"
mutation CreateDiscussion($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(input: {repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body}) {
    discussion {
      ...DiscussionFields
    }
  }
}"#,
    discussion_fields!()
);

pub const ADD_LABELS_MUTATION: &str = r#"
mutation AddLabels($labelableId: ID!, $labelIds: [ID!]!) {
  addLabelsToLabelable(input: {labelableId: $labelableId, labelIds: $labelIds}) {
    clientMutationId
  }
}"#;

pub const CLOSE_DISCUSSION_MUTATION: &str = concat!(
    r#"
mutation CloseDiscussion($discussionId: ID!) {
  closeDiscussion(input: {discussionId: $discussionId}) {
    discussion {
      ...DiscussionFields
    }
  }
}"#,
    discussion_fields!()
);

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl GraphqlError {
    pub fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
    }
}

#[derive(Debug, Deserialize)]
pub struct LabelName {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionLabels {
    pub nodes: Vec<LabelName>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerRef {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub owner: OwnerRef,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionNode {
    pub id: String,
    pub title: String,
    pub body: String,
    pub url: String,
    pub category: Option<CategoryRef>,
    pub labels: Option<DiscussionLabels>,
    pub repository: RepositoryRef,
}

impl From<DiscussionNode> for Ticket {
    fn from(node: DiscussionNode) -> Self {
        Ticket {
            owner: node.repository.owner.login,
            repository: node.repository.name,
            title: node.title,
            body: node.body,
            labels: node
                .labels
                .map(|labels| labels.nodes.into_iter().map(|l| l.name).collect())
                .unwrap_or_default(),
            url: Some(node.url),
            last_issue_url: "".to_string(),
            category: node.category.map(|c| c.id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindDiscussionRepository {
    pub discussion: Option<DiscussionNode>,
}

#[derive(Debug, Deserialize)]
pub struct FindDiscussionData {
    pub repository: Option<FindDiscussionRepository>,
}

#[derive(Debug, Serialize)]
pub struct FindDiscussionVariables {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchNodes {
    pub nodes: Vec<DiscussionNode>,
}

#[derive(Debug, Deserialize)]
pub struct SearchDiscussionsData {
    pub search: SearchNodes,
}

#[derive(Debug, Serialize)]
pub struct SearchDiscussionsVariables {
    pub query: String,
    pub first: u8,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryLabel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryLabels {
    pub nodes: Vec<RepositoryLabel>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryMeta {
    pub id: String,
    pub labels: Option<RepositoryLabels>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryMetaData {
    pub repository: Option<RepositoryMeta>,
}

#[derive(Debug, Serialize)]
pub struct RepositoryMetaVariables {
    pub owner: String,
    pub repo: String,
    pub labels: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionVariables {
    pub repository_id: String,
    pub category_id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionPayload {
    pub discussion: DiscussionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionData {
    pub create_discussion: DiscussionPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelsVariables {
    pub labelable_id: String,
    pub label_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseDiscussionVariables {
    pub discussion_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseDiscussionData {
    pub close_discussion: DiscussionPayload,
}

/// Build the search query matching discussions of `template`'s repository
/// carrying all of its labels, newest first.
pub fn search_query(template: &Ticket) -> String {
    let mut query = format!(
        "repo:{}/{} sort:created-desc",
        template.owner, template.repository
    );

    for label in &template.labels {
        query.push_str(&format!(" label:\"{}\"", label.replace('"', "\\\"")));
    }

    query
}
