//! Implements the TicketRepository trait for GitHub discussions
//!
//! Discussions are only reachable through the GraphQL API. Label filtering
//! goes through discussion search, whose matching is fuzzy, so results are
//! checked against the template's labels again before use.
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::RepositoryError,
    repository::{
        config::{DEFAULT_PAGE_SIZE, MAX_LABELS},
        locator::TicketLocator,
        traits::TicketRepository,
    },
    ticket::{Ticket, TicketKind},
};

/// GraphQL documents and response types.
pub mod graphql;

use graphql::{
    ADD_LABELS_MUTATION, AddLabelsVariables, CLOSE_DISCUSSION_MUTATION,
    CREATE_DISCUSSION_MUTATION, CloseDiscussionData, CloseDiscussionVariables,
    CreateDiscussionData, CreateDiscussionVariables, DiscussionNode,
    FIND_DISCUSSION_QUERY, FindDiscussionData, FindDiscussionVariables,
    GraphqlResponse, REPOSITORY_META_QUERY, RepositoryMeta, RepositoryMetaData,
    RepositoryMetaVariables, SEARCH_DISCUSSIONS_QUERY, SearchDiscussionsData,
    SearchDiscussionsVariables,
};

/// GitHub discussions accessed through the GraphQL API.
pub struct DiscussionRepository {
    instance: Octocrab,
}

impl DiscussionRepository {
    pub fn new(instance: Octocrab) -> Self {
        Self { instance }
    }

    async fn graphql<V, T>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T, RepositoryError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let payload = serde_json::json!({
          "query": query,
          "variables": variables,
        });

        let response: GraphqlResponse<T> =
            self.instance.graphql(&payload).await?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let message = errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<String>>()
                .join("; ");

            if errors.iter().all(|e| e.is_not_found()) {
                return Err(RepositoryError::NotFound(message));
            }

            error!("graphql request failed: {message}");
            return Err(RepositoryError::graphql(message));
        }

        response
            .data
            .ok_or_else(|| RepositoryError::graphql("response contained no data"))
    }

    async fn find_node(
        &self,
        url: &str,
    ) -> Result<DiscussionNode, RepositoryError> {
        let locator = TicketLocator::parse(url, TicketKind::Discussion)?;

        debug!(
            "fetching discussion #{} of {}/{}",
            locator.number, locator.owner, locator.repo
        );

        let data: FindDiscussionData = self
            .graphql(
                FIND_DISCUSSION_QUERY,
                FindDiscussionVariables {
                    owner: locator.owner,
                    repo: locator.repo,
                    number: locator.number,
                },
            )
            .await?;

        data.repository
            .and_then(|repository| repository.discussion)
            .ok_or_else(|| RepositoryError::NotFound(url.to_string()))
    }

    async fn repository_meta(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryMeta, RepositoryError> {
        let data: RepositoryMetaData = self
            .graphql(
                REPOSITORY_META_QUERY,
                RepositoryMetaVariables {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    labels: MAX_LABELS,
                },
            )
            .await?;

        data.repository
            .ok_or_else(|| RepositoryError::NotFound(format!("{owner}/{repo}")))
    }
}

/// Pick the newest candidate carrying every template label, restricted to
/// the template's category when it has one.
fn select_last(
    template: &Ticket,
    candidates: Vec<DiscussionNode>,
) -> Option<Ticket> {
    candidates.into_iter().map(Ticket::from).find(|candidate| {
        let category_matches = match template.category.as_deref() {
            Some(category) => candidate.category.as_deref() == Some(category),
            None => true,
        };

        category_matches && candidate.has_labels(&template.labels)
    })
}

/// Error for a discussion that was created but could not be labelled. It
/// carries the discussion URL since label search will never find it.
fn labelling_failed(
    created: &Ticket,
    source: RepositoryError,
) -> RepositoryError {
    let url = created.url.clone().unwrap_or_default();
    error!("created discussion {url} but failed to label it: {source}");
    RepositoryError::Labelling {
        url,
        source: Box::new(source),
    }
}

#[async_trait]
impl TicketRepository for DiscussionRepository {
    async fn find_by_url(&self, url: &str) -> Result<Ticket, RepositoryError> {
        let node = self.find_node(url).await?;
        Ok(Ticket::from(node))
    }

    async fn find_last_issue_by_label(
        &self,
        template: &Ticket,
    ) -> Result<Ticket, RepositoryError> {
        let query = graphql::search_query(template);

        info!("searching last discussion: {query}");

        let data: SearchDiscussionsData = self
            .graphql(
                SEARCH_DISCUSSIONS_QUERY,
                SearchDiscussionsVariables {
                    query,
                    first: DEFAULT_PAGE_SIZE,
                },
            )
            .await?;

        let last = select_last(template, data.search.nodes)
            .ok_or(RepositoryError::LastDiscussionNotFound)?;

        info!("found last discussion: {:?}", last.url);

        Ok(last)
    }

    async fn create(&self, ticket: &Ticket) -> Result<Ticket, RepositoryError> {
        let category_id = ticket
            .category
            .clone()
            .ok_or(RepositoryError::MissingCategory)?;

        let meta = self
            .repository_meta(&ticket.owner, &ticket.repository)
            .await?;

        info!(
            "creating discussion in {}/{}: {}",
            ticket.owner, ticket.repository, ticket.title
        );

        let data: CreateDiscussionData = self
            .graphql(
                CREATE_DISCUSSION_MUTATION,
                CreateDiscussionVariables {
                    repository_id: meta.id,
                    category_id,
                    title: ticket.title.clone(),
                    body: ticket.body.clone(),
                },
            )
            .await?;

        let node = data.create_discussion.discussion;
        let discussion_id = node.id.clone();

        info!("created discussion: {}", node.url);

        let repository_labels =
            meta.labels.map(|labels| labels.nodes).unwrap_or_default();

        let mut label_ids = vec![];
        let mut applied = vec![];

        for name in ticket.labels.iter() {
            if let Some(label) = repository_labels.iter().find(|l| &l.name == name)
            {
                label_ids.push(label.id.clone());
                applied.push(label.name.clone());
            } else {
                warn!("label {name} does not exist in repository: skipping");
            }
        }

        let mut created = Ticket::from(node);

        if !label_ids.is_empty() {
            let labelled: Result<serde_json::Value, RepositoryError> = self
                .graphql(
                    ADD_LABELS_MUTATION,
                    AddLabelsVariables {
                        labelable_id: discussion_id,
                        label_ids,
                    },
                )
                .await;

            if let Err(err) = labelled {
                return Err(labelling_failed(&created, err));
            }

            created.labels = applied;
        }

        Ok(created)
    }

    async fn close_by_url(&self, url: &str) -> Result<Ticket, RepositoryError> {
        let node = self.find_node(url).await?;

        info!("closing discussion: {url}");

        let data: CloseDiscussionData = self
            .graphql(
                CLOSE_DISCUSSION_MUTATION,
                CloseDiscussionVariables {
                    discussion_id: node.id,
                },
            )
            .await?;

        Ok(Ticket::from(data.close_discussion.discussion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(url: &str, category: &str, labels: &[&str]) -> DiscussionNode {
        serde_json::from_value(serde_json::json!({
            "id": format!("D_{url}"),
            "title": "Weekly",
            "body": "",
            "url": url,
            "category": { "id": category },
            "labels": {
                "nodes": labels
                    .iter()
                    .map(|name| serde_json::json!({ "name": name }))
                    .collect::<Vec<serde_json::Value>>()
            },
            "repository": { "name": "r", "owner": { "login": "o" } }
        }))
        .unwrap()
    }

    fn template(category: Option<&str>, labels: &[&str]) -> Ticket {
        Ticket {
            owner: "o".into(),
            repository: "r".into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            category: category.map(|c| c.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn selects_newest_with_all_labels() {
        let candidates = vec![
            node("https://github.com/o/r/discussions/9", "C1", &["weekly"]),
            node(
                "https://github.com/o/r/discussions/8",
                "C1",
                &["team", "weekly"],
            ),
            node(
                "https://github.com/o/r/discussions/7",
                "C1",
                &["weekly", "team"],
            ),
        ];

        let selected =
            select_last(&template(Some("C1"), &["weekly", "team"]), candidates)
                .unwrap();

        assert_eq!(
            selected.url.as_deref(),
            Some("https://github.com/o/r/discussions/8")
        );
    }

    #[test]
    fn skips_other_categories() {
        let candidates = vec![
            node("https://github.com/o/r/discussions/9", "C2", &["weekly"]),
            node("https://github.com/o/r/discussions/8", "C1", &["weekly"]),
        ];

        let selected =
            select_last(&template(Some("C1"), &["weekly"]), candidates).unwrap();

        assert_eq!(
            selected.url.as_deref(),
            Some("https://github.com/o/r/discussions/8")
        );
    }

    #[test]
    fn no_match_yields_none() {
        let candidates =
            vec![node("https://github.com/o/r/discussions/9", "C1", &["daily"])];

        assert!(
            select_last(&template(Some("C1"), &["weekly"]), candidates).is_none()
        );
        assert!(select_last(&template(None, &["weekly"]), vec![]).is_none());
    }

    #[test]
    fn labelling_failure_names_created_discussion() {
        let created = Ticket::from(node(
            "https://github.com/o/r/discussions/10",
            "C1",
            &[],
        ));

        let err = labelling_failed(
            &created,
            RepositoryError::graphql("label not found"),
        );

        assert_eq!(
            err.to_string(),
            "Created discussion https://github.com/o/r/discussions/10 but failed to label it"
        );
        assert!(matches!(
            err,
            RepositoryError::Labelling { source, .. }
                if matches!(source.as_ref(), RepositoryError::Graphql(_))
        ));
    }

    #[test]
    fn empty_label_set_matches_newest() {
        let candidates = vec![
            node("https://github.com/o/r/discussions/9", "C1", &[]),
            node("https://github.com/o/r/discussions/8", "C1", &["weekly"]),
        ];

        let selected = select_last(&template(None, &[]), candidates).unwrap();

        assert_eq!(
            selected.url.as_deref(),
            Some("https://github.com/o/r/discussions/9")
        );
    }
}
