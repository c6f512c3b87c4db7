//! Decides whether a template URL points at an issue or a discussion.
use log::*;
use url::{ParseError, Url};

use crate::ticket::TicketKind;

/// Path segment identifying discussion URLs.
const DISCUSSIONS_SEGMENT: &str = "discussions";

/// Classify a template URL without touching the network.
///
/// Expects `/<owner>/<repository>/<issues|discussions>/<number>`. Relative
/// references such as `/o/r/discussions/7` or `github.com/o/r/discussions/7`
/// are classified by their raw path. Anything that fails to parse or has a
/// different shape is treated as an issue.
pub fn classify(template_url: &str) -> TicketKind {
    match Url::parse(template_url) {
        Ok(parsed) => classify_path(parsed.path()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let path = template_url
                .split(['?', '#'])
                .next()
                .unwrap_or_default();
            classify_path(path)
        }
        Err(err) => {
            debug!("url parse err for {template_url}: {err}");
            TicketKind::Issue
        }
    }
}

fn classify_path(path: &str) -> TicketKind {
    debug!("classifying template path: {path}");

    // leading slash yields an empty first segment
    let segments = path.split('/').collect::<Vec<&str>>();
    if segments.len() != 5 {
        debug!("unexpected path length: {}", segments.len());
        return TicketKind::Issue;
    }

    if segments[3] == DISCUSSIONS_SEGMENT {
        TicketKind::Discussion
    } else {
        TicketKind::Issue
    }
}
