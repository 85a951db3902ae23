use crate::extract::date::parse_date;
use crate::extract::markup::plain_text_length;
use crate::model::{ConvertError, Issue, MissingResolution, RecordRef, Result};
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use roxmltree::{Document, Node, ParsingOptions};

const ITEM_TAG: &str = "item";
const COMMENT_TAG: &str = "comment";

/// Parses an export file's text into a tree.
///
/// Exports may start with a DOCTYPE, so DTDs are allowed.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

pub trait IssueExtractor {
    /// One issue per `item` element, in document order.
    fn extract_issues(&self, missing_resolution: MissingResolution) -> Result<Vec<Issue>>;
}

impl IssueExtractor for Document<'_> {
    fn extract_issues(&self, missing_resolution: MissingResolution) -> Result<Vec<Issue>> {
        self.descendants()
            .filter(|node| node.has_tag_name(ITEM_TAG))
            .enumerate()
            .map(|(index, item)| -> Result<Issue> {
                let record = RecordRef::new(
                    index + 1,
                    child_text(item, "key"),
                    self.text_pos_at(item.range().start).row,
                );
                let issue = issue_from_item(item, &record, missing_resolution)?;
                tracing::debug!(
                    %record,
                    comments = issue.comment_count,
                    authors = issue.authors,
                    "extracted issue"
                );
                Ok(issue)
            })
            .collect()
    }
}

fn issue_from_item(
    item: Node<'_, '_>,
    record: &RecordRef,
    missing_resolution: MissingResolution,
) -> Result<Issue> {
    let project = child(item, "project").ok_or_else(|| malformed(record, "project"))?;
    let project_id = project
        .attribute("id")
        .ok_or_else(|| malformed(record, "project@id"))?;

    let resolution_id = match child(item, "resolution").and_then(|node| node.attribute("id")) {
        Some(id) => id.to_string(),
        None if missing_resolution == MissingResolution::Empty => String::new(),
        None => return Err(malformed(record, "resolution@id")),
    };

    let created = child(item, "created").ok_or_else(|| malformed(record, "created"))?;
    let date_submitted = date_field(&text_content(created), "created", record)?;
    let date_resolved = match child(item, "resolved").map(text_content) {
        Some(text) if !text.trim().is_empty() => Some(date_field(&text, "resolved", record)?),
        _ => None,
    };

    let comments = child(item, "comments")
        .map(|comments| {
            comments
                .descendants()
                .filter(|node| node.has_tag_name(COMMENT_TAG))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let authors = comments
        .iter()
        .filter_map(|comment| comment.attribute("author"))
        .unique()
        .count();

    Ok(Issue {
        id: record.key.clone(),
        title: child_text(item, "title"),
        link: child_text(item, "link"),
        description_length: plain_text_length(&child_text(item, "description")),
        project_id: project_id.to_string(),
        project_name: text_content(project),
        date_submitted,
        date_resolved,
        kind: child_text(item, "type"),
        status: child_text(item, "status"),
        resolution_id,
        priority: child_text(item, "priority"),
        votes: child_text(item, "votes"),
        assignee: child_text(item, "assignee"),
        reporter: child_text(item, "reporter"),
        watches: child_text(item, "watches"),
        authors,
        comment_count: comments.len(),
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

// All descendant text, CDATA included.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect()
}

fn child_text(node: Node<'_, '_>, name: &str) -> String {
    child(node, name).map(text_content).unwrap_or_default()
}

fn date_field(
    text: &str,
    field: &'static str,
    record: &RecordRef,
) -> Result<DateTime<FixedOffset>> {
    parse_date(text).ok_or_else(|| ConvertError::DateParse {
        record: record.clone(),
        field,
        value: text.to_string(),
    })
}

fn malformed(record: &RecordRef, field: &'static str) -> ConvertError {
    ConvertError::MalformedInput {
        record: record.clone(),
        field,
    }
}
