use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// One tracked work item pulled out of an export `item` node.
///
/// Field order is the column order of the issue table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description_length: usize,
    pub project_id: String,
    pub project_name: String,
    #[serde(serialize_with = "timestamp")]
    pub date_submitted: DateTime<FixedOffset>,
    #[serde(serialize_with = "optional_timestamp")]
    pub date_resolved: Option<DateTime<FixedOffset>>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub resolution_id: String,
    pub priority: String,
    pub votes: String,
    pub assignee: String,
    pub reporter: String,
    pub watches: String,
    pub authors: usize,
    pub comment_count: usize,
}

impl Issue {
    pub const CSV_HEADERS: [&'static str; 18] = [
        "id",
        "title",
        "link",
        "description_length",
        "project_id",
        "project_name",
        "date_submitted",
        "date_resolved",
        "type",
        "status",
        "resolution_id",
        "priority",
        "votes",
        "assignee",
        "reporter",
        "watches",
        "authors",
        "comment_count",
    ];
}

fn timestamp<S: Serializer>(
    datetime: &DateTime<FixedOffset>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&datetime.to_rfc3339())
}

fn optional_timestamp<S: Serializer>(
    datetime: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match datetime {
        Some(datetime) => timestamp(datetime, serializer),
        None => serializer.serialize_str(""),
    }
}
