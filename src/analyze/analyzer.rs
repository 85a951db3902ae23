use crate::analyze::ReporterSummary;
use crate::model::Issue;
use indexmap::IndexMap;

pub trait ReporterAggregator {
    /// One row per distinct reporter, in order of first appearance.
    fn summarize(&self) -> Vec<ReporterSummary>;
}

impl ReporterAggregator for [Issue] {
    fn summarize(&self) -> Vec<ReporterSummary> {
        let mut by_reporter: IndexMap<&str, ReporterSummary> = IndexMap::new();
        for issue in self {
            by_reporter
                .entry(issue.reporter.as_str())
                .or_insert_with(|| ReporterSummary::empty(&issue.reporter))
                .count(&issue.resolution_id);
        }
        tracing::debug!(reporters = by_reporter.len(), issues = self.len(), "summarized reporters");
        by_reporter.into_values().collect()
    }
}
