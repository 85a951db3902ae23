use serde::Serialize;

pub const FIXED_RESOLUTION: &str = "1";
pub const WONT_FIX_RESOLUTION: &str = "2";

/// Issue counts for one reporter.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ReporterSummary {
    pub reporter: String,
    pub total_issues: usize,
    pub fixed_count: usize,
    pub wont_fix_count: usize,
}

impl ReporterSummary {
    pub const CSV_HEADERS: [&'static str; 4] = ["Name", "Issues", "Fixed", "Won't Fix"];

    pub fn new(
        reporter: impl ToString,
        total_issues: usize,
        fixed_count: usize,
        wont_fix_count: usize,
    ) -> Self {
        Self {
            reporter: reporter.to_string(),
            total_issues,
            fixed_count,
            wont_fix_count,
        }
    }

    pub fn empty(reporter: impl ToString) -> Self {
        Self::new(reporter, 0, 0, 0)
    }

    pub fn count(&mut self, resolution_id: &str) {
        self.total_issues += 1;
        match resolution_id {
            FIXED_RESOLUTION => self.fixed_count += 1,
            WONT_FIX_RESOLUTION => self.wont_fix_count += 1,
            _ => {}
        }
    }
}
