use crate::analyze::ReporterSummary;
use crate::model::{ConvertError, Issue, OutputNaming, Result};
use chrono::{DateTime, TimeZone};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WrittenReport {
    pub issues_path: PathBuf,
    pub reporters_path: PathBuf,
}

/// Writes the issue and reporter tables into one output directory.
///
/// Both tables are staged as temporary files next to their destination and
/// only renamed into place once both are complete, so a failed run leaves
/// neither file behind. Existing files are never overwritten.
pub struct CsvReport {
    output_dir: PathBuf,
    naming: OutputNaming,
}

impl CsvReport {
    pub fn new(output_dir: impl Into<PathBuf>, naming: OutputNaming) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming,
        }
    }

    pub fn write<Tz>(
        &self,
        issues: &[Issue],
        reporters: &[ReporterSummary],
        generated_at: &DateTime<Tz>,
    ) -> Result<WrittenReport>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (issues_name, reporters_name) = self.naming.file_names(generated_at)?;
        let issues_path = self.output_dir.join(issues_name);
        let reporters_path = self.output_dir.join(reporters_name);

        let staged_issues = self.stage(&Issue::CSV_HEADERS, issues)?;
        let staged_reporters = self.stage(&ReporterSummary::CSV_HEADERS, reporters)?;

        persist(staged_issues, &issues_path)?;
        if let Err(err) = persist(staged_reporters, &reporters_path) {
            if let Err(cleanup) = fs::remove_file(&issues_path) {
                tracing::warn!(
                    path = %issues_path.display(),
                    error = %cleanup,
                    "could not remove issue table after failed write"
                );
            }
            return Err(err);
        }

        tracing::info!(
            issues = issues.len(),
            reporters = reporters.len(),
            dir = %self.output_dir.display(),
            "wrote tables"
        );
        Ok(WrittenReport {
            issues_path,
            reporters_path,
        })
    }

    fn stage<R: Serialize>(&self, headers: &[&str], rows: &[R]) -> Result<NamedTempFile> {
        let mut staged =
            NamedTempFile::new_in(&self.output_dir).map_err(|source| ConvertError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut staged);
            writer.write_record(headers)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        Ok(staged)
    }
}

fn persist(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged
        .persist_noclobber(path)
        .map_err(|err| match err.error.kind() {
            ErrorKind::AlreadyExists => ConvertError::OutputExists {
                path: path.to_path_buf(),
            },
            _ => ConvertError::Io(err.error),
        })?;
    Ok(())
}
