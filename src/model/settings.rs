use crate::model::{ConvertError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::{from_str, Value};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_OUTPUT_DIR: &str = "./output/";
const DEFAULT_TIMESTAMP_FORMAT: &str = "%H%M%S%d%m%Y";
const DEFAULT_ISSUES_PREFIX: &str = "issues";
const DEFAULT_REPORTERS_PREFIX: &str = "reporters";

/// What to do with an item that carries no resolution id.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MissingResolution {
    /// Abort the run with a malformed-input error.
    #[default]
    Reject,
    /// Record an empty resolution id.
    Empty,
}

impl FromStr for MissingResolution {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(Self::Reject),
            "empty" => Ok(Self::Empty),
            other => Err(ConvertError::Config(format!(
                "'missingResolution' must be \"reject\" or \"empty\", got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OutputNaming {
    pub issues_prefix: String,
    pub reporters_prefix: String,
    pub timestamp_format: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            issues_prefix: DEFAULT_ISSUES_PREFIX.to_string(),
            reporters_prefix: DEFAULT_REPORTERS_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl OutputNaming {
    /// Issue and reporter file names for one generation time.
    ///
    /// Both names must stay plain file names inside the output directory.
    pub fn file_names<Tz>(&self, generated_at: &DateTime<Tz>) -> Result<(String, String)>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let stamp = generated_at.format(&self.timestamp_format).to_string();
        let issues = format!("{}_{stamp}.csv", self.issues_prefix);
        let reporters = format!("{}_{stamp}.csv", self.reporters_prefix);
        for name in [&issues, &reporters] {
            if !is_plain_file_name(name) {
                return Err(ConvertError::Config(format!(
                    "'timestampFormat' {:?} produces {name:?}, which is not a plain file name",
                    self.timestamp_format
                )));
            }
        }
        Ok((issues, reporters))
    }

    fn validate(&self) -> Result<()> {
        for (name, prefix) in [
            ("issuesPrefix", &self.issues_prefix),
            ("reportersPrefix", &self.reporters_prefix),
        ] {
            if prefix.is_empty() || prefix.contains(['/', '\\']) {
                return Err(ConvertError::Config(format!(
                    "'{name}' must be a non-empty file name prefix, got {prefix:?}"
                )));
            }
        }
        if self.issues_prefix == self.reporters_prefix {
            return Err(ConvertError::Config(
                "'issuesPrefix' and 'reportersPrefix' must differ".into(),
            ));
        }
        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format).any(|item| item == Item::Error)
        {
            return Err(ConvertError::Config(format!(
                "'timestampFormat' is not a valid strftime pattern: {:?}",
                self.timestamp_format
            )));
        }
        // Every field of the sample has two digits or more, so separators
        // produced by any specifier show up here.
        let sample = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).single();
        if let Some(sample) = sample {
            self.file_names(&sample)?;
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub naming: OutputNaming,
    pub missing_resolution: MissingResolution,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            naming: OutputNaming::default(),
            missing_resolution: MissingResolution::default(),
        }
    }
}

// Create
impl Settings {
    pub fn from_config(path: &Path) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }

    /// Command-line flags win over the settings file.
    pub fn with_overrides(
        mut self,
        output_dir: Option<PathBuf>,
        allow_missing_resolution: bool,
    ) -> Self {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        if allow_missing_resolution {
            self.missing_resolution = MissingResolution::Empty;
        }
        self
    }
}

// Parser
impl Settings {
    fn parse(json_str: &str) -> Result<Self> {
        let elements: IndexMap<String, Value> = from_str(json_str)?;
        let mut settings = Self::default();
        for (name, value) in &elements {
            let Some(value) = value.as_str() else {
                return Err(ConvertError::Config(format!(
                    "'{name}' must be a string"
                )));
            };
            match name.as_str() {
                "outputDir" => settings.output_dir = PathBuf::from(value),
                "timestampFormat" => settings.naming.timestamp_format = value.to_string(),
                "issuesPrefix" => settings.naming.issues_prefix = value.to_string(),
                "reportersPrefix" => settings.naming.reporters_prefix = value.to_string(),
                "missingResolution" => settings.missing_resolution = value.parse()?,
                _ => {
                    return Err(ConvertError::Config(format!("Unknown setting '{name}'")));
                }
            }
        }
        settings.naming.validate()?;
        Ok(settings)
    }
}
