//! CLI output formatting module

use serde::Serialize;
use std::io::{self, Write};
use usersearch_core::{Result, SearchError, SearchResult, UserRecord};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" => Ok(Self::Pretty),
            _ => Err(SearchError::invalid_config(format!(
                "Invalid output format: {}. Valid formats: json, yaml, pretty",
                s
            ))),
        }
    }
}

/// Serializable view of a search result
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub users: &'a [UserRecord],
    pub has_next_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<'a> From<&'a SearchResult> for SearchOutput<'a> {
    fn from(result: &'a SearchResult) -> Self {
        Self {
            users: &result.users,
            has_next_page: result.has_next_page,
            total: result.total,
        }
    }
}

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Create a formatter writing to stdout
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, io::stdout())
    }

    /// Create a formatter with custom writer
    pub fn with_writer<W: Write + Send + 'static>(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer: Box::new(writer),
        }
    }

    /// Write a search result in the configured format
    pub fn search_result(&mut self, result: &SearchResult) -> Result<()> {
        let output = SearchOutput::from(result);
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&output)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&output)?;
                write!(self.writer, "{}", yaml)?;
            }
            OutputFormat::Pretty => self.pretty_users(result)?,
        }
        self.writer.flush()?;
        Ok(())
    }

    fn pretty_users(&mut self, result: &SearchResult) -> Result<()> {
        let name_width = result
            .users
            .iter()
            .map(|u| u.name.len())
            .max()
            .unwrap_or(0)
            .max(4);

        writeln!(
            self.writer,
            "{:>4}  {:<width$}  {:>3}  GENDER",
            "ID",
            "NAME",
            "AGE",
            width = name_width
        )?;
        for user in &result.users {
            writeln!(
                self.writer,
                "{:>4}  {:<width$}  {:>3}  {}",
                user.id,
                user.name,
                user.age,
                user.gender,
                width = name_width
            )?;
        }

        let count = result.users.len();
        let mut summary = format!("{} user{}", count, if count == 1 { "" } else { "s" });
        if let Some(total) = result.total {
            summary.push_str(&format!(" of {}", total));
        }
        if result.has_next_page {
            summary.push_str(", more available");
        }
        writeln!(self.writer, "{}", summary)?;
        Ok(())
    }
}
