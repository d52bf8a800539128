use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use jiff::{Zoned, tz::TimeZone};
use log::Record;
use logforth::{
    DropGuard,
    append::single_file::{SingleFile, SingleFileBuilder},
    diagnostic::Diagnostic,
    layout::{JsonLayout, Layout},
};

use crate::args::{Args, LogStyle};

#[derive(Debug, Clone)]
struct TextLayout;

impl Layout for TextLayout {
    fn format(&self, record: &Record<'_>, _diagnostics: &[Box<dyn Diagnostic>]) -> anyhow::Result<Vec<u8>> {
        let mut output = String::new();
        let now = Zoned::now().with_time_zone(TimeZone::UTC);

        write!(output, "{} ", now.strftime("%Y-%m-%dT%H:%M:%S%.6fZ"))?;
        write!(output, "{:>5}  ", record.level())?;
        write!(output, "{}", record.args())?;

        Ok(output.into_bytes())
    }
}

/// Opens the log file in append mode, creating its directory when missing.
///
/// Records are written by a background worker until the guard is dropped.
fn file_append(path: &Path, style: LogStyle) -> anyhow::Result<(SingleFile, DropGuard)> {
    let builder = SingleFileBuilder::new(path).thread_name("mercury-log");

    let builder = match style {
        LogStyle::Text => builder.layout(TextLayout),
        LogStyle::Json => builder.layout(JsonLayout::default()),
    };

    builder
        .build()
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Opens the log file and installs the global logger.
///
/// Fails when the log directory or file cannot be created. Nothing is ever logged to
/// stdout, which carries the MCP stream. Keep the returned guard alive while serving.
pub(super) fn init(args: &Args, path: Option<PathBuf>) -> anyhow::Result<(PathBuf, DropGuard)> {
    let path = path.ok_or_else(|| anyhow!("Cannot resolve a home directory for the log file, pass --log-file"))?;
    let (append, guard) = file_append(&path, args.log_style)?;

    logforth::builder()
        .dispatch(|d| d.filter(args.log_level.env_filter()).append(append))
        .apply();

    Ok((path, guard))
}
