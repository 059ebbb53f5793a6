//! CLI command implementations.

use std::io::Write;
use std::path::Path;

use crate::config::TallyConfig;
use crate::engine::{LoadReport, SearchEngine};
use crate::format::{parse_date_prefix, parse_timestamp, DatasetReader, MmapDataset};
use crate::types::{TallyError, TallyResult};

/// Load a dataset file into a fresh engine, honoring the load config.
pub fn load_engine(path: &Path, config: &TallyConfig) -> TallyResult<(SearchEngine, LoadReport)> {
    let mut engine = SearchEngine::new();
    let report = if config.load.use_mmap {
        let dataset = MmapDataset::open(path)?;
        log::debug!("Mapped {} ({} bytes)", path.display(), dataset.len());
        engine.load_records(dataset.records(), &config.load)?
    } else {
        engine.load_records(DatasetReader::open(path)?, &config.load)?
    };
    log::info!(
        "Loaded {} records from {} ({} skipped)",
        report.inserted,
        path.display(),
        report.skipped
    );
    Ok((engine, report))
}

/// Count all values logged under a date prefix.
pub fn cmd_count(
    out: &mut impl Write,
    path: &Path,
    prefix: &str,
    config: &TallyConfig,
    json: bool,
) -> TallyResult<()> {
    let interval = parse_date_prefix(prefix)?;
    log::debug!("Date prefix {:?} -> {}", prefix, interval);
    let (engine, _) = load_engine(path, config)?;
    let count = engine.occurrence_count(&interval);

    if json {
        writeln!(out, "{}", serde_json::json!({ "count": count }))?;
    } else {
        writeln!(out, "{}", count)?;
    }
    Ok(())
}

/// Rank the most frequent values logged under a date prefix.
pub fn cmd_popular(
    out: &mut impl Write,
    path: &Path,
    prefix: &str,
    size: Option<usize>,
    config: &TallyConfig,
    json: bool,
) -> TallyResult<()> {
    let size = size.unwrap_or(config.query.default_popular_size);
    if size == 0 {
        return Err(TallyError::InvalidSize(size));
    }
    let interval = parse_date_prefix(prefix)?;
    log::debug!("Date prefix {:?} -> {}, size {}", prefix, interval, size);
    let (engine, _) = load_engine(path, config)?;
    let popular = engine.popular(&interval, size);

    if json {
        let queries: Vec<serde_json::Value> = popular
            .iter()
            .map(|(query, count)| serde_json::json!({ "query": query, "count": count }))
            .collect();
        writeln!(out, "{}", serde_json::json!({ "queries": queries }))?;
    } else {
        for (query, count) in &popular {
            writeln!(out, "{:>8}  {}", count, query)?;
        }
    }
    Ok(())
}

/// Show the values logged at exactly one minute.
pub fn cmd_lookup(
    out: &mut impl Write,
    path: &Path,
    timestamp: &str,
    config: &TallyConfig,
    json: bool,
) -> TallyResult<()> {
    let timestamp = parse_timestamp(timestamp)?;
    let (engine, _) = load_engine(path, config)?;
    let values = engine.lookup(timestamp);

    if json {
        let info = serde_json::json!({
            "timestamp": timestamp.to_string(),
            "values": values,
        });
        writeln!(out, "{}", info)?;
    } else {
        for value in values {
            writeln!(out, "{}", value)?;
        }
    }
    Ok(())
}

/// Summarize a dataset: record count, years spanned, first and last minute.
pub fn cmd_stats(
    out: &mut impl Write,
    path: &Path,
    config: &TallyConfig,
    json: bool,
) -> TallyResult<()> {
    let (engine, report) = load_engine(path, config)?;
    let tree = engine.tree();
    let first = tree.first_minute().map(|ts| ts.to_string());
    let last = tree.last_minute().map(|ts| ts.to_string());

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "records": tree.len(),
            "skipped": report.skipped,
            "years": tree.year_count(),
            "first_minute": first,
            "last_minute": last,
        });
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        )?;
    } else {
        writeln!(out, "File: {}", path.display())?;
        writeln!(out, "Records: {}", tree.len())?;
        writeln!(out, "Skipped lines: {}", report.skipped)?;
        writeln!(out, "Years: {}", tree.year_count())?;
        writeln!(out, "First minute: {}", first.as_deref().unwrap_or("-"))?;
        writeln!(out, "Last minute: {}", last.as_deref().unwrap_or("-"))?;
    }
    Ok(())
}
