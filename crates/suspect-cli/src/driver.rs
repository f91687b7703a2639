//! Snapshot discovery and per-file analysis.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use suspect_checker::AnalysisSession;
use suspect_common::Diagnostic;
use suspect_model::SearchScope;
use tracing::{debug, info, info_span};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::{ResolvedConfig, load_resolved};
use crate::snapshot::Snapshot;

pub const SNAPSHOT_SUFFIX: &str = ".snapshot.json";

/// Outcome of one run over all inputs.
#[derive(Debug, Default)]
pub struct RunResult {
    pub diagnostics: Vec<Diagnostic>,
    pub files_analyzed: usize,
    /// Snapshots in which the container library is not in use.
    pub files_skipped: usize,
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let mut config = load_resolved(args.config.as_deref(), cwd)?;
    if let Some(report) = args.report_convertible {
        config.options.report_convertible = report;
    }
    if let Some(source) = &config.source {
        debug!(config = %source.display(), "using config");
    }

    let inputs = collect_inputs(&args.inputs, cwd)?;
    analyze_files(&inputs, &config)
}

pub fn analyze_files(inputs: &[PathBuf], config: &ResolvedConfig) -> Result<RunResult> {
    let mut result = RunResult::default();
    for path in inputs {
        match analyze_file(path, config)? {
            Some(mut diagnostics) => {
                result.files_analyzed += 1;
                result.diagnostics.append(&mut diagnostics);
            }
            None => result.files_skipped += 1,
        }
    }
    info!(
        analyzed = result.files_analyzed,
        skipped = result.files_skipped,
        findings = result.diagnostics.len(),
        "run finished"
    );
    Ok(result)
}

/// Findings for one snapshot, or `None` when it does not use the library.
pub fn analyze_file(path: &Path, config: &ResolvedConfig) -> Result<Option<Vec<Diagnostic>>> {
    let _span = info_span!("analyze_file", path = %path.display()).entered();

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    let snapshot = Snapshot::from_json(&source)
        .with_context(|| format!("failed to parse snapshot: {}", path.display()))?;
    let loaded = snapshot
        .load(&path.display().to_string())
        .with_context(|| format!("failed to load snapshot: {}", path.display()))?;

    if !config.catalog.is_in_use(&loaded.model, SearchScope::All) {
        debug!("container library not in use, skipping");
        return Ok(None);
    }

    let session = AnalysisSession::with_catalog(config.catalog.clone(), SearchScope::All, config.options);
    let findings = session.analyze_calls(&loaded.model, &loaded.calls);
    debug!(calls = loaded.calls.len(), findings = findings.len(), "analyzed");
    Ok(Some(findings.iter().map(|finding| finding.to_diagnostic()).collect()))
}

/// Expand inputs: files are taken as given, directories are walked for
/// `*.snapshot.json`. The result is sorted and free of duplicates.
pub fn collect_inputs(inputs: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = if input.is_absolute() {
            input.clone()
        } else {
            cwd.join(input)
        };
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            for entry in WalkDir::new(&path).follow_links(true) {
                let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_snapshot(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_snapshot(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(SNAPSHOT_SUFFIX))
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
