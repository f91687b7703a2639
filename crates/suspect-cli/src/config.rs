use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use suspect_checker::{AnalyzerOptions, PatternCatalog, PatternShape};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "suspect.json";

/// Accepts both `true` and `"true"` (and `"yes"`, `"on"`, `"1"`, …).
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuspectConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub report_convertible_method_calls: Option<bool>,
    /// Replaces the built-in catalog when present.
    #[serde(default)]
    pub patterns: Option<Vec<PatternEntry>>,
}

/// A catalog row as written in `suspect.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatternEntry {
    pub abstraction: String,
    pub method: String,
    #[serde(default)]
    pub checked_param: usize,
    /// Collection type of a bulk removal's parameter; absent for lookups.
    #[serde(default)]
    pub collection: Option<String>,
}

impl PatternEntry {
    pub fn to_shape(&self) -> PatternShape {
        match &self.collection {
            Some(collection) => {
                PatternShape::bulk_removal(&self.abstraction, &self.method, collection, self.checked_param)
            }
            None => PatternShape::lookup(&self.abstraction, &self.method, self.checked_param),
        }
    }
}

/// Effective settings after `extends` merging and CLI overrides.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: AnalyzerOptions,
    pub catalog: PatternCatalog,
    /// The file the settings came from; `None` when defaults were used.
    pub source: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            options: AnalyzerOptions::default(),
            catalog: PatternCatalog::default(),
            source: None,
        }
    }
}

pub fn resolve_config(config: &SuspectConfig, source: Option<PathBuf>) -> ResolvedConfig {
    let mut options = AnalyzerOptions::default();
    if let Some(report) = config.report_convertible_method_calls {
        options.report_convertible = report;
    }
    let catalog = match &config.patterns {
        Some(entries) => PatternCatalog::custom(entries.iter().map(PatternEntry::to_shape).collect()),
        None => PatternCatalog::default(),
    };
    ResolvedConfig {
        options,
        catalog,
        source,
    }
}

/// `explicit`, else the nearest `suspect.json` at or above `cwd`, else defaults.
pub fn load_resolved(explicit: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            if path.is_dir() {
                path.join(CONFIG_FILE_NAME)
            } else {
                path
            }
        }
        None => match find_config(cwd) {
            Some(path) => path,
            None => {
                debug!(cwd = %cwd.display(), "no suspect.json found, using defaults");
                return Ok(ResolvedConfig::default());
            }
        },
    };

    let config = load_config(&path)?;
    Ok(resolve_config(&config, Some(path)))
}

/// Nearest `suspect.json` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn parse_config(source: &str) -> Result<SuspectConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    let config = serde_json::from_str(&normalized).context("failed to parse suspect.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SuspectConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<SuspectConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config =
        parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends_path) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends_path)?;
        let base_config = load_config_inner(&base_path, visited)?;
        config = merge_configs(base_config, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: SuspectConfig, child: SuspectConfig) -> SuspectConfig {
    SuspectConfig {
        extends: None,
        report_convertible_method_calls: child
            .report_convertible_method_calls
            .or(base.report_convertible_method_calls),
        patterns: child.patterns.or(base.patterns),
    }
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' {
                if let Some('/') = chars.peek().copied() {
                    chars.next();
                    in_block_comment = false;
                }
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
