use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Result, SyncError};

/// Prompt identity: the path below the prompts root, `/`-separated, without
/// its extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RelativeKey(String);

impl RelativeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn config_path(&self, env_root: &Path, extension: &str) -> PathBuf {
        let mut path = env_root.to_path_buf();
        let mut segments = self.0.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}{extension}"));
            }
        }
        path
    }

    pub fn legacy_config_path(&self, env_root: &Path, extension: &str) -> PathBuf {
        env_root.join(format!("{}{extension}", self.basename()))
    }
}

impl fmt::Display for RelativeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFile {
    pub key: RelativeKey,
    pub path: PathBuf,
}

pub fn collect_prompts(root: &Path, suffix: &str) -> Result<Vec<PromptFile>> {
    let prompts = collect_files(root, suffix)?
        .into_iter()
        .filter_map(|path| match relative_key(root, &path, suffix) {
            Some(key) => Some(PromptFile { key, path }),
            None => {
                warn!(
                    "Skipping {}: no prompt key (name is not valid UTF-8 or has an empty stem).",
                    path.display()
                );
                None
            }
        })
        .collect();
    Ok(prompts)
}

pub fn collect_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| SyncError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn relative_key(root: &Path, path: &Path, suffix: &str) -> Option<RelativeKey> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    let joined = segments.join("/");
    let key = strip_suffix_ignore_case(&joined, suffix).unwrap_or(&joined);
    if key.is_empty() {
        return None;
    }
    Some(RelativeKey(key.to_string()))
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split_at = text.len().checked_sub(suffix.len())?;
    let tail = text.get(split_at..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        text.get(..split_at)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../tests/unit/collector_tests.rs"]
mod tests;
