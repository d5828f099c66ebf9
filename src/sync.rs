use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::agent_config::AgentConfig;
use crate::artifact_io::{read_text_file, write_json_file};
use crate::collector::{PromptFile, RelativeKey, collect_prompts};
use crate::error::{Result, SyncError};
use crate::prompt_text::{extract_prompt_text, preview};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub prompts_dir: PathBuf,
    pub configs_dir: PathBuf,
    pub environments: Vec<Environment>,
    pub prompt_extension: String,
    pub config_extension: String,
    pub preview_chars: usize,
}

impl SyncOptions {
    pub fn environment_root(&self, environment: &Environment) -> PathBuf {
        self.configs_dir.join(environment.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Direct(PathBuf),
    LegacyFlat(PathBuf),
    NotFound { expected: PathBuf },
}

/// Mirrored relative path first, then `<basename><extension>` at the top of
/// the environment root. Basename collisions are not detected.
pub fn resolve_config_target(env_root: &Path, key: &RelativeKey, extension: &str) -> Resolution {
    let expected = key.config_path(env_root, extension);
    if expected.is_file() {
        return Resolution::Direct(expected);
    }
    let legacy = key.legacy_config_path(env_root, extension);
    if legacy.is_file() {
        return Resolution::LegacyFlat(legacy);
    }
    Resolution::NotFound { expected }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    ConfigNotFound { expected: PathBuf },
    UnexpectedStructure { target: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Updated {
        target: PathBuf,
        legacy_match: bool,
        changed: bool,
        old_preview: String,
        new_preview: String,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        target: PathBuf,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub environment: Environment,
    pub prompt: RelativeKey,
    pub outcome: PairOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptFailure {
    pub prompt: RelativeKey,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub prompts_dir_missing: bool,
    pub prompt_count: usize,
    pub unreadable_prompts: Vec<PromptFailure>,
    pub skipped_environments: Vec<Environment>,
    pub pairs: Vec<PairReport>,
}

impl SyncReport {
    pub fn updated_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, PairOutcome::Updated { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, PairOutcome::Skipped { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.unreadable_prompts.len()
            + self.count(|outcome| matches!(outcome, PairOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&PairOutcome) -> bool) -> usize {
        self.pairs.iter().filter(|pair| predicate(&pair.outcome)).count()
    }
}

#[derive(Debug)]
struct LoadedPrompt {
    key: RelativeKey,
    text: String,
}

#[derive(Debug)]
struct PromptChange {
    changed: bool,
    old_text: String,
}

/// Runs one synchronization pass. Only a failure to list the prompts root is
/// returned as an error; every (prompt, environment) pair is recorded in the
/// report instead.
pub fn run_sync(options: &SyncOptions) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    if !options.prompts_dir.is_dir() {
        info!(
            "No prompts directory found at {}, skipping prompt processing.",
            options.prompts_dir.display()
        );
        report.prompts_dir_missing = true;
        return Ok(report);
    }

    let prompts = collect_prompts(&options.prompts_dir, &options.prompt_extension)?;
    report.prompt_count = prompts.len();
    if prompts.is_empty() {
        info!(
            "No {} files found in {}.",
            options.prompt_extension,
            options.prompts_dir.display()
        );
        return Ok(report);
    }

    info!("Processing {} prompt files...", prompts.len());
    let prompts = load_prompts(prompts, &mut report);

    for environment in &options.environments {
        let env_root = options.environment_root(environment);
        if !env_root.is_dir() {
            info!("Environment directory {environment} doesn't exist, skipping.");
            report.skipped_environments.push(environment.clone());
            continue;
        }

        for prompt in &prompts {
            let outcome = sync_pair(options, environment, &env_root, prompt);
            report.pairs.push(PairReport {
                environment: environment.clone(),
                prompt: prompt.key.clone(),
                outcome,
            });
        }
    }

    info!("Prompt processing complete!");
    info!(
        "Updated {}, skipped {}, failed {}.",
        report.updated_count(),
        report.skipped_count(),
        report.failed_count()
    );
    Ok(report)
}

/// Reads and extracts every prompt once; unreadable prompts are reported a
/// single time and left out of the per-environment pass.
fn load_prompts(prompts: Vec<PromptFile>, report: &mut SyncReport) -> Vec<LoadedPrompt> {
    let mut loaded = Vec::with_capacity(prompts.len());
    for PromptFile { key, path } in prompts {
        match read_text_file(&path) {
            Ok(markdown) => loaded.push(LoadedPrompt {
                text: extract_prompt_text(&markdown),
                key,
            }),
            Err(err) => {
                let err = SyncError::read(&path, err);
                error!("Error reading prompt {key}: {err}");
                report.unreadable_prompts.push(PromptFailure {
                    prompt: key,
                    error: err.to_string(),
                });
            }
        }
    }
    loaded
}

fn sync_pair(
    options: &SyncOptions,
    environment: &Environment,
    env_root: &Path,
    prompt: &LoadedPrompt,
) -> PairOutcome {
    let key = &prompt.key;
    let (target, legacy_match) =
        match resolve_config_target(env_root, key, &options.config_extension) {
            Resolution::Direct(path) => (path, false),
            Resolution::LegacyFlat(path) => {
                info!(
                    "Using legacy flat match for {key} -> {} in {environment}",
                    display_relative(env_root, &path)
                );
                (path, true)
            }
            Resolution::NotFound { expected } => {
                info!(
                    "Config not found for {key} in {environment} (expected {}), skipping.",
                    display_relative(env_root, &expected)
                );
                return PairOutcome::Skipped {
                    reason: SkipReason::ConfigNotFound { expected },
                };
            }
        };

    match update_config_prompt(&target, &prompt.text) {
        Ok(Some(change)) => {
            let old_preview = preview(&change.old_text, options.preview_chars);
            let new_preview = preview(&prompt.text, options.preview_chars);
            if change.changed {
                info!("Updated prompt for {key} in {environment}");
            } else {
                info!("Prompt for {key} in {environment} already up to date, rewrote config");
            }
            info!("   Old: {old_preview}");
            info!("   New: {new_preview}");
            PairOutcome::Updated {
                target,
                legacy_match,
                changed: change.changed,
                old_preview,
                new_preview,
            }
        }
        Ok(None) => {
            warn!("Config structure unexpected for {key} in {environment}, skipping.");
            PairOutcome::Skipped {
                reason: SkipReason::UnexpectedStructure { target },
            }
        }
        Err(err) => {
            error!("Error processing {key} in {environment}: {err}");
            PairOutcome::Failed {
                target,
                error: err.to_string(),
            }
        }
    }
}

fn update_config_prompt(config_path: &Path, new_text: &str) -> Result<Option<PromptChange>> {
    let raw = read_text_file(config_path).map_err(|err| SyncError::read(config_path, err))?;
    let mut config = AgentConfig::from_json_str(&raw).map_err(|source| SyncError::Json {
        path: config_path.to_path_buf(),
        source,
    })?;

    let changed = config.prompt() != Some(new_text);
    let Some(old_text) = config.replace_prompt(new_text) else {
        return Ok(None);
    };
    write_json_file(config_path, config.document())
        .map_err(|err| SyncError::write(config_path, err))?;
    Ok(Some(PromptChange { changed, old_text }))
}

fn display_relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
#[path = "../tests/unit/sync_tests.rs"]
mod tests;
