use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::artifact_io::read_text_file;
use crate::error::{Result, SyncError};
use crate::prompt_text::DEFAULT_PREVIEW_CHARS;
use crate::sync::{Environment, SyncOptions};

pub const DEFAULT_SETTINGS_FILE: &str = "prompt-sync.toml";
pub const DEFAULT_ENVIRONMENTS: [&str; 3] = ["prod", "dev", "staging"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSettings {
    pub prompts_dir: PathBuf,
    pub configs_dir: PathBuf,
    pub environments: Vec<String>,
    pub prompt_extension: String,
    pub config_extension: String,
    pub preview_chars: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            prompts_dir: PathBuf::from("agent_prompts"),
            configs_dir: PathBuf::from("agent_configs"),
            environments: DEFAULT_ENVIRONMENTS.iter().map(|name| name.to_string()).collect(),
            prompt_extension: ".md".to_string(),
            config_extension: ".json".to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl SyncSettings {
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Loads settings from `path`. A missing file yields defaults unless
    /// `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match read_text_file(path) {
            Ok(contents) => Self::from_toml_str(&contents).map_err(|source| SyncError::Settings {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(err) => Err(SyncError::read(path, err)),
        }
    }

    pub fn into_options(self, root: &Path) -> SyncOptions {
        SyncOptions {
            prompts_dir: root.join(self.prompts_dir),
            configs_dir: root.join(self.configs_dir),
            environments: self.environments.into_iter().map(Environment::new).collect(),
            prompt_extension: self.prompt_extension,
            config_extension: self.config_extension,
            preview_chars: self.preview_chars,
        }
    }
}
