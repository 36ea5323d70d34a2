//! Configuration module for dockhand
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DOCKHAND_*)
//! 3. Project config (./dockhand.toml)
//! 4. User config (~/.config/dockhand/config.toml)
//! 5. Built-in defaults (lowest priority)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DockhandError, DockhandResult};

/// Remote host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// SSH destination, e.g. "deploy@prod-1"
    #[serde(default = "default_host")]
    pub host: String,

    /// Remote directory receiving image archives
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// Remote directory holding the compose file
    #[serde(default = "default_stack_dir")]
    pub stack_dir: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            image_dir: default_image_dir(),
            stack_dir: default_stack_dir(),
        }
    }
}

fn default_host() -> String {
    "deploy@prod-1".to_string()
}

fn default_image_dir() -> String {
    "/srv/deploy/images".to_string()
}

fn default_stack_dir() -> String {
    "/srv/deploy/stack".to_string()
}

/// Local build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Local directory where saved image archives are staged
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
        }
    }
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("images")
}

/// External tool names (overridable for exotic PATHs and for tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_docker")]
    pub docker: String,

    #[serde(default = "default_scp")]
    pub scp: String,

    #[serde(default = "default_ssh")]
    pub ssh: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            docker: default_docker(),
            scp: default_scp(),
            ssh: default_ssh(),
        }
    }
}

fn default_docker() -> String {
    "docker".to_string()
}

fn default_scp() -> String {
    "scp".to_string()
}

fn default_ssh() -> String {
    "ssh".to_string()
}

/// One deployable service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Image tag passed to `docker build -t`
    pub image: String,

    /// Build context directory
    #[serde(default = "default_context")]
    pub context: PathBuf,

    /// Dockerfile path, when it is not `<context>/Dockerfile`
    #[serde(default)]
    pub dockerfile: Option<PathBuf>,

    /// Archive file name; defaults to `<image>.tar`
    #[serde(default)]
    pub archive: Option<String>,
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}

impl ServiceConfig {
    /// File name of the saved image archive
    pub fn archive_name(&self) -> String {
        self.archive
            .clone()
            .unwrap_or_else(|| format!("{}.tar", self.image))
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    // BTreeMap keeps plan order deterministic
    #[serde(default = "default_services")]
    pub services: BTreeMap<String, ServiceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            build: BuildConfig::default(),
            tools: ToolsConfig::default(),
            services: default_services(),
        }
    }
}

fn default_services() -> BTreeMap<String, ServiceConfig> {
    let mut services = BTreeMap::new();
    services.insert(
        "auth".to_string(),
        ServiceConfig {
            image: "app-auth".to_string(),
            context: PathBuf::from("auth"),
            dockerfile: None,
            archive: None,
        },
    );
    services.insert(
        "main".to_string(),
        ServiceConfig {
            image: "app-main".to_string(),
            context: PathBuf::from("."),
            dockerfile: None,
            archive: None,
        },
    );
    services
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DockhandResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DockhandResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| DockhandError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from an explicit path, project config, user config, or defaults
    pub fn load_or_default(
        explicit: Option<&Path>,
    ) -> DockhandResult<(Self, Vec<ConfigWarning>)> {
        if let Some(path) = explicit {
            let (config, warnings) = Self::load_with_warnings(path)?;
            return Ok((config.with_env_overrides(), warnings));
        }

        let project_config = Path::new("dockhand.toml");
        if project_config.exists() {
            let (config, warnings) = Self::load_with_warnings(project_config)?;
            return Ok((config.with_env_overrides(), warnings));
        }

        if let Some(user_config_dir) = dirs_config_dir() {
            let user_config = user_config_dir.join("dockhand/config.toml");
            if user_config.exists() {
                let (config, warnings) = Self::load_with_warnings(&user_config)?;
                return Ok((config.with_env_overrides(), warnings));
            }
        }

        Ok((Self::default().with_env_overrides(), Vec::new()))
    }

    /// Apply environment variable overrides (DOCKHAND_* prefix)
    pub fn with_env_overrides(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    // The lookup is injected so tests can exercise overrides without
    // touching process-global state.
    fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = var("DOCKHAND_HOST") {
            self.remote.host = host;
        }
        if let Some(dir) = var("DOCKHAND_IMAGE_DIR") {
            self.remote.image_dir = dir;
        }
        if let Some(dir) = var("DOCKHAND_STACK_DIR") {
            self.remote.stack_dir = dir;
        }
        if let Some(dir) = var("DOCKHAND_STAGING_DIR") {
            self.build.staging_dir = PathBuf::from(dir);
        }
        if let Some(bin) = var("DOCKHAND_DOCKER") {
            self.tools.docker = bin;
        }
        if let Some(bin) = var("DOCKHAND_SCP") {
            self.tools.scp = bin;
        }
        if let Some(bin) = var("DOCKHAND_SSH") {
            self.tools.ssh = bin;
        }
        self
    }

    /// Comma-separated service names, for error messages
    pub fn service_names(&self) -> String {
        self.services
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "remote",
        "host",
        "image_dir",
        "stack_dir",
        "build",
        "staging_dir",
        "tools",
        "docker",
        "scp",
        "ssh",
        "services",
        "image",
        "context",
        "dockerfile",
        "archive",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(curr[j] + 1, prev[j + 1] + 1),
                prev[j] + cost,
            );
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}
