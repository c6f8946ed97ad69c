use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Environment variable overriding the configured maximum hierarchy depth.
pub const MAX_DEPTH_ENV: &str = "GROVE_MAX_DEPTH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            hierarchy: HierarchyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Maximum number of tree levels (root included) a computed hierarchy
    /// may have before the build aborts.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Load `.grove/config.toml` from the project root, falling back to
/// defaults when the file does not exist.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".grove/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective maximum depth for the current process.
///
/// Precedence: explicit caller override, then [`MAX_DEPTH_ENV`], then the
/// project config value.
///
/// # Errors
///
/// Fails when the file cannot be parsed or the resolved value is invalid.
pub fn effective_max_depth(project_root: &Path, cli_override: Option<usize>) -> Result<usize> {
    let config = load_project_config(project_root)?;
    resolve_max_depth(cli_override, env::var(MAX_DEPTH_ENV).ok(), config.hierarchy.max_depth)
}

/// Pure precedence resolution, separated from process state for testing.
fn resolve_max_depth(
    cli_override: Option<usize>,
    env_value: Option<String>,
    configured: usize,
) -> Result<usize> {
    let resolved = if let Some(value) = cli_override {
        value
    } else if let Some(raw) = env_value {
        raw.trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid {MAX_DEPTH_ENV} value: '{raw}'"))?
    } else {
        configured
    };

    if resolved == 0 {
        bail!("maximum hierarchy depth must be at least 1 (got 0)");
    }
    Ok(resolved)
}

const fn default_max_depth() -> usize {
    10
}
