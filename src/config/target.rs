use crate::utils::error::{CraneError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const HOME_ENV: &str = "CRANE_HOME";
pub const TARGET_ENV: &str = "CRANE_TARGET";
pub const TOKEN_ENV: &str = "CRANE_TOKEN";

/// 持久化的 target 設定檔內容（所有欄位皆可省略）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetFile {
    pub target: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// The resolved API target handed to the HTTP adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    pub target: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub token: Option<String>,
}

impl TargetFile {
    /// 從 TOML 檔案載入；檔案不存在時回傳空設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CraneError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| CraneError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${CRANE_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| CraneError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TargetConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("target", &self.target)?;
        if let Some(token) = &self.token {
            validation::validate_non_empty_string("token", token)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

/// `$CRANE_HOME`, falling back to `$HOME/.crane`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        return Some(PathBuf::from(dir));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".crane"))
}

// Blank values (`CRANE_TARGET=`) count as unset at every level.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merges flags, environment and file. `Ok(None)` means no target was
/// configured anywhere; that only matters once a request is sent.
pub fn resolve<F>(overrides: Overrides, env: F, file: TargetFile) -> Result<Option<TargetConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let target = non_blank(overrides.target)
        .or_else(|| non_blank(env(TARGET_ENV)))
        .or_else(|| non_blank(file.target));
    let token = non_blank(overrides.token)
        .or_else(|| non_blank(env(TOKEN_ENV)))
        .or_else(|| non_blank(file.token));

    let Some(target) = target else {
        return Ok(None);
    };

    let config = TargetConfig {
        target,
        token,
        timeout_seconds: file.timeout_seconds,
    };
    config.validate()?;
    Ok(Some(config))
}

/// 讀取預設位置的設定檔並與命令列、環境變數合併
pub fn load(overrides: Overrides) -> Result<Option<TargetConfig>> {
    let file = match config_dir() {
        Some(dir) => TargetFile::from_file(dir.join(CONFIG_FILE))?,
        None => TargetFile::default(),
    };
    resolve(overrides, |key| std::env::var(key).ok(), file)
}
