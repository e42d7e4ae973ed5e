// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG: OnceLock<RowlinkConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static RowlinkConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = path.as_ref().to_path_buf();
    let cfg = RowlinkConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn init_from_env_or_default() -> Result<&'static RowlinkConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = config_path_from_env_or_default()?;
    let cfg = RowlinkConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn config() -> Result<&'static RowlinkConfig> {
    init_from_env_or_default()
}

fn config_path_from_env_or_default() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("ROWLINK_CONFIG") {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }

    let candidates = [PathBuf::from("rowlink.toml")];
    for p in candidates {
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "config file not found: set ROWLINK_CONFIG or place rowlink.toml in the working directory"
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowlinkConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional EnvFilter expression. Overrides `log_level` when present.
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub join: JoinConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

fn default_log_build_stats() -> bool {
    true
}

/// Knobs for the join build side.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinConfig {
    /// Emit a debug line with link-chain stats when a build finishes.
    #[serde(default = "default_log_build_stats")]
    pub log_build_stats: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            log_build_stats: default_log_build_stats(),
        }
    }
}

fn default_checksum_on_build() -> bool {
    false
}

/// Debug-only toggles. All default to off.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugConfig {
    /// Compute and log the link-array checksum at build time.
    #[serde(default = "default_checksum_on_build")]
    pub checksum_on_build: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            checksum_on_build: default_checksum_on_build(),
        }
    }
}

impl RowlinkConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: RowlinkConfig = toml::from_str(&text)
            .with_context(|| format!("parse config file: {}", path.display()))?;
        Ok(cfg)
    }

    /// Effective logging directive: the explicit filter if set, else the level.
    pub fn effective_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(&self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let cfg: RowlinkConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.log_filter.is_none());
        assert!(cfg.join.log_build_stats);
        assert!(!cfg.debug.checksum_on_build);
    }

    #[test]
    fn parse_full_config() {
        let text = r#"
log_level = "debug"
log_filter = "rowlink=trace"

[join]
log_build_stats = false

[debug]
checksum_on_build = true
"#;
        let cfg: RowlinkConfig = toml::from_str(text).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.effective_log_filter(), "rowlink=trace");
        assert!(!cfg.join.log_build_stats);
        assert!(cfg.debug.checksum_on_build);
    }

    #[test]
    fn effective_filter_falls_back_to_level() {
        let cfg: RowlinkConfig = toml::from_str("log_level = \"warn\"").unwrap();
        assert_eq!(cfg.effective_log_filter(), "warn");
    }
}
