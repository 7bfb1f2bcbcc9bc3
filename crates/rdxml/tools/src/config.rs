// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Configuration file support for the `rdxml` tool

use anyhow::{Context, Result};
use clap::ValueEnum;
use rdxml_compiler::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "RDXML_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdxmlConfig {
    pub resolver: ResolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How reports are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl RdxmlConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))?;
        config.resolver.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Pick the configuration file: `--config` first, then `$RDXML_CONFIG`,
    /// otherwise defaults.
    pub fn resolve_config(cli_config: Option<PathBuf>) -> Result<Self> {
        Self::resolve_from(cli_config, std::env::var_os(CONFIG_ENV))
    }

    pub fn resolve_from(cli_config: Option<PathBuf>, env_config: Option<OsString>) -> Result<Self> {
        if let Some(config_path) = cli_config {
            Self::load_from_file(config_path)
        } else if let Some(env_config) = env_config.filter(|value| !value.is_empty()) {
            Self::load_from_file(PathBuf::from(env_config))
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides on top of the file settings
    pub fn with_overrides(mut self, provenance: Option<String>, format: Option<OutputFormat>) -> Result<Self> {
        if let Some(provenance) = provenance {
            self.resolver = self.resolver.with_provenance(provenance);
            self.resolver.validate()?;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        Ok(self)
    }
}
