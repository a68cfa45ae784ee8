// LogToYaml - GPL-3.0-or-later
// This file is part of LogToYaml.
//
// Copyright (C) 2025 Daniel Freiermuth
//
// LogToYaml is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// LogToYaml is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with LogToYaml.  If not, see <https://www.gnu.org/licenses/>.

use crate::core::derive_state_path;
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_NAME: &str = "log-to-yaml";
pub const DEFAULT_SEPARATOR: char = '-';
pub const DEFAULT_VERIFIER: usize = 4;

/// Settings for one converter instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Label attached to this converter's diagnostics
    pub name: String,
    pub log_file: PathBuf,
    pub separator: char,
    /// Expected level column, checked against the discovered one
    pub verifier: usize,
    /// Overrides the state path derived from `log_file`
    pub state_file: Option<PathBuf>,
}

impl ConverterConfig {
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            log_file: log_file.into(),
            separator: DEFAULT_SEPARATOR,
            verifier: DEFAULT_VERIFIER,
            state_file: None,
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_verifier(mut self, verifier: usize) -> Self {
        self.verifier = verifier;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_state_file(mut self, state_file: impl Into<PathBuf>) -> Self {
        self.state_file = Some(state_file.into());
        self
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| derive_state_path(&self.log_file))
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(self.separator, '\n' | '\r') {
            return Err(ConvertError::invalid_config(
                "separator cannot be a line terminator",
            ));
        }
        if self.state_path() == self.log_file {
            return Err(ConvertError::invalid_config(format!(
                "state file would overwrite the log file {}; set state_file explicitly",
                self.log_file.display()
            )));
        }
        Ok(())
    }
}

/// Partial settings as read from a YAML config file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub name: Option<String>,
    pub log_file: Option<PathBuf>,
    #[serde(alias = "seperator")]
    pub separator: Option<char>,
    pub verifier: Option<usize>,
    pub state_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Get the path to the user-wide config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("log-to-yaml").join("config.yaml"))
    }

    /// Load a config file. Relative paths inside it are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::invalid_config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            ConvertError::invalid_config(format!("failed to parse {}: {e}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            config.log_file = config.log_file.map(|p| base.join(p));
            config.state_file = config.state_file.map(|p| base.join(p));
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the user-wide config file, or defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Fields set in `overrides` replace ours
    #[must_use]
    pub fn overlay(self, overrides: Self) -> Self {
        Self {
            name: overrides.name.or(self.name),
            log_file: overrides.log_file.or(self.log_file),
            separator: overrides.separator.or(self.separator),
            verifier: overrides.verifier.or(self.verifier),
            state_file: overrides.state_file.or(self.state_file),
        }
    }

    /// Fill in defaults and validate
    pub fn resolve(self) -> Result<ConverterConfig> {
        let log_file = self
            .log_file
            .ok_or_else(|| ConvertError::invalid_config("log_file is required"))?;

        let config = ConverterConfig {
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            log_file,
            separator: self.separator.unwrap_or(DEFAULT_SEPARATOR),
            verifier: self.verifier.unwrap_or(DEFAULT_VERIFIER),
            state_file: self.state_file,
        };
        config.validate()?;
        Ok(config)
    }
}
