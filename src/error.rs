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

//! Error taxonomy for a conversion run.
//!
//! Every variant terminates the run. A run either advances the persisted
//! state or leaves it exactly as it was.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ConvertError`]
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source log is missing or unreadable
    #[error("log file unavailable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state file exists but could not be read or deserialized
    #[error("state file unreadable: {}: {reason}", path.display())]
    StateUnreadable { path: PathBuf, reason: String },

    /// No line in the log carries a level token in any column
    #[error("no level column found in {}", path.display())]
    StructuralError { path: PathBuf },

    /// A record start line has a location token that does not parse
    #[error("malformed location token on line {line}: {token:?} ({reason})")]
    MalformedLocation {
        line: usize,
        token: String,
        reason: String,
    },

    /// Writing the updated state failed; the low-water-mark was not advanced
    #[error("failed to persist state to {}: {source}", path.display())]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ConvertError {
    pub fn state_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::StateUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Short label for the failing stage, used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source-unavailable",
            Self::StateUnreadable { .. } => "state-unreadable",
            Self::StructuralError { .. } => "structural-error",
            Self::MalformedLocation { .. } => "malformed-location",
            Self::PersistFailure { .. } => "persist-failure",
            Self::InvalidConfig { .. } => "invalid-config",
        }
    }
}
