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

//! Incrementally converts delimiter-structured plaintext logs into a YAML
//! record store kept beside the log.
//!
//! Each run picks up after the last processed line, segments the new lines
//! into records and appends them under contiguous indices.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod parser;

pub use crate::config::{ConfigFile, ConverterConfig};
pub use crate::core::{
    ConversionReport, Diagnostics, LogToYaml, ParsedRecord, PersistedState, Severity, StateStore,
    TracingDiagnostics,
};
pub use crate::error::{ConvertError, Result};
pub use crate::parser::{LevelToken, LocationInfo};
