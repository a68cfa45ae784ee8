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

pub mod converter;
pub mod merge;
pub mod source;
pub mod state;

pub use converter::{ConversionReport, Diagnostics, LogToYaml, Severity, TracingDiagnostics};
pub use merge::{commit, merge_records, MergeOutcome};
pub use state::{derive_state_path, LoadedState, ParsedRecord, PersistedState, StateStore};
