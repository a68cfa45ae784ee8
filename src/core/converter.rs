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

//! The conversion pipeline: read, locate, segment, assemble, merge, persist.

use super::merge::commit;
use super::source::read_lines;
use super::state::{ParsedRecord, StateStore};
use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::parser::level::count_inconsistent_lines;
use crate::parser::{assemble_message, locate_level_column, segment_records, Layout};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Sink for the converter's diagnostic output
pub trait Diagnostics {
    fn report(&self, severity: Severity, message: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

/// Summary of one [`LogToYaml::convert`] run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub state_path: PathBuf,
    pub new_records: usize,
    pub first_index: Option<u64>,
    pub last_index: Option<u64>,
    /// Low-water-mark after the run
    pub last_line: usize,
    /// Whether the state file was written by this run
    pub persisted: bool,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_index, self.last_index) {
            (Some(first), Some(last)) => write!(
                f,
                "{} new records (#{first}..#{last}), last line {}",
                self.new_records, self.last_line
            )?,
            _ => write!(f, "no new records, last line {}", self.last_line)?,
        }
        if !self.persisted {
            f.write_str(" (not persisted)")?;
        }
        Ok(())
    }
}

/// Incremental log-to-YAML converter for one log file
pub struct LogToYaml<D = TracingDiagnostics> {
    config: ConverterConfig,
    dry_run: bool,
    diagnostics: D,
}

impl LogToYaml<TracingDiagnostics> {
    pub const fn new(config: ConverterConfig) -> Self {
        Self::with_diagnostics(config, TracingDiagnostics)
    }
}

impl<D: Diagnostics> LogToYaml<D> {
    pub const fn with_diagnostics(config: ConverterConfig, diagnostics: D) -> Self {
        Self {
            config,
            dry_run: false,
            diagnostics,
        }
    }

    /// Run every stage but never write the state file
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Fold every record appended since the last successful run into the state file.
    ///
    /// Either the state advances or it is left untouched; there is no partial run.
    pub fn convert(&self) -> Result<ConversionReport> {
        self.run().inspect_err(|e| {
            self.report(
                Severity::Error,
                &format!("conversion failed ({}): {e}", e.kind()),
            );
        })
    }

    fn run(&self) -> Result<ConversionReport> {
        self.config.validate()?;
        let log_file = &self.config.log_file;

        let lines = read_lines(log_file)?;
        self.report(
            Severity::Debug,
            &format!("read {} lines from {}", lines.len(), log_file.display()),
        );

        let separator = self.config.separator;
        let column = locate_level_column(&lines, separator).ok_or_else(|| {
            ConvertError::StructuralError {
                path: log_file.clone(),
            }
        })?;
        if column.index != self.config.verifier {
            self.report(
                Severity::Warning,
                &format!(
                    "level column {} (found on line {}) differs from expected column {}",
                    column.index, column.found_on_line, self.config.verifier
                ),
            );
        }
        let inconsistent = count_inconsistent_lines(&lines, separator, column.index);
        if inconsistent > 0 {
            self.report(
                Severity::Warning,
                &format!(
                    "{inconsistent} lines carry a level token outside column {}; they are treated as message text",
                    column.index
                ),
            );
        }

        let store = StateStore::new(self.config.state_path());
        let loaded = if self.dry_run {
            store.peek()?
        } else {
            store.load()?
        };
        if loaded.is_bootstrapped() {
            self.report(
                Severity::Info,
                &format!("no state at {}, starting fresh", store.path().display()),
            );
        }
        let previous = loaded.into_state();

        if previous.last > lines.len() {
            self.report(
                Severity::Warning,
                &format!(
                    "{} has {} lines but {} were already processed; was it truncated?",
                    log_file.display(),
                    lines.len(),
                    previous.last
                ),
            );
        }

        let layout = Layout::new(separator, column.index);
        let records: Vec<ParsedRecord> = segment_records(&lines, layout, previous.last)?
            .into_iter()
            .map(|segment| {
                let message = assemble_message(&lines, segment.span);
                ParsedRecord::new(segment, message)
            })
            .collect();

        let outcome = commit(&previous, records, lines.len(), |state| {
            if self.dry_run {
                Ok(())
            } else {
                store.save(state)
            }
        })?;

        let report = match outcome {
            Some(outcome) => ConversionReport {
                state_path: store.path().to_path_buf(),
                new_records: outcome.added(),
                first_index: Some(*outcome.indices.start()),
                last_index: Some(*outcome.indices.end()),
                last_line: outcome.state.last,
                persisted: !self.dry_run,
            },
            None => ConversionReport {
                state_path: store.path().to_path_buf(),
                new_records: 0,
                first_index: None,
                last_index: None,
                last_line: previous.last,
                persisted: false,
            },
        };
        self.report(Severity::Info, &report.to_string());
        Ok(report)
    }

    fn report(&self, severity: Severity, message: &str) {
        self.diagnostics
            .report(severity, &format!("[{}] {message}", self.config.name));
    }
}
