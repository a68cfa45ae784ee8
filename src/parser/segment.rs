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

//! Record boundary detection and message assembly.

use super::level::LevelToken;
use super::location::{LocationError, LocationInfo};
use super::Layout;
use crate::error::{ConvertError, Result};

/// Inclusive 1-based line range of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    pub start: usize,
    pub end: usize,
}

/// Metadata of one record as read from its start line, plus its working span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedRecord {
    pub span: RecordSpan,
    pub name: String,
    pub level: LevelToken,
    pub time_stamp: String,
    pub location: LocationInfo,
}

/// Segment every record that starts after line `last`.
///
/// A record runs from its start line up to the line before the next start
/// line, or to the end of the file for the final record. Any malformed
/// location token aborts the whole segmentation.
pub fn segment_records(
    lines: &[String],
    layout: Layout,
    last: usize,
) -> Result<Vec<SegmentedRecord>> {
    let starts: Vec<(usize, LevelToken)> = lines
        .iter()
        .enumerate()
        .skip(last)
        .filter_map(|(idx, line)| layout.level_of(line).map(|level| (idx + 1, level)))
        .collect();

    let ends = starts
        .iter()
        .skip(1)
        .map(|(next_start, _)| next_start - 1)
        .chain(std::iter::once(lines.len()));

    starts
        .iter()
        .zip(ends)
        .map(|(&(start, level), end)| {
            extract_metadata(&lines[start - 1], start, layout, level)
                .map(|meta| meta.with_span(RecordSpan { start, end }))
        })
        .collect()
}

/// The trimmed raw lines of `span`, in file order
pub fn assemble_message(lines: &[String], span: RecordSpan) -> Vec<String> {
    lines[span.start - 1..span.end]
        .iter()
        .map(|line| line.trim().to_string())
        .collect()
}

struct StartLineMeta {
    name: String,
    level: LevelToken,
    time_stamp: String,
    location: LocationInfo,
}

impl StartLineMeta {
    fn with_span(self, span: RecordSpan) -> SegmentedRecord {
        SegmentedRecord {
            span,
            name: self.name,
            level: self.level,
            time_stamp: self.time_stamp,
            location: self.location,
        }
    }
}

/// Timestamp fields come first, the emitter name sits just before the level
/// column and the location token just after it.
fn extract_metadata(
    line: &str,
    line_number: usize,
    layout: Layout,
    level: LevelToken,
) -> Result<StartLineMeta> {
    let fields: Vec<&str> = line.split(layout.separator).collect();
    let column = layout.level_column;
    let separator = layout.separator.to_string();

    let (time_stamp, name) = match column.checked_sub(1) {
        Some(name_column) => (
            fields[..name_column]
                .join(separator.as_str())
                .replace(['[', ']'], "")
                .trim()
                .to_string(),
            fields[name_column].trim().to_string(),
        ),
        None => (String::new(), String::new()),
    };

    let token = fields.get(column + 1).copied();
    let location = token
        .ok_or(LocationError::Missing)
        .and_then(LocationInfo::parse)
        .map_err(|e| ConvertError::MalformedLocation {
            line: line_number,
            token: token.unwrap_or_default().trim().to_string(),
            reason: e.to_string(),
        })?;

    Ok(StartLineMeta {
        name,
        level,
        time_stamp,
        location,
    })
}
