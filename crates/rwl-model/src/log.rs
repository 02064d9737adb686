//! Anomaly log: every detection and repair, keyed by original line number.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Log code taxonomy. Declaration order is the taxonomy order, so sorting by
/// code sorts `1.1` before `1.2` before `2.1` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// 1.1: interior single-row decade error.
    InteriorYear,
    /// 1.2: isolated first row of a new core.
    FirstRowYear,
    /// 1.3: last row of a core off by a decade.
    LastRowYear,
    /// 1.4: declared year disagrees with the data length.
    YearLengthMismatch,
    /// 2.1: identifier shifted relative to the data boundary.
    ShiftedIdentifier,
    /// 2.2: single mistyped identifier.
    MistypedIdentifier,
    /// 3.1: line shorter than identifier + year.
    ShortLine,
    /// 3.2: free text inside the value columns.
    NotationLine,
    /// 3.3: year field is not a number.
    UnreadableYear,
    /// 4.1: exact duplicate column removed.
    ExactDuplicate,
    /// 4.2: same label, different values; kept.
    LabelDuplicate,
    /// 5: terminal marker absent.
    MissingStopMarker,
    /// 6.1: illegal characters replaced.
    IllegalCharacter,
    /// 6.2: orphaned decimal point removed.
    StrayDecimal,
    /// 7.1: blank-gap missing values normalized.
    MissingGap,
    /// 7.2: sentinel fill trimmed.
    SentinelFill,
    /// 8: segmented core merged.
    SegmentedCore,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 17] = [
        Self::InteriorYear,
        Self::FirstRowYear,
        Self::LastRowYear,
        Self::YearLengthMismatch,
        Self::ShiftedIdentifier,
        Self::MistypedIdentifier,
        Self::ShortLine,
        Self::NotationLine,
        Self::UnreadableYear,
        Self::ExactDuplicate,
        Self::LabelDuplicate,
        Self::MissingStopMarker,
        Self::IllegalCharacter,
        Self::StrayDecimal,
        Self::MissingGap,
        Self::SentinelFill,
        Self::SegmentedCore,
    ];

    pub fn major(self) -> u8 {
        match self {
            Self::InteriorYear
            | Self::FirstRowYear
            | Self::LastRowYear
            | Self::YearLengthMismatch => 1,
            Self::ShiftedIdentifier | Self::MistypedIdentifier => 2,
            Self::ShortLine | Self::NotationLine | Self::UnreadableYear => 3,
            Self::ExactDuplicate | Self::LabelDuplicate => 4,
            Self::MissingStopMarker => 5,
            Self::IllegalCharacter | Self::StrayDecimal => 6,
            Self::MissingGap | Self::SentinelFill => 7,
            Self::SegmentedCore => 8,
        }
    }

    pub fn minor(self) -> Option<u8> {
        match self {
            Self::InteriorYear
            | Self::ShiftedIdentifier
            | Self::ShortLine
            | Self::ExactDuplicate
            | Self::IllegalCharacter
            | Self::MissingGap => Some(1),
            Self::FirstRowYear
            | Self::MistypedIdentifier
            | Self::NotationLine
            | Self::LabelDuplicate
            | Self::StrayDecimal
            | Self::SentinelFill => Some(2),
            Self::LastRowYear | Self::UnreadableYear => Some(3),
            Self::YearLengthMismatch => Some(4),
            Self::MissingStopMarker | Self::SegmentedCore => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::InteriorYear => "decade error inside a core, corrected from neighbours",
            Self::FirstRowYear => "decade error on the first row of a core, corrected",
            Self::LastRowYear => "decade error on the last row of a core, corrected",
            Self::YearLengthMismatch => "declared year does not match the data length",
            Self::ShiftedIdentifier => "identifier shifted against the data boundary, relabeled",
            Self::MistypedIdentifier => "mistyped identifier, copied from the previous row",
            Self::ShortLine => "no-data-row, short line",
            Self::NotationLine => "no-data-row, notation line",
            Self::UnreadableYear => "no-data-row, unreadable year field",
            Self::ExactDuplicate => "exact duplicate core removed",
            Self::LabelDuplicate => "cores share a label but differ, kept",
            Self::MissingStopMarker => "stop marker absent",
            Self::IllegalCharacter => "illegal characters replaced",
            Self::StrayDecimal => "stray decimal point removed",
            Self::MissingGap => "missing-value gap normalized",
            Self::SentinelFill => "sentinel fill trimmed",
            Self::SegmentedCore => "segmented core merged",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor() {
            Some(minor) => write!(f, "{}.{}", self.major(), minor),
            None => write!(f, "{}", self.major()),
        }
    }
}

/// Error returned when parsing an unknown log code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log code: {}", self.0)
    }
}

impl std::error::Error for UnknownCode {}

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.to_string() == trimmed)
            .ok_or_else(|| UnknownCode(trimmed.to_string()))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One anomaly: a code and the 1-based line it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogEntry {
    pub line: usize,
    pub code: ErrorCode,
}

impl LogEntry {
    pub fn new(code: ErrorCode, line: usize) -> Self {
        Self { line, code }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.code, self.line)
    }
}

/// Append-only anomaly log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalyLog {
    entries: Vec<LogEntry>,
}

impl AnomalyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: ErrorCode, line: usize) {
        tracing::debug!(code = %code, line, "{}", code.description());
        self.entries.push(LogEntry::new(code, line));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, code: ErrorCode, line: usize) -> bool {
        self.entries.contains(&LogEntry::new(code, line))
    }

    pub fn count(&self, code: ErrorCode) -> usize {
        self.entries.iter().filter(|entry| entry.code == code).count()
    }

    /// Lines carrying the given code, in log order.
    pub fn lines_with(&self, code: ErrorCode) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|entry| entry.code == code)
            .map(|entry| entry.line)
            .collect()
    }

    pub fn retain(&mut self, keep: impl FnMut(&LogEntry) -> bool) {
        self.entries.retain(keep);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Collapse repeated (code, line) pairs and order by line, then code.
    pub fn finalize(&mut self) {
        let mut seen = HashSet::new();
        self.entries.retain(|entry| seen.insert(*entry));
        self.entries.sort();
    }

    /// Render as `code@line` pairs separated by spaces.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
