//! Line-Fold Set
//!
//! Source lines the user has collapsed. Folding is a display filter only: it
//! never touches frame data, and the renderer decides what to do with folded
//! lines.

use crate::types::LineNumber;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFoldSet {
    lines: BTreeSet<LineNumber>,
}

impl LineFoldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `line` if it is unfolded, unfold it otherwise.
    /// Returns whether the line is folded afterwards.
    pub fn toggle(&mut self, line: LineNumber) -> bool {
        if self.lines.remove(&line) {
            false
        } else {
            self.lines.insert(line);
            true
        }
    }

    pub fn fold(&mut self, line: LineNumber) -> bool {
        self.lines.insert(line)
    }

    pub fn unfold(&mut self, line: LineNumber) -> bool {
        self.lines.remove(&line)
    }

    pub fn is_folded(&self, line: LineNumber) -> bool {
        self.lines.contains(&line)
    }

    /// Folded lines in ascending order.
    pub fn folded_lines(&self) -> Vec<LineNumber> {
        self.lines.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = LineNumber> + '_ {
        self.lines.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// "3, 7, 12", or "None" when nothing is folded.
    pub fn summary(&self) -> String {
        if self.lines.is_empty() {
            return "None".to_string();
        }
        self.lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<LineNumber> for LineFoldSet {
    fn from_iter<I: IntoIterator<Item = LineNumber>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
