//! Symbol frequency analysis.

use std::collections::HashMap;

use log::debug;

use crate::error::{CodecError, Result};

/// Occurrence counts per symbol, kept in order of first appearance.
///
/// The order matters: it is the tie-break sequence the tree builder uses
/// among symbols of equal weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, usize)>,
}

impl FrequencyTable {
    pub fn from_text(input: &str) -> Self {
        let mut index: HashMap<char, usize> = HashMap::new();
        let mut entries: Vec<(char, usize)> = Vec::new();

        for symbol in input.chars() {
            let slot = *index.entry(symbol).or_insert_with(|| {
                entries.push((symbol, 0));
                entries.len() - 1
            });
            entries[slot].1 += 1;
        }

        debug!(
            "counted {} distinct symbols over {} chars",
            entries.len(),
            entries.iter().map(|(_, freq)| freq).sum::<usize>()
        );

        Self { entries }
    }

    /// Same as [`FrequencyTable::from_text`] but refuses an empty input.
    pub fn try_from_text(input: &str) -> Result<Self> {
        let table = Self::from_text(input);
        if table.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, freq)| freq).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}
