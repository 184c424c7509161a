//! # bag-info.txt Reader
//!
//! Reads `Label: Value` metadata in the layout of a BagIt `bag-info.txt` tag file
//! into [`Fields`] ready for validation. A line beginning with whitespace continues
//! the value of the line before it.
#[cfg(test)]
mod tests;

use crate::validate::Fields;
use thiserror::Error;

/// Errors which occur while reading bag-info metadata.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BagInfoError {
    /// A line is neither a `Label: Value` pair nor a continuation.
    #[error("Line {line} is not a `Label: Value` pair")]
    MissingSeparator {
        /// One-based line number.
        line: usize,
    },
    /// A continuation line appears before any label.
    #[error("Line {line} continues a value but no label precedes it")]
    DanglingContinuation {
        /// One-based line number.
        line: usize,
    },
    /// The label before the `:` is empty.
    #[error("Line {line} has an empty label")]
    EmptyLabel {
        /// One-based line number.
        line: usize,
    },
}

/// Parse bag-info text into fields. When a label repeats the last value wins.
pub fn parse(input: &str) -> Result<Fields, BagInfoError> {
    let mut fields = Fields::new();
    let mut current: Option<(String, String)> = None;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            let (_, value) = current
                .as_mut()
                .ok_or(BagInfoError::DanglingContinuation { line })?;
            value.push(' ');
            value.push_str(raw.trim());
            continue;
        }

        let (label, value) = raw
            .split_once(':')
            .ok_or(BagInfoError::MissingSeparator { line })?;
        let label = label.trim();
        if label.is_empty() {
            return Err(BagInfoError::EmptyLabel { line });
        }

        if let Some((label, value)) = current.replace((label.to_owned(), value.trim().to_owned())) {
            fields.insert(label, value);
        }
    }

    if let Some((label, value)) = current {
        fields.insert(label, value);
    }

    tracing::trace!(fields = fields.len(), "parsed bag-info");
    Ok(fields)
}
