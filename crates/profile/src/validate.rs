//! # Metadata Validation
//!
//! Checks candidate key/value metadata against a map of field rules. Every
//! violation is collected before the result is decided, so a caller always sees
//! the full list of problems in one pass.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};
use thiserror::Error;

/// Field name to the set of values it may take. `None` or an empty set accepts any value.
pub type Rules = BTreeMap<String, Option<BTreeSet<String>>>;

/// Candidate metadata, field name to value.
pub type Fields = BTreeMap<String, String>;

/// A single way in which candidate metadata fails a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The field is required but was not supplied.
    Missing {
        /// The name of the missing field.
        field: String,
    },
    /// The field was supplied with a value outside its allowed set.
    InvalidValue {
        /// The name of the offending field.
        field: String,
        /// The value that was supplied.
        value: String,
        /// Every value the field accepts.
        allowed: BTreeSet<String>,
    },
}

impl Violation {
    /// The field this violation is about.
    pub fn field(&self) -> &str {
        match self {
            Violation::Missing { field } | Violation::InvalidValue { field, .. } => field,
        }
    }

    fn describe<W: Write>(&self, f: &mut W, section: &str) -> fmt::Result {
        match self {
            Violation::Missing { field } => {
                write!(f, "\"{field}\" is a required field in {section}.")
            }
            Violation::InvalidValue {
                field,
                value,
                allowed,
            } => {
                let allowed = allowed.iter().map(String::as_str).collect::<Vec<_>>();
                write!(
                    f,
                    "\"{value}\" is not valid for \"{field}\" in {section}. Valid values are \"{}\".",
                    allowed.join(",")
                )
            }
        }
    }
}

/// Every violation found while validating one section of metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Profile validation failed for {section}:{}", render(.section, .violations))]
pub struct ValidationError {
    section: String,
    violations: Vec<Violation>,
}

impl ValidationError {
    /// The label of the section that failed validation.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The violations, in field name order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn render(section: &str, violations: &[Violation]) -> String {
    let mut out = String::new();
    for violation in violations {
        out.push_str("\n  ");
        // writing to a String cannot fail
        let _ = violation.describe(&mut out, section);
    }
    out
}

/// Validates `fields` against `rules`, reporting every violation at once.
///
/// `section` names the part of the profile being checked and only appears in
/// the error text. Fields not named by `rules` are ignored.
pub fn validate(section: &str, rules: &Rules, fields: &Fields) -> Result<(), ValidationError> {
    let violations: Vec<Violation> = rules
        .iter()
        .filter_map(|(field, allowed)| match fields.get(field) {
            None => Some(Violation::Missing {
                field: field.clone(),
            }),
            Some(value) => match allowed {
                Some(allowed) if !allowed.is_empty() && !allowed.contains(value) => {
                    Some(Violation::InvalidValue {
                        field: field.clone(),
                        value: value.clone(),
                        allowed: allowed.clone(),
                    })
                }
                _ => None,
            },
        })
        .collect();

    tracing::debug!(
        section,
        rules = rules.len(),
        fields = fields.len(),
        violations = violations.len(),
        "validated metadata"
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            section: section.to_owned(),
            violations,
        })
    }
}
