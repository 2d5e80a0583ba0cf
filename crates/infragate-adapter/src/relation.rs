//! Mutual-exclusivity checks over relation targets.
//!
//! A candidate is `(wire field name, value)`. Presence follows
//! [`crate::presence`], so `""` does not count as a target.

use crate::error::ConvertError;
use crate::presence::{self, Presence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Zero or one target.
    Optional,
    /// Exactly one target.
    Required,
}

pub type Candidate<'a> = (&'static str, Option<&'a str>);

fn field_names(candidates: &[Candidate<'_>]) -> Vec<&'static str> {
    candidates.iter().map(|(name, _)| *name).collect()
}

/// Validate that at most one candidate is set (exactly one when
/// `Required`). Returns the index and value of the set candidate.
pub fn validate_exclusive<'a>(
    candidates: &[Candidate<'a>],
    requirement: Requirement,
) -> Result<Option<(usize, &'a str)>, ConvertError> {
    let mut set = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, (_, value))| presence::classify(*value).value().map(|v| (i, v)));

    let first = set.next();
    if set.next().is_some() {
        return Err(ConvertError::ConflictingRelations {
            fields: field_names(candidates),
        });
    }
    if first.is_none() && requirement == Requirement::Required {
        return Err(ConvertError::MissingRelation {
            fields: field_names(candidates),
        });
    }
    Ok(first)
}

/// Validate that at least one of several identifying fields is set.
pub fn require_any(candidates: &[Candidate<'_>]) -> Result<(), ConvertError> {
    let any = candidates
        .iter()
        .any(|(_, value)| presence::classify(*value) != Presence::Unset);
    if any {
        Ok(())
    } else {
        Err(ConvertError::MissingRelation {
            fields: field_names(candidates),
        })
    }
}
