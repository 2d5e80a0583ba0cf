//! Relationship filter dimensions for list queries.
//!
//! Each optional relationship parameter (host, site, region, ...) becomes
//! one of three constraints. At most one parameter may pin a concrete id.

use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::query;

use crate::error::ConvertError;

/// Parameter values that ask for resources without the relationship.
pub const NULL_SENTINELS: [&str; 2] = ["", "null"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension<'a> {
    /// Parameter absent: no constraint.
    Ignore,
    /// The resource must have no such relationship.
    RequireAbsent,
    /// The resource must relate to exactly this id.
    RequireExact(&'a str),
}

pub fn classify_dimension(value: Option<&str>) -> Dimension<'_> {
    match value {
        None => Dimension::Ignore,
        Some(v) if NULL_SENTINELS.contains(&v) => Dimension::RequireAbsent,
        Some(v) => Dimension::RequireExact(v),
    }
}

/// One relationship parameter of a list request.
#[derive(Debug, Clone, Copy)]
pub struct DimensionParam<'a> {
    /// Wire parameter name, used in error messages.
    pub name: &'static str,
    /// Internal path of the relation edge.
    pub path: &'static str,
    /// Kind the referenced id must have.
    pub kind: ResourceKind,
    pub value: Option<&'a str>,
}

/// Classify every parameter, rejecting more than one concrete id.
pub fn classify<'a>(params: &[DimensionParam<'a>]) -> Result<Vec<Dimension<'a>>, ConvertError> {
    let dims: Vec<Dimension<'a>> = params.iter().map(|p| classify_dimension(p.value)).collect();
    let exact = dims
        .iter()
        .filter(|d| matches!(d, Dimension::RequireExact(_)))
        .count();
    if exact > 1 {
        return Err(ConvertError::ConflictingRelations {
            fields: params.iter().map(|p| p.name).collect(),
        });
    }
    Ok(dims)
}

/// Build the backend predicate for a set of relationship parameters.
/// All-ignored parameters yield the match-everything predicate.
pub fn relation_predicate(params: &[DimensionParam<'_>]) -> Result<String, ConvertError> {
    let dims = classify(params)?;
    let mut clauses = Vec::new();
    for (param, dim) in params.iter().zip(dims) {
        match dim {
            Dimension::Ignore => {}
            Dimension::RequireAbsent => {
                clauses.push(format!("{} {}({})", query::NOT, query::HAS, param.path));
            }
            Dimension::RequireExact(raw) => {
                let id = ResourceId::parse_kind(param.kind, raw).map_err(|source| {
                    ConvertError::InvalidId {
                        field: param.name,
                        source,
                    }
                })?;
                clauses.push(format!(
                    "{}.resource_id = {}",
                    param.path,
                    query::quote(id.as_str())
                ));
            }
        }
    }

    if clauses.is_empty() {
        Ok(query::MATCH_ALL.to_owned())
    } else {
        Ok(clauses.join(&format!(" {} ", query::AND)))
    }
}

/// Predicate selecting single schedules active at unix time `value`.
pub fn epoch_predicate(value: Option<&str>) -> Result<Option<String>, ConvertError> {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let at: u64 = raw.parse().map_err(|_| ConvertError::InvalidValue {
        field: "unixEpoch",
        reason: format!("{raw:?} is not a unix timestamp in seconds"),
    })?;
    Ok(Some(format!(
        "start_seconds <= {at} AND (end_seconds = 0 OR end_seconds >= {at})"
    )))
}

/// Join predicates with AND, parenthesizing each when there are several.
pub fn conjoin<I>(clauses: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let clauses: Vec<String> = clauses.into_iter().filter(|c| !c.trim().is_empty()).collect();
    match clauses.len() {
        0 => String::new(),
        1 => clauses.into_iter().next().unwrap_or_default(),
        _ => clauses
            .iter()
            .map(|c| format!("({c})"))
            .collect::<Vec<_>>()
            .join(&format!(" {} ", query::AND)),
    }
}
