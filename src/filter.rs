//! Predicate filtering for `find`.
//!
//! A [`FilterSpec`] is a conjunction of optional predicates over data
//! objects. Collections never survive filtering. Specs are validated when
//! built, so contradictory size bounds fail before any catalog call.

use crate::catalog::{CatalogEntry, DataObjectEntry};
use crate::retrieve::QueryResult;
use crate::wildcard;
use glob::Pattern;
use thiserror::Error;

const SIZE_SUFFIXES: [char; 5] = ['k', 'm', 'g', 't', 'p'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("Unable to parse size \"{input}\"")]
    InvalidSize { input: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error(transparent)]
    InvalidSize(#[from] SizeError),
    #[error("Invalid name pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Maximum size cannot be less than minimum size.")]
    MaxBelowMin,
    #[error("Maximum size cannot be less than (exact) size.")]
    MaxBelowExact,
    #[error("Minimum size cannot be more than (exact) size.")]
    MinAboveExact,
}

/// Parse `"1240"`, `"200k"`, `"30m"` ... into bytes. Each suffix in
/// `k, m, g, t, p` multiplies by a further 1024.
pub fn parse_human_size(text: &str) -> Result<u64, SizeError> {
    let invalid = || SizeError::InvalidSize {
        input: text.to_string(),
    };
    if let Ok(plain) = text.parse::<u64>() {
        return Ok(plain);
    }

    let suffix = text.chars().last().ok_or_else(invalid)?;
    let exponent = SIZE_SUFFIXES
        .iter()
        .position(|&s| s == suffix)
        .ok_or_else(invalid)?;
    let digits = &text[..text.len() - suffix.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    1024u64
        .checked_pow(exponent as u32 + 1)
        .and_then(|multiplier| value.checked_mul(multiplier))
        .ok_or_else(invalid)
}

/// Raw user text for each predicate, as given on the command line.
#[derive(Clone, Debug, Default)]
pub struct FilterArgs {
    pub name_glob: Option<String>,
    pub owner_name: Option<String>,
    pub owner_zone: Option<String>,
    pub resource_name: Option<String>,
    pub exact_size: Option<String>,
    pub min_size: Option<String>,
    pub max_size: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct FilterSpec {
    name_glob: Option<Pattern>,
    owner_name: Option<String>,
    owner_zone: Option<String>,
    resource_name: Option<String>,
    exact_size: Option<u64>,
    min_size: Option<u64>,
    max_size: Option<u64>,
}

impl FilterSpec {
    /// Parse and validate user-supplied predicates.
    pub fn from_args(args: &FilterArgs) -> Result<Self, FilterError> {
        let name_glob = args
            .name_glob
            .as_deref()
            .map(|raw| {
                wildcard::compile(raw).map_err(|err| FilterError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: err.msg.to_string(),
                })
            })
            .transpose()?;
        let parse = |raw: &Option<String>| raw.as_deref().map(parse_human_size).transpose();

        let spec = FilterSpec {
            name_glob,
            owner_name: args.owner_name.clone(),
            owner_zone: args.owner_zone.clone(),
            resource_name: args.resource_name.clone(),
            exact_size: parse(&args.exact_size)?,
            min_size: parse(&args.min_size)?,
            max_size: parse(&args.max_size)?,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn with_sizes(
        exact_size: Option<u64>,
        min_size: Option<u64>,
        max_size: Option<u64>,
    ) -> Result<Self, FilterError> {
        let spec = FilterSpec {
            exact_size,
            min_size,
            max_size,
            ..FilterSpec::default()
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), FilterError> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if max < min {
                return Err(FilterError::MaxBelowMin);
            }
        }
        if let (Some(exact), Some(max)) = (self.exact_size, self.max_size) {
            if max < exact {
                return Err(FilterError::MaxBelowExact);
            }
        }
        if let (Some(exact), Some(min)) = (self.exact_size, self.min_size) {
            if min > exact {
                return Err(FilterError::MinAboveExact);
            }
        }
        Ok(())
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.name_glob.is_none()
            && self.owner_name.is_none()
            && self.owner_zone.is_none()
            && self.resource_name.is_none()
            && self.exact_size.is_none()
            && self.min_size.is_none()
            && self.max_size.is_none()
    }

    pub fn matches(&self, object: &DataObjectEntry) -> bool {
        let text_eq = |want: &Option<String>, got: &str| want.as_deref().is_none_or(|w| w == got);
        self.name_glob
            .as_ref()
            .is_none_or(|pattern| pattern.matches(&object.name))
            && text_eq(&self.owner_name, &object.owner_name)
            && text_eq(&self.owner_zone, &object.owner_zone)
            && text_eq(&self.resource_name, &object.resc_name)
            && self.exact_size.is_none_or(|size| object.size == size)
            && self.min_size.is_none_or(|min| object.size >= min)
            && self.max_size.is_none_or(|max| object.size <= max)
    }

    /// Keep the data objects satisfying every predicate, in input order.
    pub fn apply(&self, entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        entries
            .into_iter()
            .filter(|entry| entry.as_data_object().is_some_and(|d| self.matches(d)))
            .collect()
    }
}

/// Filter each query's results, keeping every query (possibly emptied).
pub fn filter_results(results: Vec<QueryResult>, spec: &FilterSpec) -> Vec<QueryResult> {
    results
        .into_iter()
        .map(|result| result.map_results(|entries| spec.apply(entries)))
        .collect()
}
