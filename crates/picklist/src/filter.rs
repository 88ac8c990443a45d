//! The filter engine.
//!
//! A filter maps an option list and a non-empty query to the matching
//! subset, preserving input order. The controller never calls a filter with
//! an empty query; an empty query means "show everything".
//!
//! # Example
//!
//! ```
//! use picklist::filter::{OptionFilter, SubstringFilter, MatchField};
//! use picklist::PickOption;
//!
//! let options = vec![
//!     PickOption::labeled("Canada", "CA"),
//!     PickOption::labeled("France", "FR"),
//! ];
//!
//! let by_label = SubstringFilter::default();
//! assert_eq!(by_label.filter(&options, "fra"), vec![options[1].clone()]);
//!
//! let by_code = SubstringFilter::default().with_field(MatchField::Code);
//! assert_eq!(by_code.filter(&options, "ca"), vec![options[0].clone()]);
//! ```

use serde::{Deserialize, Serialize};

use crate::option::PickOption;

/// Controls how matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    /// "Fra" does not match "france".
    CaseSensitive,
    /// "fra" matches "France".
    #[default]
    CaseInsensitive,
}

/// Which field of an option the substring filter inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    /// The plain text, or the record's label.
    #[default]
    Label,
    /// The record's code. Plain text options fall back to their text.
    Code,
}

/// Trait for computing the options that match a query.
///
/// Implement this to replace the default matching entirely. Closures with
/// the signature `Fn(&[PickOption], &str) -> Vec<PickOption>` implement it.
pub trait OptionFilter: Send + Sync {
    /// Return the options matching `query`, in input order.
    fn filter(&self, options: &[PickOption], query: &str) -> Vec<PickOption>;
}

impl<F> OptionFilter for F
where
    F: Fn(&[PickOption], &str) -> Vec<PickOption> + Send + Sync,
{
    fn filter(&self, options: &[PickOption], query: &str) -> Vec<PickOption> {
        self(options, query)
    }
}

/// The default filter: substring containment on one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstringFilter {
    field: MatchField,
    case_sensitivity: CaseSensitivity,
}

impl SubstringFilter {
    /// Create a case-insensitive filter on `field`.
    pub fn new(field: MatchField) -> Self {
        Self {
            field,
            case_sensitivity: CaseSensitivity::default(),
        }
    }

    /// Set the matched field using builder pattern.
    pub fn with_field(mut self, field: MatchField) -> Self {
        self.field = field;
        self
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = sensitivity;
        self
    }

    /// The field this filter matches against.
    pub fn field(&self) -> MatchField {
        self.field
    }

    /// The case sensitivity of this filter.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    fn haystack<'a>(&self, option: &'a PickOption) -> &'a str {
        match self.field {
            MatchField::Label => option.match_text(),
            MatchField::Code => option.code().unwrap_or_else(|| option.match_text()),
        }
    }
}

impl OptionFilter for SubstringFilter {
    fn filter(&self, options: &[PickOption], query: &str) -> Vec<PickOption> {
        match self.case_sensitivity {
            CaseSensitivity::CaseSensitive => options
                .iter()
                .filter(|option| self.haystack(option).contains(query))
                .cloned()
                .collect(),
            CaseSensitivity::CaseInsensitive => {
                let needle = query.to_lowercase();
                options
                    .iter()
                    .filter(|option| self.haystack(option).to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        }
    }
}

/// Filter `options` with the default case-insensitive label match.
pub fn filter(options: &[PickOption], query: &str) -> Vec<PickOption> {
    SubstringFilter::default().filter(options, query)
}
