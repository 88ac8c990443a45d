//! Selectable options.
//!
//! An option is either a plain text token or a labeled record with a stable
//! code. Options compare by identity ([`PickOption::same_as`]): the text
//! token for plain options, the code for labeled ones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A selectable candidate item.
///
/// Deserializes from either a bare string or a `{ label, code }` table:
///
/// ```
/// use picklist::PickOption;
///
/// let options: Vec<PickOption> = serde_json::from_str(
///     r#"["Canada", { "label": "France", "code": "FR" }]"#,
/// ).unwrap();
///
/// assert_eq!(options[0], PickOption::text("Canada"));
/// assert_eq!(options[1], PickOption::labeled("France", "FR"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickOption {
    /// A plain text token.
    Text(String),
    /// A structured record with a display label and a stable code.
    Labeled {
        /// Text shown to the user and matched by the default filter.
        label: String,
        /// Stable identity of the record.
        code: String,
    },
}

/// The identity of an option, used for selection membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey<'a> {
    /// Identity of a [`PickOption::Text`].
    Text(&'a str),
    /// Identity of a [`PickOption::Labeled`].
    Code(&'a str),
}

impl PickOption {
    /// Create a plain text option.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a labeled option.
    pub fn labeled(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Labeled {
            label: label.into(),
            code: code.into(),
        }
    }

    /// The text shown for this option in rows and chips.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Labeled { label, .. } => label,
        }
    }

    /// The text the default filter matches against.
    pub fn match_text(&self) -> &str {
        self.display_text()
    }

    /// The code of a labeled option.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Labeled { code, .. } => Some(code),
        }
    }

    /// The identity of this option.
    pub fn key(&self) -> OptionKey<'_> {
        match self {
            Self::Text(text) => OptionKey::Text(text),
            Self::Labeled { code, .. } => OptionKey::Code(code),
        }
    }

    /// Whether both options have the same identity.
    ///
    /// Two labeled options with the same code are the same option even if
    /// their labels differ.
    pub fn same_as(&self, other: &PickOption) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for PickOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

impl From<&str> for PickOption {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for PickOption {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<(&str, &str)> for PickOption {
    fn from((label, code): (&str, &str)) -> Self {
        Self::labeled(label, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let plain = PickOption::text("Canada");
        assert_eq!(plain.display_text(), "Canada");
        assert_eq!(plain.match_text(), "Canada");
        assert_eq!(plain.code(), None);

        let record = PickOption::labeled("France", "FR");
        assert_eq!(record.display_text(), "France");
        assert_eq!(record.code(), Some("FR"));
        assert_eq!(record.to_string(), "France");
    }

    #[test]
    fn test_identity_is_code_for_records() {
        let a = PickOption::labeled("France", "FR");
        let renamed = PickOption::labeled("République française", "FR");
        let other = PickOption::labeled("France", "FX");

        assert!(a.same_as(&renamed));
        assert!(!a.same_as(&other));
    }

    #[test]
    fn test_text_and_code_never_collide() {
        let text = PickOption::text("CA");
        let record = PickOption::labeled("Canada", "CA");
        assert!(!text.same_as(&record));
    }

    #[test]
    fn test_deserialize_mixed_list() {
        let options: Vec<PickOption> =
            serde_json::from_str(r#"["CA", {"label": "France", "code": "FR"}]"#).unwrap();
        assert_eq!(
            options,
            vec![PickOption::text("CA"), PickOption::labeled("France", "FR")]
        );
    }
}
