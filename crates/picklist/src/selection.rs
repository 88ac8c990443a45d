//! Selection sets and toggle semantics.

use serde::{Deserialize, Serialize};

use crate::option::PickOption;

/// Whether one or many options may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// At most one option is selected.
    #[default]
    Single,
    /// Any number of distinct options are selected.
    Multiple,
}

impl SelectionMode {
    /// `Multiple` when `multiple` is true, `Single` otherwise.
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple { Self::Multiple } else { Self::Single }
    }

    /// Whether this is [`SelectionMode::Multiple`].
    pub fn is_multiple(self) -> bool {
        self == Self::Multiple
    }
}

/// An ordered sequence of selected options.
///
/// The set is owned by the caller. The controller computes a proposed set
/// with [`SelectionSet::toggled`] and hands it back through its `changed`
/// signal; the caller applies it with `Autocomplete::set_value`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    items: Vec<PickOption>,
}

impl SelectionSet {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an option with the same identity is selected.
    pub fn contains(&self, option: &PickOption) -> bool {
        self.items.iter().any(|selected| selected.same_as(option))
    }

    /// The selected option at `index`.
    pub fn get(&self, index: usize) -> Option<&PickOption> {
        self.items.get(index)
    }

    /// Iterate over the selected options in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PickOption> {
        self.items.iter()
    }

    /// The selected options as a slice.
    pub fn as_slice(&self) -> &[PickOption] {
        &self.items
    }

    /// Consume the set, returning the selected options.
    pub fn into_vec(self) -> Vec<PickOption> {
        self.items
    }

    /// Compute the selection that results from choosing `option`.
    ///
    /// - `Multiple`: removes every entry with the same identity if present,
    ///   appends `option` otherwise.
    /// - `Single`: clears the selection if `option` is already selected,
    ///   replaces it with `[option]` otherwise.
    pub fn toggled(&self, option: &PickOption, mode: SelectionMode) -> SelectionSet {
        let present = self.contains(option);
        let items = match (mode, present) {
            (SelectionMode::Multiple, true) => self
                .items
                .iter()
                .filter(|selected| !selected.same_as(option))
                .cloned()
                .collect(),
            (SelectionMode::Multiple, false) => {
                let mut items = self.items.clone();
                items.push(option.clone());
                items
            }
            (SelectionMode::Single, true) => Vec::new(),
            (SelectionMode::Single, false) => vec![option.clone()],
        };
        SelectionSet { items }
    }
}

impl From<Vec<PickOption>> for SelectionSet {
    fn from(items: Vec<PickOption>) -> Self {
        Self { items }
    }
}

impl FromIterator<PickOption> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = PickOption>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a PickOption;
    type IntoIter = std::slice::Iter<'a, PickOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ca() -> PickOption {
        PickOption::labeled("Canada", "CA")
    }

    fn fr() -> PickOption {
        PickOption::labeled("France", "FR")
    }

    #[test]
    fn test_multiple_toggle_round_trip() {
        let original = SelectionSet::from(vec![fr()]);
        let added = original.toggled(&ca(), SelectionMode::Multiple);
        assert_eq!(added.as_slice(), &[fr(), ca()]);

        let removed = added.toggled(&ca(), SelectionMode::Multiple);
        assert_eq!(removed, original);
    }

    #[test]
    fn test_multiple_appends_in_order() {
        let set = SelectionSet::new()
            .toggled(&ca(), SelectionMode::Multiple)
            .toggled(&fr(), SelectionMode::Multiple);
        assert_eq!(set.as_slice(), &[ca(), fr()]);
    }

    #[test]
    fn test_single_replace_and_clear() {
        let set = SelectionSet::new().toggled(&ca(), SelectionMode::Single);
        assert_eq!(set.as_slice(), &[ca()]);

        let replaced = set.toggled(&fr(), SelectionMode::Single);
        assert_eq!(replaced.as_slice(), &[fr()]);

        let cleared = replaced.toggled(&fr(), SelectionMode::Single);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_single_never_exceeds_one() {
        // A caller may hand a single-select widget an oversized value.
        let oversized = SelectionSet::from(vec![ca(), fr()]);
        let next = oversized.toggled(&PickOption::text("DE"), SelectionMode::Single);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_membership_uses_identity() {
        let set = SelectionSet::from(vec![ca()]);
        assert!(set.contains(&PickOption::labeled("Kanada", "CA")));
        assert!(!set.contains(&PickOption::text("Canada")));
    }
}
