//! Keyboard keys and highlight index arithmetic.
//!
//! The highlight is an `i32` index into the displayed list where `-1` means
//! nothing is highlighted. All functions here take the displayed list
//! length and return a value in `-1..len`.

/// Keys the autocomplete reacts to.
///
/// Text entry arrives through `Autocomplete::on_input_change`, driven by the
/// input element's native event. Every key without a variant of its own
/// (Home, End, Tab, modifiers...) is left to the input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    /// A printable character.
    Character(char),
    /// Any other key.
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// Index after ArrowDown: wraps from the last item to 0.
pub fn next_index(current: i32, len: usize) -> i32 {
    if len == 0 {
        return -1;
    }
    let last = len as i32 - 1;
    let current = clamp(current, len);
    if current >= last { 0 } else { current + 1 }
}

/// Index after ArrowUp: wraps from 0 (or -1) to the last item.
pub fn prev_index(current: i32, len: usize) -> i32 {
    if len == 0 {
        return -1;
    }
    let current = clamp(current, len);
    if current <= 0 { len as i32 - 1 } else { current - 1 }
}

/// Clamp a highlight into `-1..len`.
///
/// Indices past the end snap to the last item; anything negative becomes -1.
pub fn clamp(current: i32, len: usize) -> i32 {
    if current < 0 {
        -1
    } else {
        current.min(len as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_down_wraps() {
        assert_eq!(next_index(-1, 3), 0);
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn test_arrow_up_wraps() {
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(-1, 3), 2);
        assert_eq!(prev_index(2, 3), 1);
    }

    #[test]
    fn test_empty_list_has_no_highlight() {
        assert_eq!(next_index(-1, 0), -1);
        assert_eq!(prev_index(-1, 0), -1);
        assert_eq!(clamp(0, 0), -1);
    }

    #[test]
    fn test_stale_index_is_clamped_first() {
        // List shrank from 10 to 3 items while index 7 was highlighted.
        assert_eq!(next_index(7, 3), 0);
        assert_eq!(prev_index(7, 3), 1);
        assert_eq!(clamp(7, 3), 2);
        assert_eq!(clamp(7, 0), -1);
        assert_eq!(clamp(-5, 3), -1);
    }

    #[test]
    fn test_from_dom_key() {
        assert_eq!(Key::from_dom_key("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("a"), Key::Character('a'));
        assert_eq!(Key::from_dom_key("Shift"), Key::Other);
        for cursor_key in ["Home", "End", "PageUp", "PageDown"] {
            assert_eq!(Key::from_dom_key(cursor_key), Key::Other);
        }
    }
}
