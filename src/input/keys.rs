//! Key press events and target classification
//!
//! Provides the host-facing event type delivered to a detector, plus the
//! normalization helpers the matching core relies on.

/// Classifies the UI element a key event originated from.
///
/// Keystrokes aimed at editable elements are usually excluded from
/// detection so that typing in a form cannot complete a trigger phrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyTarget {
    /// Anywhere that is not an editable element
    #[default]
    Page,
    /// A single-line text input
    TextInput,
    /// A multi-line text area
    TextArea,
    /// A select / dropdown element
    Select,
    /// An element marked content-editable
    ContentEditable,
}

impl KeyTarget {
    /// Whether keystrokes at this target belong to an editable element
    pub fn is_editable(&self) -> bool {
        !matches!(self, KeyTarget::Page)
    }
}

/// A single key press delivered by the host.
///
/// `key` is the key's textual identifier as reported by the host runtime:
/// a one-character string for printable keys ("t", "3"), a key name for
/// the rest ("Shift", "ArrowLeft").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    key: String,
    target: KeyTarget,
}

impl KeyPress {
    /// Create a key press event for the given key and originating target
    pub fn new(key: impl Into<String>, target: KeyTarget) -> Self {
        Self {
            key: key.into(),
            target,
        }
    }

    /// Convenience constructor for a printable character pressed on the page
    pub fn character(ch: char) -> Self {
        Self::new(ch.to_string(), KeyTarget::Page)
    }

    /// The key's textual identifier, as delivered by the host
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The element class this event originated from
    pub fn target(&self) -> KeyTarget {
        self.target
    }

    /// Lowercased form of the key, as appended to the match buffer
    pub fn token(&self) -> String {
        self.key.to_lowercase()
    }

    /// Whether the key's textual form is a single character
    pub fn is_single_char(&self) -> bool {
        self.key.chars().count() == 1
    }
}
