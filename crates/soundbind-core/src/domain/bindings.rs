//! Binding set domain entity.
//!
//! A [`BindingSet`] maps input identifiers to sound file paths in two
//! independent namespaces (keyboard and mouse) plus one "universal" path.
//!
//! # Lookup rule
//!
//! ```text
//! keyboard:  keyboard[id]  ──► universal  ──► none
//! mouse:     mouse[id]     ──► none
//! ```
//!
//! Only keyboard lookups fall back to the universal sound.  An unmapped mouse
//! button is always silent.
//!
//! # Serialised form
//!
//! The field names on disk are `sounds`, `mouse_sounds` and `universal_sound`.
//! Every field is optional when reading so that a hand-edited file with only
//! some sections still loads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which family of input device an identifier belongs to.
///
/// Keyboard and mouse identifiers never collide, even when their textual forms
/// happen to be equal: each namespace has its own map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Keyboard,
    Mouse,
}

impl Namespace {
    /// Both namespaces, in display order.
    pub const ALL: [Namespace; 2] = [Namespace::Keyboard, Namespace::Mouse];

    /// Lower-case label used in dialogs and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Namespace::Keyboard => "keyboard",
            Namespace::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The complete set of sound assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSet {
    /// Keyboard identifier → sound path.
    #[serde(rename = "sounds", default)]
    keyboard: BTreeMap<String, String>,
    /// Mouse button identifier → sound path.
    #[serde(rename = "mouse_sounds", default)]
    mouse: BTreeMap<String, String>,
    /// Fallback for unmapped keyboard keys.  Empty means "not set".
    #[serde(rename = "universal_sound", default)]
    universal: String,
}

impl BindingSet {
    /// Creates an empty set with no universal sound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to `path` in `namespace`, replacing any previous binding.
    ///
    /// The path is stored verbatim; it is not checked for existence or format.
    pub fn assign(&mut self, namespace: Namespace, id: impl Into<String>, path: impl Into<String>) {
        self.map_mut(namespace).insert(id.into(), path.into());
    }

    /// Returns the sound for `id`, or `None` when nothing is configured.
    ///
    /// Keyboard lookups fall back to the universal sound; mouse lookups do not.
    pub fn resolve(&self, namespace: Namespace, id: &str) -> Option<&str> {
        if let Some(path) = self.map(namespace).get(id) {
            return Some(path.as_str());
        }
        match namespace {
            Namespace::Keyboard => self.universal(),
            Namespace::Mouse => None,
        }
    }

    /// Returns the universal sound, or `None` when it is unset.
    pub fn universal(&self) -> Option<&str> {
        if self.universal.is_empty() {
            None
        } else {
            Some(self.universal.as_str())
        }
    }

    /// Sets the universal sound.  An empty string unsets it.
    pub fn set_universal(&mut self, path: impl Into<String>) {
        self.universal = path.into();
    }

    /// Removes every binding and the universal sound.
    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.mouse.clear();
        self.universal.clear();
    }

    /// Iterates the bindings of one namespace in identifier order.
    pub fn entries(&self, namespace: Namespace) -> impl Iterator<Item = (&str, &str)> {
        self.map(namespace)
            .iter()
            .map(|(id, path)| (id.as_str(), path.as_str()))
    }

    /// Number of bindings in `namespace`.
    pub fn len(&self, namespace: Namespace) -> usize {
        self.map(namespace).len()
    }

    /// `true` when there are no bindings and no universal sound.
    pub fn is_empty(&self) -> bool {
        self.keyboard.is_empty() && self.mouse.is_empty() && self.universal.is_empty()
    }

    fn map(&self, namespace: Namespace) -> &BTreeMap<String, String> {
        match namespace {
            Namespace::Keyboard => &self.keyboard,
            Namespace::Mouse => &self.mouse,
        }
    }

    fn map_mut(&mut self, namespace: Namespace) -> &mut BTreeMap<String, String> {
        match namespace {
            Namespace::Keyboard => &mut self.keyboard,
            Namespace::Mouse => &mut self.mouse,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
