//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Same as the toolbar action.
    Ui(UiAction),
    /// Drop the point being dragged where it is.
    CancelDrag,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", ShortcutAction::Ui(UiAction::AddPoint), "Add a point at the center"),
            Shortcut::new("Escape", ShortcutAction::CancelDrag, "Cancel the current drag"),
        ]
    }

    /// Look up the action bound to a key name (case-insensitive).
    pub fn lookup(key: &str) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
            .map(|s| s.action)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:10} {}", shortcut.key, shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("a"), Some(ShortcutAction::Ui(UiAction::AddPoint)));
        assert_eq!(ShortcutRegistry::lookup("A"), Some(ShortcutAction::Ui(UiAction::AddPoint)));
        assert_eq!(ShortcutRegistry::lookup("Escape"), Some(ShortcutAction::CancelDrag));
        assert_eq!(ShortcutRegistry::lookup("z"), None);
    }

    #[test]
    fn test_keys_are_unique() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| !b.key.eq_ignore_ascii_case(a.key)));
        }
    }
}
