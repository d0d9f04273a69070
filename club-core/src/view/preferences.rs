use serde::{Deserialize, Serialize};

/// Per-session UI preferences, owned by the caller and passed where needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPreferences {
    /// The global-search shortcut hint has already been shown.
    #[serde(default)]
    pub shortcut_hint_seen: bool,
}

impl SessionPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_show_shortcut_hint(&self) -> bool {
        !self.shortcut_hint_seen
    }

    pub fn mark_shortcut_hint_seen(&mut self) {
        self.shortcut_hint_seen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_shown_once() {
        let mut prefs = SessionPreferences::new();
        assert!(prefs.should_show_shortcut_hint());
        prefs.mark_shortcut_hint_seen();
        assert!(!prefs.should_show_shortcut_hint());
    }
}
