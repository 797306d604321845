use std::time::Duration;

use indexmap::IndexMap;

use crate::core::Transition;

/// Opacity of a hidden series' path, markers and legend entry.
pub const HIDDEN_OPACITY: f64 = 0.2;
pub const VISIBLE_OPACITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    visible: bool,
    opacity: Transition<f64>,
}

impl LegendEntry {
    fn new() -> Self {
        Self {
            visible: true,
            opacity: Transition::settled(VISIBLE_OPACITY),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opacity currently displayed, mid-transition values included.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.current()
    }

    #[must_use]
    pub fn target_opacity(&self) -> f64 {
        *self.opacity.target()
    }
}

/// Per-board legend keyed by series name, in series order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    entries: IndexMap<String, LegendEntry>,
}

impl Legend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligns the entries with `names`.
    ///
    /// Names already present keep their visibility; new names start visible;
    /// names no longer drawn are dropped.
    pub fn sync<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = IndexMap::new();
        for name in names {
            let entry = self
                .entries
                .swap_remove(name)
                .unwrap_or_else(LegendEntry::new);
            next.insert(name.to_owned(), entry);
        }
        self.entries = next;
    }

    /// Flips visibility of `name`, animating over `duration`.
    ///
    /// Returns the new visibility, or `None` for an unknown series.
    pub fn toggle(&mut self, name: &str, duration: Duration) -> Option<bool> {
        let entry = self.entries.get_mut(name)?;
        entry.visible = !entry.visible;
        let target = if entry.visible {
            VISIBLE_OPACITY
        } else {
            HIDDEN_OPACITY
        };
        entry.opacity.retarget(target, duration);
        Some(entry.visible)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        for entry in self.entries.values_mut() {
            entry.opacity.advance(elapsed);
        }
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&LegendEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LegendEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    #[must_use]
    pub fn is_visible(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(LegendEntry::is_visible)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries
            .values()
            .all(|entry| entry.opacity.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{HIDDEN_OPACITY, Legend};

    #[test]
    fn sync_keeps_hidden_entries_hidden() {
        let mut legend = Legend::new();
        legend.sync(["A", "B"]);
        legend.toggle("B", Duration::ZERO);
        legend.sync(["B", "C"]);
        assert!(!legend.is_visible("B"));
        assert!(legend.is_visible("C"));
        assert!(legend.entry("A").is_none());
        let order: Vec<&str> = legend.entries().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["B", "C"]);
    }

    #[test]
    fn toggle_animates_toward_hidden_opacity() {
        let mut legend = Legend::new();
        legend.sync(["A"]);
        assert_eq!(legend.toggle("A", Duration::from_millis(100)), Some(false));
        let entry = legend.entry("A").expect("entry exists");
        assert_eq!(entry.opacity(), 1.0);
        assert_eq!(entry.target_opacity(), HIDDEN_OPACITY);
        legend.advance(Duration::from_millis(100));
        assert!(legend.is_settled());
        assert_eq!(legend.toggle("missing", Duration::ZERO), None);
    }
}
