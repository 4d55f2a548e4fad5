use indexmap::IndexSet;
use std::collections::BTreeMap;

/// Per-platform component picks made in the view layer.
///
/// This is caller-owned state: stores never see it, and clearing or
/// replacing it has no effect on inventory records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSelection {
    selected: BTreeMap<String, IndexSet<String>>,
}

impl ComponentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the component when absent, removes it when present.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, platform_id: &str, component_id: &str) -> bool {
        let picks = self.selected.entry(platform_id.to_string()).or_default();
        if picks.shift_remove(component_id) {
            false
        } else {
            picks.insert(component_id.to_string());
            true
        }
    }

    /// Replaces the whole selection for a platform
    pub fn set<I, S>(&mut self, platform_id: &str, component_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let picks = component_ids.into_iter().map(Into::into).collect();
        self.selected.insert(platform_id.to_string(), picks);
    }

    pub fn clear(&mut self, platform_id: &str) {
        self.selected.remove(platform_id);
    }

    /// Selected component ids for a platform, in selection order
    pub fn selected(&self, platform_id: &str) -> Vec<&str> {
        self.selected
            .get(platform_id)
            .map(|picks| picks.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, platform_id: &str, component_id: &str) -> bool {
        self.selected
            .get(platform_id)
            .is_some_and(|picks| picks.contains(component_id))
    }
}
