//! Accumulator for code-split modules touched during a render.

use std::collections::HashSet;

/// Ordered set of logical module identifiers.
///
/// Owned by a single render; duplicates collapse onto the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct ModuleCollector {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ModuleCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touched module. Returns `false` if it was already recorded.
    pub fn record(&mut self, module: impl Into<String>) -> bool {
        let module = module.into();
        if self.seen.contains(&module) {
            return false;
        }
        self.seen.insert(module.clone());
        self.order.push(module);
        true
    }

    /// Whether a module was touched.
    pub fn contains(&self, module: &str) -> bool {
        self.seen.contains(module)
    }

    /// Touched modules in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Number of distinct modules.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was touched.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ModuleCollector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut collector = Self::new();
        for module in iter {
            collector.record(module);
        }
        collector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut collector = ModuleCollector::new();
        assert!(collector.record("Profile"));
        assert!(collector.record("Home"));
        assert!(!collector.record("Profile"));

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.iter().collect::<Vec<_>>(), vec!["Profile", "Home"]);
    }

    #[test]
    fn test_contains() {
        let collector: ModuleCollector = ["a", "b"].into_iter().collect();
        assert!(collector.contains("a"));
        assert!(!collector.contains("c"));
    }
}
