use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::data::dataset::Dataset;

/// Known methods and the subset currently chosen for display.
#[derive(Clone, Debug, Default)]
pub struct FilterController {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl FilterController {
    /// Every method of `dataset` starts out selected.
    pub fn new(dataset: &Dataset) -> Self {
        let mut filter = Self::default();
        filter.reset(dataset);
        filter
    }

    /// Recompute the method set after a reload and select all of it again.
    pub fn reset(&mut self, dataset: &Dataset) {
        self.available = dataset.methods();
        self.select_all();
    }

    /// Methods in order of first appearance in the dataset.
    pub fn available_methods(&self) -> &[String] {
        &self.available
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.iter().cloned().collect();
    }

    /// Replace the selection. Names that are not known methods are dropped.
    pub fn set_selection<I, S>(&mut self, chosen: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (known, unknown): (Vec<String>, Vec<String>) = chosen
            .into_iter()
            .map(Into::<String>::into)
            .partition(|m| self.available.contains(m));

        if !unknown.is_empty() {
            warn!("Ignoring unknown methods in selection: {}", unknown.join(", "));
        }
        self.selected = known.into_iter().collect();
        debug!("Selection is now {:?}", self.selected);
    }

    pub fn is_selected(&self, method: &str) -> bool {
        self.selected.contains(method)
    }

    /// Records of selected methods, relative order preserved.
    pub fn filtered(&self, dataset: &Dataset) -> Dataset {
        dataset.iter().filter(|r| self.is_selected(&r.method)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Record;
    use crate::data::parser::Measurement;

    fn two_methods() -> Dataset {
        let mut records = Vec::new();
        for i in 0..5 {
            for method in ["A", "B"] {
                records.push(Record::new(
                    method,
                    Measurement { index: i, elapsed_seconds: i as f64 * 0.1, size_bytes: 8 * i },
                ));
            }
        }
        Dataset::new(records)
    }

    #[test]
    fn defaults_to_every_method() {
        let ds = two_methods();
        let filter = FilterController::new(&ds);
        assert_eq!(filter.available_methods(), ["A", "B"]);
        assert_eq!(filter.filtered(&ds), ds);
    }

    #[test]
    fn selecting_one_method_keeps_its_records_in_order() {
        let ds = two_methods();
        let mut filter = FilterController::new(&ds);
        filter.set_selection(["A"]);

        let out = filter.filtered(&ds);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|r| r.method == "A"));
        let indices: Vec<u64> = out.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_selection_filters_everything() {
        let ds = two_methods();
        let mut filter = FilterController::new(&ds);
        filter.set_selection(Vec::<String>::new());
        assert!(filter.filtered(&ds).is_empty());
    }

    #[test]
    fn unknown_methods_are_tolerated() {
        let ds = two_methods();
        let mut filter = FilterController::new(&ds);
        filter.set_selection(["B", "nope"]);
        assert_eq!(filter.selection().iter().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(filter.filtered(&ds).len(), 5);
    }

    #[test]
    fn mixed_selection_keeps_known_names_once() {
        let ds = two_methods();
        let mut filter = FilterController::new(&ds);
        filter.set_selection(vec!["A".to_string(), "ghost".to_string(), "A".to_string()]);
        assert_eq!(filter.selection().len(), 1);
        assert!(filter.is_selected("A"));
        assert!(!filter.is_selected("ghost"));
        assert!(filter.filtered(&ds).iter().all(|r| r.method == "A"));
    }

    #[test]
    fn reset_selects_all_of_the_new_dataset() {
        let ds = two_methods();
        let mut filter = FilterController::new(&ds);
        filter.set_selection(["A"]);

        let reloaded = Dataset::new(vec![Record::new(
            "C",
            Measurement { index: 0, elapsed_seconds: 0.0, size_bytes: 0 },
        )]);
        filter.reset(&reloaded);
        assert_eq!(filter.available_methods(), ["C"]);
        assert!(filter.is_selected("C"));
        assert!(!filter.is_selected("A"));
    }
}
