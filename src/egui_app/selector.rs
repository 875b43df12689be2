//! Cascading comparator -> scenario -> model selection for one model block.

use crate::results::{ModelPath, ResultTree};

/// Options of one combo box and the chosen index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Choice {
    options: Vec<String>,
    selected: Option<usize>,
}

impl Choice {
    fn repopulate(&mut self, options: Vec<String>) {
        self.selected = if options.is_empty() { None } else { Some(0) };
        self.options = options;
    }

    fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }
}

/// One model block: three dependent choices over the same tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorChain {
    comparator: Choice,
    scenario: Choice,
    model: Choice,
}

impl SelectorChain {
    /// Fill comparators from the tree and cascade from the first one.
    pub fn new(tree: &ResultTree) -> Self {
        let mut chain = Self {
            comparator: Choice::default(),
            scenario: Choice::default(),
            model: Choice::default(),
        };
        chain
            .comparator
            .repopulate(tree.comparators().map(str::to_string).collect());
        chain.comparator_changed(tree);
        chain
    }

    pub fn comparator(&self) -> &Choice {
        &self.comparator
    }

    pub fn scenario(&self) -> &Choice {
        &self.scenario
    }

    pub fn model(&self) -> &Choice {
        &self.model
    }

    /// Pick a comparator; scenarios and models are rebuilt from scratch.
    /// Returns `false` if `name` is not one of the current options.
    pub fn select_comparator(&mut self, tree: &ResultTree, name: &str) -> bool {
        if !self.comparator.select(name) {
            return false;
        }
        self.comparator_changed(tree);
        true
    }

    /// Pick a scenario; models are rebuilt from scratch.
    pub fn select_scenario(&mut self, tree: &ResultTree, name: &str) -> bool {
        if !self.scenario.select(name) {
            return false;
        }
        self.scenario_changed(tree);
        true
    }

    pub fn select_model(&mut self, name: &str) -> bool {
        self.model.select(name)
    }

    /// The full selection, or `None` while any level is empty.
    pub fn resolve(&self) -> Option<ModelPath> {
        Some(ModelPath::new(
            self.comparator.selected()?,
            self.scenario.selected()?,
            self.model.selected()?,
        ))
    }

    fn comparator_changed(&mut self, tree: &ResultTree) {
        let scenarios = self
            .comparator
            .selected()
            .map(|comparator| tree.scenarios(comparator))
            .unwrap_or_default();
        self.scenario.repopulate(scenarios);
        self.scenario_changed(tree);
    }

    fn scenario_changed(&mut self, tree: &ResultTree) {
        let models = match (self.comparator.selected(), self.scenario.selected()) {
            (Some(comparator), Some(scenario)) => tree.models(comparator, scenario),
            _ => Vec::new(),
        };
        self.model.repopulate(models);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ResultTree {
        ResultTree::from_json_str(
            r#"{
                "lstm_vs_cnn": {
                    "clean": {"lstm": {}, "cnn": {}},
                    "noisy": {"cnn_big": {}}
                },
                "ablation": {
                    "no_dropout": {"mlp": {}, "mlp_wide": {}, "mlp_deep": {}}
                },
                "empty": {},
                "hollow": {"nothing_here": {}}
            }"#,
            "test",
        )
        .unwrap()
    }

    #[test]
    fn construction_cascades_from_first_comparator() {
        let tree = tree();
        let chain = SelectorChain::new(&tree);
        assert_eq!(
            chain.comparator().options(),
            ["lstm_vs_cnn", "ablation", "empty", "hollow"]
        );
        assert_eq!(chain.scenario().options(), ["clean", "noisy"]);
        assert_eq!(chain.model().options(), ["lstm", "cnn"]);
        assert_eq!(chain.resolve(), Some(ModelPath::new("lstm_vs_cnn", "clean", "lstm")));
    }

    #[test]
    fn every_comparator_lists_exactly_its_scenarios() {
        let tree = tree();
        let mut chain = SelectorChain::new(&tree);
        let comparators: Vec<String> = tree.comparators().map(str::to_string).collect();
        for comparator in &comparators {
            assert!(chain.select_comparator(&tree, comparator));
            assert_eq!(chain.scenario().options(), tree.scenarios(comparator).as_slice());
        }
    }

    #[test]
    fn comparator_change_replaces_stale_options() {
        let tree = tree();
        let mut chain = SelectorChain::new(&tree);
        assert!(chain.select_scenario(&tree, "noisy"));
        assert!(chain.select_model("cnn_big"));

        assert!(chain.select_comparator(&tree, "ablation"));
        assert_eq!(chain.scenario().options(), ["no_dropout"]);
        assert_eq!(chain.model().options(), ["mlp", "mlp_wide", "mlp_deep"]);
        assert_eq!(chain.model().selected(), Some("mlp"));
    }

    #[test]
    fn scenario_change_only_rebuilds_models() {
        let tree = tree();
        let mut chain = SelectorChain::new(&tree);
        assert!(chain.select_scenario(&tree, "noisy"));
        assert_eq!(chain.scenario().options(), ["clean", "noisy"]);
        assert_eq!(chain.model().options(), ["cnn_big"]);
        assert_eq!(chain.resolve(), Some(ModelPath::new("lstm_vs_cnn", "noisy", "cnn_big")));
    }

    #[test]
    fn empty_parent_leaves_dependents_empty() {
        let tree = tree();
        let mut chain = SelectorChain::new(&tree);
        assert!(chain.select_comparator(&tree, "empty"));
        assert!(chain.scenario().options().is_empty());
        assert!(chain.model().options().is_empty());
        assert_eq!(chain.resolve(), None);

        assert!(chain.select_comparator(&tree, "hollow"));
        assert_eq!(chain.scenario().options(), ["nothing_here"]);
        assert!(chain.model().options().is_empty());
        assert_eq!(chain.resolve(), None);
    }

    #[test]
    fn unknown_values_are_rejected() {
        let tree = tree();
        let mut chain = SelectorChain::new(&tree);
        let before = chain.clone();
        assert!(!chain.select_comparator(&tree, "missing"));
        assert!(!chain.select_scenario(&tree, "no_dropout"));
        assert!(!chain.select_model("mlp"));
        assert_eq!(chain, before);
    }

    #[test]
    fn empty_tree_yields_no_selection() {
        let tree = ResultTree::default();
        let chain = SelectorChain::new(&tree);
        assert!(chain.comparator().options().is_empty());
        assert_eq!(chain.resolve(), None);
    }
}
