use force_layout::ForceParams;
use serde::{Deserialize, Serialize};

use crate::catalog::ExperimentId;
use crate::filter::ExperimentFilters;
use crate::settings::AppSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveTab {
    #[default]
    Dashboard,
    Experiments,
    KnowledgeGraph,
    Insights,
    ResearchGaps,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 5] = [
        ActiveTab::Dashboard,
        ActiveTab::Experiments,
        ActiveTab::KnowledgeGraph,
        ActiveTab::Insights,
        ActiveTab::ResearchGaps,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Dashboard => "Dashboard",
            ActiveTab::Experiments => "Experiments",
            ActiveTab::KnowledgeGraph => "Knowledge Graph",
            ActiveTab::Insights => "AI Insights",
            ActiveTab::ResearchGaps => "Research Gaps",
        }
    }
}

/// Everything the UI needs to redraw itself, and nothing derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub active_tab: ActiveTab,
    pub search_query: String,
    pub filters: ExperimentFilters,
    /// Experiment shown in the detail modal.
    pub selected_experiment: Option<ExperimentId>,
    pub layout: ForceParams,
    pub show_labels: bool,
}

impl Store {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            layout: settings.layout,
            show_labels: settings.show_labels,
            ..Self::default()
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::default(),
            search_query: String::new(),
            filters: ExperimentFilters::default(),
            selected_experiment: None,
            layout: ForceParams::default(),
            show_labels: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_through_json() {
        let mut store = Store::default();
        store.active_tab = ActiveTab::Insights;
        store.search_query = "bone".to_string();
        store.selected_experiment = Some(2);
        let json = serde_json::to_string(&store).expect("serialize");
        let back: Store = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, store);
    }

    #[test]
    fn tabs_have_distinct_labels() {
        let labels: Vec<&str> = ActiveTab::ALL.iter().map(ActiveTab::label).collect();
        assert_eq!(labels.len(), 5);
        for (i, l) in labels.iter().enumerate() {
            assert!(!labels[i + 1..].contains(l));
        }
    }
}
