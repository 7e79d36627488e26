use tracing::debug;

use crate::catalog::ExperimentId;
use crate::effects::Effect;
use crate::filter::{Choice, ExperimentFilters};
use crate::settings::{CHARGE_STRENGTH_RANGE, LINK_DISTANCE_RANGE, VELOCITY_DECAY_RANGE};
use crate::store::{ActiveTab, Store};

/// Actions that can be dispatched to modify the dashboard state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    /// Switch the visible tab
    SetActiveTab { tab: ActiveTab },

    // Search and filters
    SetSearchQuery { query: String },
    SetCategoryFilter { choice: Choice },
    SetYearFilter { choice: Choice },
    SetMissionFilter { choice: Choice },
    SetOrganismFilter { choice: Choice },
    /// Reset every categorical filter to "all"
    ClearFilters,

    // Detail modal
    OpenExperiment { id: ExperimentId },
    CloseExperiment,

    // Knowledge graph
    SetLinkDistance { value: f32 },
    SetChargeStrength { value: f32 },
    SetVelocityDecay { value: f32 },
    /// Throw away the current layout and lay the graph out again
    RerunLayout,
    SetShowLabels { show: bool },
}

/// Apply a single action to modify the store state
pub fn update(store: &mut Store, action: Action) -> Vec<Effect> {
    match action {
        Action::SetActiveTab { tab } => {
            let previous = store.active_tab;
            if previous == tab {
                return vec![];
            }
            debug!(from = ?previous, to = ?tab, "switching tab");
            store.active_tab = tab;
            let mut effects = Vec::new();
            if previous == ActiveTab::KnowledgeGraph {
                effects.push(Effect::StopLayout);
            }
            if tab == ActiveTab::KnowledgeGraph {
                effects.push(Effect::StartLayout);
            }
            effects
        }

        Action::SetSearchQuery { query } => {
            store.search_query = query;
            vec![]
        }
        Action::SetCategoryFilter { choice } => {
            store.filters.category = choice;
            vec![]
        }
        Action::SetYearFilter { choice } => {
            store.filters.year = choice;
            vec![]
        }
        Action::SetMissionFilter { choice } => {
            store.filters.mission = choice;
            vec![]
        }
        Action::SetOrganismFilter { choice } => {
            store.filters.organism = choice;
            vec![]
        }
        Action::ClearFilters => {
            store.filters = ExperimentFilters::default();
            vec![]
        }

        Action::OpenExperiment { id } => {
            debug!(id, "opening experiment");
            store.selected_experiment = Some(id);
            vec![]
        }
        Action::CloseExperiment => {
            store.selected_experiment = None;
            vec![]
        }

        Action::SetLinkDistance { value } => {
            store.layout.link_distance = LINK_DISTANCE_RANGE.clamp(value);
            vec![Effect::ApplyForceParams]
        }
        Action::SetChargeStrength { value } => {
            store.layout.charge_strength = CHARGE_STRENGTH_RANGE.clamp(value);
            vec![Effect::ApplyForceParams]
        }
        Action::SetVelocityDecay { value } => {
            store.layout.velocity_decay = VELOCITY_DECAY_RANGE.clamp(value);
            vec![Effect::ApplyForceParams]
        }
        Action::RerunLayout => {
            if store.active_tab == ActiveTab::KnowledgeGraph {
                vec![Effect::StartLayout]
            } else {
                vec![]
            }
        }
        Action::SetShowLabels { show } => {
            store.show_labels = show;
            vec![]
        }
    }
}
