use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::catalog::{Catalog, ExperimentId};
use crate::effects::{self, Effect};
use crate::error::AppError;
use crate::graph_view::{GraphHost, GraphSession};
use crate::knowledge::KnowledgeGraph;
use crate::settings::AppSettings;
use crate::store::Store;
use crate::view::{self, Page};

pub struct State {
    pub store: Store,
    pub cache: Cache,
    pub catalog: Catalog,
    pub graph: GraphHost,
    pub settings: AppSettings,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(
        settings: AppSettings,
        catalog: Catalog,
        knowledge: KnowledgeGraph,
    ) -> Result<Self, AppError> {
        let viewport = settings.canvas.viewport();
        // A layout that cannot be built now would fail on every tab visit.
        GraphSession::new(&knowledge, settings.layout, viewport)?;
        Ok(Self {
            store: Store::from_settings(&settings),
            cache: Cache::new(),
            catalog,
            graph: GraphHost::new(knowledge, viewport),
            settings,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        })
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.graph, &self.store, effect);
        }
    }

    pub fn filtered(&mut self) -> &[ExperimentId] {
        self.cache.filtered(&self.store, &self.catalog)
    }

    pub fn page(&mut self) -> Page {
        let filtered = self.cache.filtered(&self.store, &self.catalog);
        view::render(&self.store, &self.catalog, filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Choice;
    use crate::knowledge::{concept, relation};
    use crate::store::ActiveTab;

    fn state() -> State {
        State::new(
            AppSettings::default(),
            Catalog::builtin(),
            KnowledgeGraph::builtin().expect("builtin graph"),
        )
        .expect("state")
    }

    fn run(state: &mut State, action: Action) {
        state.dispatch(action);
        state.flush_actions();
        state.flush_effects();
    }

    #[test]
    fn graph_session_lives_only_on_graph_tab() {
        let mut state = state();
        assert!(state.graph.session().is_none());

        let tab = ActiveTab::KnowledgeGraph;
        run(&mut state, Action::SetActiveTab { tab });
        let session = state.graph.session_mut().expect("session started");
        for _ in 0..10 {
            session.advance(force_layout::Viewport::default());
        }
        assert_eq!(session.simulation().ticks(), 10);

        let tab = ActiveTab::Experiments;
        run(&mut state, Action::SetActiveTab { tab });
        assert!(state.graph.session().is_none());

        let tab = ActiveTab::KnowledgeGraph;
        run(&mut state, Action::SetActiveTab { tab });
        let fresh = state.graph.session().expect("session restarted");
        assert_eq!(fresh.simulation().ticks(), 0, "re-entering lays out from scratch");
    }

    #[test]
    fn slider_changes_reach_running_layout() {
        let mut state = state();
        let tab = ActiveTab::KnowledgeGraph;
        run(&mut state, Action::SetActiveTab { tab });
        run(&mut state, Action::SetLinkDistance { value: 120.0 });
        let session = state.graph.session().expect("session");
        assert_eq!(session.simulation().params().link_distance, 120.0);
    }

    #[test]
    fn actions_queue_until_flushed() {
        let mut state = state();
        let query = "bone".to_string();
        state.dispatch(Action::SetSearchQuery { query });
        assert_eq!(state.filtered().len(), 6);
        state.flush_actions();
        assert_eq!(state.filtered(), &[2]);
    }

    #[test]
    fn filters_go_through_the_memo() {
        let mut state = state();
        let choice = Choice::parse("2023");
        run(&mut state, Action::SetYearFilter { choice });
        state.page();
        state.page();
        assert_eq!(state.cache.filtered_experiments.recomputations(), 1);
        run(&mut state, Action::OpenExperiment { id: 5 });
        let page = state.page();
        assert_eq!(page.detail.map(|d| d.id), Some(5));
        assert_eq!(state.cache.filtered_experiments.recomputations(), 1);
    }

    #[test]
    fn unlayoutable_graph_fails_at_startup() {
        let concepts = [concept("a", "effect", 10), concept("b", "effect", 10)];
        let relations = [relation("a", "b", 0)];
        let knowledge = KnowledgeGraph::build(&concepts, &relations).expect("ids resolve");
        let result = State::new(AppSettings::default(), Catalog::builtin(), knowledge);
        assert!(matches!(result, Err(AppError::Layout(_))));
    }
}
