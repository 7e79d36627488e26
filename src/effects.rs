use tracing::error;

use crate::graph_view::GraphHost;
use crate::store::Store;

/// Deferred effects that touch the live layout rather than the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Lay the knowledge graph out from scratch
    StartLayout,
    /// Drop the running layout
    StopLayout,
    /// Push the store's force parameters into the running layout
    ApplyForceParams,
}

/// Execute a single effect against the graph host
pub fn run(graph: &mut GraphHost, store: &Store, effect: Effect) {
    match effect {
        Effect::StartLayout => {
            if let Err(e) = graph.start(store.layout) {
                error!(error = %e, "failed to start layout");
                graph.stop();
            }
        }
        Effect::StopLayout => graph.stop(),
        Effect::ApplyForceParams => graph.apply_params(store.layout),
    }
}
