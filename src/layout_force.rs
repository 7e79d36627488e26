use eframe::egui::{self, Pos2};
use egui_graphs::{DisplayEdge, DisplayNode, Graph, Layout, LayoutState};
use petgraph::EdgeType;
use petgraph::graph::IndexType;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Node positions computed by the force engine for the current frame.
/// Index `i` belongs to graph node `i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStateForce {
    pub positions: Vec<Pos2>,
}

impl LayoutState for LayoutStateForce {}

/// Places every node where the force engine put it. The engine runs
/// outside the widget, so this layout only copies positions.
#[derive(Debug, Clone, Default)]
pub struct LayoutForce {
    state: LayoutStateForce,
}

impl Layout<LayoutStateForce> for LayoutForce {
    fn from_state(state: LayoutStateForce) -> impl Layout<LayoutStateForce> {
        Self { state }
    }

    fn next<N, E, Ty, Ix, Dn, De>(&mut self, g: &mut Graph<N, E, Ty, Ix, Dn, De>, _ui: &egui::Ui)
    where
        N: Clone,
        E: Clone,
        Ty: EdgeType,
        Ix: IndexType,
        Dn: DisplayNode<N, E, Ty, Ix>,
        De: DisplayEdge<N, E, Ty, Ix, Dn>,
    {
        apply_positions(g, &self.state.positions);
    }

    fn state(&self) -> LayoutStateForce {
        self.state.clone()
    }
}

/// Move node `i` to `positions[i]`. Extra positions are ignored.
pub fn apply_positions<N, E, Ty, Ix, Dn, De>(
    g: &mut Graph<N, E, Ty, Ix, Dn, De>,
    positions: &[Pos2],
) where
    N: Clone,
    E: Clone,
    Ty: EdgeType,
    Ix: IndexType,
    Dn: DisplayNode<N, E, Ty, Ix>,
    De: DisplayEdge<N, E, Ty, Ix, Dn>,
{
    for (i, &pos) in positions.iter().enumerate() {
        if let Some(node) = g.node_mut(NodeIndex::<Ix>::new(i)) {
            node.set_location(pos);
        }
    }
}
