// Graph view module - owns the live layout session for the knowledge graph
// tab and renders it through egui_graphs.

use eframe::egui::{self, Pos2, Sense, Vec2};
use egui_graphs::{Graph, GraphView, SettingsInteraction};
use force_layout::{DragState, ForceParams, LayoutError, Simulation, StepReport, Viewport};
use petgraph::Undirected;
use petgraph::graph::DefaultIx;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use tracing::{info, warn};

use crate::knowledge::{Concept, ConceptGroup, KnowledgeGraph};
use crate::layout_force::{LayoutForce, LayoutStateForce};
use crate::node_shapes::{ConceptNodeShape, RelationEdgeShape};
use crate::theme;

pub type ConceptGraphDisplay =
    Graph<Concept, f32, Undirected, DefaultIx, ConceptNodeShape, RelationEdgeShape>;

pub type ConceptGraphView<'a> = GraphView<
    'a,
    Concept,
    f32,
    Undirected,
    DefaultIx,
    ConceptNodeShape,
    RelationEdgeShape,
    LayoutStateForce,
    LayoutForce,
>;

/// Display graph with the same node order as `knowledge`, so display
/// indices and engine indices agree.
pub fn setup_concept_display(knowledge: &KnowledgeGraph) -> ConceptGraphDisplay {
    let mut source: StableGraph<Concept, f32, Undirected> =
        StableGraph::with_capacity(knowledge.concept_count(), knowledge.relation_count());
    for concept in knowledge.concepts() {
        source.add_node(concept.clone());
    }
    for (from, to, weight) in knowledge.relations() {
        source.add_edge(NodeIndex::new(from), NodeIndex::new(to), weight);
    }

    let mut graph = ConceptGraphDisplay::from(&source);
    for (idx, concept) in source.node_indices().zip(source.node_weights()) {
        if let Some(node) = graph.node_mut(idx) {
            node.set_label(concept.label());
        }
    }
    let edge_indices: Vec<_> = graph.edges_iter().map(|(idx, _)| idx).collect();
    for idx in edge_indices {
        if let Some(edge) = graph.edge_mut(idx) {
            edge.set_label(String::new());
        }
    }
    graph
}

// -------------------------------------------------------------------
// Session
// -------------------------------------------------------------------

/// One laid-out graph, alive while the graph tab is visible.
pub struct GraphSession {
    simulation: Simulation,
    display: ConceptGraphDisplay,
}

impl GraphSession {
    pub fn new(
        knowledge: &KnowledgeGraph,
        params: ForceParams,
        viewport: Viewport,
    ) -> Result<Self, LayoutError> {
        let simulation = Simulation::new(
            &knowledge.node_specs(),
            &knowledge.link_specs(),
            params,
            viewport,
        )?;
        let mut session = Self {
            simulation,
            display: setup_concept_display(knowledge),
        };
        session.sync_display();
        Ok(session)
    }

    #[cfg(test)]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[cfg(test)]
    pub fn display(&self) -> &ConceptGraphDisplay {
        &self.display
    }

    pub fn hovered(&self) -> Option<usize> {
        self.display.hovered_node().map(|idx| idx.index())
    }

    pub fn dragged(&self) -> Option<usize> {
        match self.simulation.drag_state() {
            DragState::Dragging { node } => Some(node),
            DragState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.simulation.is_active()
    }

    pub fn set_params(&mut self, params: ForceParams) {
        self.simulation.set_params(params);
    }

    /// Mirror the widget's node drag into the engine. The grabbed node is
    /// pinned where the widget shows it and released when the widget lets
    /// go of it.
    pub fn follow_drag(&mut self) -> Result<(), LayoutError> {
        let grabbed = self
            .display
            .dragged_node()
            .and_then(|idx| self.display.node(idx).map(|n| (idx.index(), n.location())));
        match (grabbed, self.dragged()) {
            (Some((node, at)), Some(current)) if node == current => {
                self.simulation.drag_move(at);
            }
            (Some((node, at)), _) => self.simulation.drag_start(node, at)?,
            (None, Some(_)) => self.simulation.drag_end(),
            (None, None) => {}
        }
        Ok(())
    }

    /// Fit the layout to the canvas, advance one frame and move the
    /// display nodes to the new positions.
    pub fn advance(&mut self, viewport: Viewport) -> Option<StepReport> {
        self.simulation.resize(viewport);
        let report = self.simulation.step();
        self.sync_display();
        report
    }

    pub fn layout_state(&self) -> LayoutStateForce {
        LayoutStateForce {
            positions: self.simulation.positions().collect(),
        }
    }

    pub fn set_label_visibility(&mut self, visible: bool) {
        for i in 0..self.display.node_count() {
            if let Some(node) = self.display.node_mut(NodeIndex::new(i)) {
                node.display_mut().show_label = visible;
            }
        }
    }

    fn sync_display(&mut self) {
        let positions: Vec<Pos2> = self.simulation.positions().collect();
        crate::layout_force::apply_positions(&mut self.display, &positions);
    }
}

// -------------------------------------------------------------------
// Host
// -------------------------------------------------------------------

/// The knowledge graph plus the session that lays it out, when one exists.
pub struct GraphHost {
    knowledge: KnowledgeGraph,
    viewport: Viewport,
    session: Option<GraphSession>,
}

impl GraphHost {
    pub fn new(knowledge: KnowledgeGraph, viewport: Viewport) -> Self {
        Self {
            knowledge,
            viewport,
            session: None,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeGraph {
        &self.knowledge
    }

    pub fn session(&self) -> Option<&GraphSession> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> Option<&mut GraphSession> {
        self.session.as_mut()
    }

    /// Start a fresh layout, replacing any running one.
    pub fn start(&mut self, params: ForceParams) -> Result<(), LayoutError> {
        let session = GraphSession::new(&self.knowledge, params, self.viewport)?;
        info!(
            nodes = self.knowledge.concept_count(),
            links = self.knowledge.relation_count(),
            "layout started"
        );
        self.session = Some(session);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            info!("layout stopped");
        }
    }

    pub fn apply_params(&mut self, params: ForceParams) {
        if let Some(session) = &mut self.session {
            session.set_params(params);
        }
    }
}

// -------------------------------------------------------------------
// Rendering
// -------------------------------------------------------------------

fn settings_interaction() -> SettingsInteraction {
    SettingsInteraction::new().with_dragging_enabled(true)
}

/// Show the live layout in a canvas of at most `size` and keep
/// repainting while it moves.
pub fn show_canvas(ui: &mut egui::Ui, host: &mut GraphHost, size: Vec2, show_labels: bool) {
    let canvas = egui::vec2(ui.available_width().min(size.x), size.y);
    let GraphHost {
        knowledge, session, ..
    } = host;
    let Some(session) = session.as_mut() else {
        ui.allocate_ui(canvas, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Layout unavailable").color(theme::MUTED));
            });
        });
        return;
    };

    if let Err(e) = session.follow_drag() {
        warn!(error = %e, "could not follow node drag");
    }
    session.advance(Viewport::from_size(canvas));
    session.set_label_visibility(show_labels);
    egui_graphs::set_layout_state::<LayoutStateForce>(ui, session.layout_state(), None);

    let response = ui
        .allocate_ui_with_layout(canvas, egui::Layout::top_down(egui::Align::Center), |ui| {
            ui.painter()
                .rect_filled(ui.available_rect_before_wrap(), 8.0, theme::CANVAS);
            ui.add(
                &mut ConceptGraphView::new(&mut session.display)
                    .with_interactions(&settings_interaction()),
            )
        })
        .inner;

    if session.is_active() {
        ui.ctx().request_repaint();
    }

    if let Some(idx) = session.hovered()
        && session.dragged().is_none()
        && let Some(concept) = knowledge.concept(idx)
    {
        let neighbors = knowledge.neighbors(idx);
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(concept.label());
            ui.label(
                egui::RichText::new(concept.group.name())
                    .color(theme::group_color(&concept.group)),
            );
            if !neighbors.is_empty() {
                ui.separator();
                ui.label("Connected concepts:");
                for n in neighbors {
                    ui.label(format!("• {}", n.label()));
                }
            }
        });
    }
}

pub fn show_legend(ui: &mut egui::Ui) {
    ui.horizontal_wrapped(|ui| {
        for group in &ConceptGroup::KNOWN {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 8.0, theme::group_color(group));
            ui.label(group.legend_label());
            ui.add_space(12.0);
        }
    });
}
