use egui::{Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::body::{Body, Link, LinkSpec, NodeSpec};
use crate::error::LayoutError;
use crate::forces;
use crate::params::{ForceParams, Placement};
use crate::viewport::Viewport;

/// Radius of the first ring of the initial spiral.
const INITIAL_RADIUS: f32 = 10.0;

/// Pointer interaction with the layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { node: usize },
}

/// Outcome of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub alpha: f32,
    /// Largest distance any body moved during the step.
    pub max_displacement: f32,
}

/// Force-directed layout over a flat arena of bodies.
///
/// Links refer to bodies by index. The simulation cools as `alpha`
/// decays toward `alpha_target`; once `alpha` drops below
/// `alpha_min` the layout is considered settled and [`Simulation::step`]
/// does nothing until something reheats it.
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    links: Vec<Link>,
    link_specs: Vec<LinkSpec>,
    params: ForceParams,
    viewport: Viewport,
    alpha: f32,
    alpha_target: f32,
    drag: DragState,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    pub fn new(
        nodes: &[NodeSpec],
        links: &[LinkSpec],
        params: ForceParams,
        viewport: Viewport,
    ) -> Result<Self, LayoutError> {
        for (node, spec) in nodes.iter().enumerate() {
            if !(spec.radius > 0.0) {
                return Err(LayoutError::InvalidRadius {
                    node,
                    radius: spec.radius,
                });
            }
        }
        for (idx, spec) in links.iter().enumerate() {
            for node in [spec.source, spec.target] {
                if node >= nodes.len() {
                    return Err(LayoutError::LinkOutOfBounds {
                        link: idx,
                        node,
                        node_count: nodes.len(),
                    });
                }
            }
            if !(spec.weight > 0.0) {
                return Err(LayoutError::InvalidWeight {
                    link: idx,
                    weight: spec.weight,
                });
            }
        }

        let bodies = nodes.iter().map(|n| Body::new(n.radius)).collect();
        let mut sim = Self {
            bodies,
            links: Vec::new(),
            link_specs: links.to_vec(),
            params,
            viewport,
            alpha: 1.0,
            alpha_target: 0.0,
            drag: DragState::Idle,
            rng: StdRng::seed_from_u64(params.seed),
            ticks: 0,
        };
        sim.resolve_links();
        sim.place();
        Ok(sim)
    }

    fn resolve_links(&mut self) {
        let max_weight = self
            .link_specs
            .iter()
            .map(|l| l.weight)
            .fold(f32::MIN_POSITIVE, f32::max);
        self.links = self
            .link_specs
            .iter()
            .map(|spec| {
                Link::resolve(
                    spec,
                    &self.bodies,
                    max_weight,
                    self.params.link_stiffness,
                    self.params.mass_unit,
                )
            })
            .collect();
    }

    fn place(&mut self) {
        let center = self.viewport.center();
        match self.params.placement {
            Placement::Phyllotaxis => {
                let angle_step = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
                for (i, body) in self.bodies.iter_mut().enumerate() {
                    let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
                    let angle = i as f32 * angle_step;
                    body.position =
                        center + Vec2::new(radius * angle.cos(), radius * angle.sin());
                    body.velocity = Vec2::ZERO;
                }
            }
            Placement::Scatter => {
                let half = Vec2::new(self.viewport.width(), self.viewport.height()) / 4.0;
                for body in &mut self.bodies {
                    let dx = self.rng.random_range(-half.x..=half.x);
                    let dy = self.rng.random_range(-half.y..=half.y);
                    body.position = center + Vec2::new(dx, dy);
                    body.velocity = Vec2::ZERO;
                }
            }
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn position(&self, node: usize) -> Option<Pos2> {
        self.bodies.get(node).map(|b| b.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.bodies.iter().map(|b| b.position)
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the layout still moves and the host should keep stepping.
    pub fn is_active(&self) -> bool {
        self.alpha >= self.params.alpha_min
    }

    /// Restart cooling from `alpha`.
    pub fn reheat(&mut self, alpha: f32) {
        self.alpha = alpha.max(self.alpha);
    }

    /// Swap the force parameters and reheat. Placement and seed only take
    /// effect on the next fresh layout.
    pub fn set_params(&mut self, params: ForceParams) {
        self.params = params;
        self.resolve_links();
        self.reheat(1.0);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.reheat(self.params.drag_alpha_target);
        }
    }

    /// Advance the simulation by one step unconditionally.
    pub fn tick(&mut self) -> StepReport {
        let was_active = self.is_active();
        self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
        let alpha = self.alpha;
        let before: Vec<Pos2> = self.positions().collect();

        forces::apply_links(
            &mut self.bodies,
            &self.links,
            self.params.link_distance,
            alpha,
            &mut self.rng,
        );
        forces::apply_charge(
            &mut self.bodies,
            self.params.charge_strength,
            self.params.charge_distance_min,
            alpha,
            &mut self.rng,
        );
        forces::apply_centering(
            &mut self.bodies,
            self.viewport.center(),
            self.params.center_strength,
        );

        let keep = 1.0 - self.params.velocity_decay;
        for body in &mut self.bodies {
            if let Some(pin) = body.pin {
                body.position = pin;
                body.velocity = Vec2::ZERO;
                continue;
            }
            body.velocity *= keep;
            let next = body.position + body.velocity;
            if next.x.is_finite() && next.y.is_finite() {
                body.position = next;
            } else {
                body.velocity = Vec2::ZERO;
            }
        }

        self.ticks += 1;
        let max_displacement = before
            .iter()
            .zip(&self.bodies)
            .map(|(p, b)| p.distance(b.position))
            .fold(0.0, f32::max);

        if was_active && !self.is_active() {
            debug!(ticks = self.ticks, "layout settled");
        }

        StepReport {
            alpha,
            max_displacement,
        }
    }

    /// Advance one step if the layout is still active.
    pub fn step(&mut self) -> Option<StepReport> {
        self.is_active().then(|| self.tick())
    }

    /// Pin `node` at `pointer` and hold the layout warm until released.
    pub fn drag_start(&mut self, node: usize, pointer: Pos2) -> Result<(), LayoutError> {
        if node >= self.bodies.len() {
            return Err(LayoutError::UnknownNode {
                node,
                node_count: self.bodies.len(),
            });
        }
        if let DragState::Dragging { node: previous } = self.drag {
            self.bodies[previous].pin = None;
        }
        self.bodies[node].pin = Some(pointer);
        self.drag = DragState::Dragging { node };
        self.alpha_target = self.params.drag_alpha_target;
        self.reheat(self.params.drag_alpha_target);
        debug!(node, x = pointer.x, y = pointer.y, "drag started");
        Ok(())
    }

    pub fn drag_move(&mut self, pointer: Pos2) {
        if let DragState::Dragging { node } = self.drag {
            self.bodies[node].pin = Some(pointer);
        }
    }

    pub fn drag_end(&mut self) {
        if let DragState::Dragging { node } = self.drag {
            self.bodies[node].pin = None;
            debug!(node, "drag ended");
        }
        self.drag = DragState::Idle;
        self.alpha_target = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same topology as the built-in knowledge graph.
    fn concept_graph() -> (Vec<NodeSpec>, Vec<LinkSpec>) {
        let radii = [30.0, 25.0, 20.0, 20.0, 18.0, 15.0, 25.0, 20.0, 18.0, 22.0, 15.0, 15.0];
        let nodes = radii.iter().map(|&radius| NodeSpec { radius }).collect();
        let links = [
            (0, 2, 3.0),
            (0, 3, 3.0),
            (0, 4, 2.0),
            (1, 4, 2.0),
            (2, 6, 3.0),
            (3, 6, 3.0),
            (4, 7, 2.0),
            (4, 8, 2.0),
            (5, 7, 2.0),
            (9, 2, 2.0),
            (10, 3, 2.0),
            (11, 2, 1.0),
        ]
        .iter()
        .map(|&(source, target, weight)| LinkSpec {
            source,
            target,
            weight,
        })
        .collect();
        (nodes, links)
    }

    fn simulation() -> Simulation {
        let (nodes, links) = concept_graph();
        Simulation::new(&nodes, &links, ForceParams::default(), Viewport::default())
            .expect("valid graph")
    }

    #[test]
    fn rejects_link_to_missing_node() {
        let nodes = vec![NodeSpec { radius: 10.0 }; 2];
        let links = vec![LinkSpec {
            source: 0,
            target: 5,
            weight: 1.0,
        }];
        let err = Simulation::new(&nodes, &links, ForceParams::default(), Viewport::default())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::LinkOutOfBounds {
                link: 0,
                node: 5,
                node_count: 2
            }
        );
    }

    #[test]
    fn rejects_zero_weight_link() {
        let nodes = vec![NodeSpec { radius: 10.0 }; 2];
        let links = vec![LinkSpec {
            source: 0,
            target: 1,
            weight: 0.0,
        }];
        assert!(matches!(
            Simulation::new(&nodes, &links, ForceParams::default(), Viewport::default()),
            Err(LayoutError::InvalidWeight { link: 0, .. })
        ));
    }

    #[test]
    fn initial_placement_is_centered_and_distinct() {
        let sim = simulation();
        let center = sim.viewport().center();
        let positions: Vec<Pos2> = sim.positions().collect();
        for (i, p) in positions.iter().enumerate() {
            assert!(p.distance(center) < 50.0, "node {} starts near the center", i);
            for q in &positions[i + 1..] {
                assert!(p.distance(*q) > 1e-3, "initial positions must differ");
            }
        }
    }

    #[test]
    fn converges_within_bounded_steps() {
        let mut sim = simulation();
        let mut last = None;
        let mut steps = 0;
        while let Some(report) = sim.step() {
            last = Some(report);
            steps += 1;
            assert!(steps <= 400, "layout did not settle");
        }
        let last = last.expect("at least one step");
        assert!(
            last.max_displacement < 1.0,
            "final step moved {} units",
            last.max_displacement
        );
        assert!(!sim.is_active());
        assert!(sim.step().is_none(), "settled layout should idle");
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let mut a = simulation();
        let mut b = simulation();
        for _ in 0..50 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn settled_layout_is_spread_and_centered() {
        let mut sim = simulation();
        while sim.step().is_some() {}
        let bodies = sim.bodies();
        let n = bodies.len() as f32;
        let cx = bodies.iter().map(|b| b.position.x).sum::<f32>() / n;
        let cy = bodies.iter().map(|b| b.position.y).sum::<f32>() / n;
        let center = sim.viewport().center();
        assert!((cx - center.x).abs() < 1.0 && (cy - center.y).abs() < 1.0);
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                assert!(
                    a.position.distance(b.position) > 10.0,
                    "repulsion should keep nodes apart"
                );
            }
        }
    }

    #[test]
    fn pinned_node_tracks_pointer_every_step() {
        let mut sim = simulation();
        while sim.step().is_some() {}
        assert!(!sim.is_active());

        sim.drag_start(0, Pos2::new(100.0, 100.0)).unwrap();
        assert!(sim.is_active(), "drag should reheat a cooled layout");
        assert_eq!(sim.drag_state(), DragState::Dragging { node: 0 });

        for i in 0..30 {
            let pointer = Pos2::new(100.0 + i as f32 * 3.0, 120.0 - i as f32);
            sim.drag_move(pointer);
            sim.tick();
            assert_eq!(sim.position(0), Some(pointer));
            assert_eq!(sim.bodies()[0].velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn released_node_is_free_again() {
        let mut sim = simulation();
        sim.drag_start(3, Pos2::new(10.0, 10.0)).unwrap();
        sim.tick();
        sim.drag_end();

        assert_eq!(sim.drag_state(), DragState::Idle);
        assert!(!sim.bodies()[3].is_pinned());
        assert_eq!(sim.alpha_target(), 0.0);

        // Far from everything, forces should pull it back in.
        sim.tick();
        assert_ne!(sim.position(3), Some(Pos2::new(10.0, 10.0)));
    }

    #[test]
    fn layout_cools_again_after_release() {
        let mut sim = simulation();
        sim.drag_start(1, Pos2::new(200.0, 200.0)).unwrap();
        for _ in 0..20 {
            sim.tick();
        }
        sim.drag_end();
        let mut steps = 0;
        while sim.step().is_some() {
            steps += 1;
            assert!(steps <= 400);
        }
    }

    #[test]
    fn drag_on_unknown_node_fails() {
        let mut sim = simulation();
        assert!(matches!(
            sim.drag_start(99, Pos2::ZERO),
            Err(LayoutError::UnknownNode { node: 99, .. })
        ));
        assert_eq!(sim.drag_state(), DragState::Idle);
    }

    #[test]
    fn zero_viewport_stays_finite() {
        let mut sim = simulation();
        sim.resize(Viewport::new(0.0, 0.0));
        for _ in 0..100 {
            sim.tick();
        }
        for p in sim.positions() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn scatter_placement_depends_on_seed() {
        let (nodes, links) = concept_graph();
        let params = ForceParams {
            placement: Placement::Scatter,
            ..ForceParams::default()
        };
        let a = Simulation::new(&nodes, &links, params, Viewport::default()).unwrap();
        let b = Simulation::new(&nodes, &links, params, Viewport::default()).unwrap();
        let c = Simulation::new(
            &nodes,
            &links,
            ForceParams { seed: 99, ..params },
            Viewport::default(),
        )
        .unwrap();
        assert_eq!(a.bodies(), b.bodies());
        assert_ne!(a.bodies(), c.bodies());
    }
}
