use egui::{Pos2, Vec2};

/// Input description of a node: only its visual radius matters to the
/// physics, as the source of its mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSpec {
    pub radius: f32,
}

/// Input description of a link between two node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSpec {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
}

/// Physics state of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Pos2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Fixed position while dragged. Overrides all forces.
    pub pin: Option<Pos2>,
}

impl Body {
    pub fn new(radius: f32) -> Self {
        Self {
            position: Pos2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            pin: None,
        }
    }

    pub fn mass(&self, mass_unit: f32) -> f32 {
        (self.radius / mass_unit.max(f32::EPSILON)).max(1.0)
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// A link with its endpoints resolved and its strength and bias
/// precomputed from the endpoint masses.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
    pub strength: f32,
    /// Share of the correction applied to the target; the source gets
    /// `1 - bias`.
    pub bias: f32,
}

impl Link {
    pub(crate) fn resolve(
        spec: &LinkSpec,
        bodies: &[Body],
        max_weight: f32,
        stiffness: f32,
        mass_unit: f32,
    ) -> Self {
        let ms = bodies[spec.source].mass(mass_unit);
        let mt = bodies[spec.target].mass(mass_unit);
        let weight_factor = (spec.weight / max_weight).sqrt();
        Self {
            source: spec.source,
            target: spec.target,
            weight: spec.weight,
            strength: stiffness * weight_factor / ms.min(mt),
            bias: ms / (ms + mt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_is_at_least_one() {
        assert_eq!(Body::new(5.0).mass(15.0), 1.0);
        assert_eq!(Body::new(30.0).mass(15.0), 2.0);
    }

    #[test]
    fn heavier_source_pushes_correction_onto_target() {
        let bodies = vec![Body::new(30.0), Body::new(15.0)];
        let spec = LinkSpec {
            source: 0,
            target: 1,
            weight: 3.0,
        };
        let link = Link::resolve(&spec, &bodies, 3.0, 1.0, 15.0);
        assert!(link.bias > 0.5, "target should take the larger share");
        assert!((link.strength - 1.0).abs() < 1e-6);
    }
}
