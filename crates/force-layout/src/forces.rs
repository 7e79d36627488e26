use egui::{Pos2, Vec2};
use rand::Rng;

use crate::body::{Body, Link};

/// Tiny random offset used to separate exactly coincident points.
pub(crate) fn jiggle(rng: &mut impl Rng) -> f32 {
    (rng.random::<f32>() - 0.5) * 1e-6
}

fn nonzero(value: f32, rng: &mut impl Rng) -> f32 {
    if value == 0.0 { jiggle(rng) } else { value }
}

/// Spring force toward `distance` along every link, using the positions
/// each endpoint is about to reach (position + velocity).
pub(crate) fn apply_links(
    bodies: &mut [Body],
    links: &[Link],
    distance: f32,
    alpha: f32,
    rng: &mut impl Rng,
) {
    for link in links {
        let s = &bodies[link.source];
        let t = &bodies[link.target];
        let next_s = s.position + s.velocity;
        let next_t = t.position + t.velocity;
        let mut delta = next_t - next_s;
        delta.x = nonzero(delta.x, rng);
        delta.y = nonzero(delta.y, rng);

        let length = delta.length();
        let l = (length - distance) / length * alpha * link.strength;
        let correction = delta * l;

        bodies[link.target].velocity -= correction * link.bias;
        bodies[link.source].velocity += correction * (1.0 - link.bias);
    }
}

/// Exact pairwise many-body force. Each pair contributes
/// `offset * strength * alpha / distance²`.
pub(crate) fn apply_charge(
    bodies: &mut [Body],
    strength: f32,
    distance_min: f32,
    alpha: f32,
    rng: &mut impl Rng,
) {
    let positions: Vec<Pos2> = bodies.iter().map(|b| b.position).collect();
    let min_sq = distance_min * distance_min;

    for (i, body) in bodies.iter_mut().enumerate() {
        let mut acc = Vec2::ZERO;
        for (j, &other) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut offset = other - positions[i];
            offset.x = nonzero(offset.x, rng);
            offset.y = nonzero(offset.y, rng);
            let mut l = offset.length_sq();
            if l < min_sq {
                l = (min_sq * l).sqrt();
            }
            acc += offset * (strength * alpha / l);
        }
        body.velocity += acc;
    }
}

/// Shift every body so the centroid moves toward `center`.
pub(crate) fn apply_centering(bodies: &mut [Body], center: Pos2, strength: f32) {
    if bodies.is_empty() {
        return;
    }
    let n = bodies.len() as f32;
    let sum = bodies
        .iter()
        .fold(Vec2::ZERO, |acc, b| acc + b.position.to_vec2());
    let centroid = (sum / n).to_pos2();
    let shift = (centroid - center) * strength;
    if !shift.x.is_finite() || !shift.y.is_finite() {
        return;
    }
    for body in bodies {
        body.position -= shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::LinkSpec;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn body_at(x: f32, y: f32) -> Body {
        let mut b = Body::new(15.0);
        b.position = Pos2::new(x, y);
        b
    }

    #[test]
    fn charge_pushes_nodes_apart() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bodies = vec![body_at(0.0, 0.0), body_at(10.0, 0.0)];
        apply_charge(&mut bodies, -300.0, 1.0, 1.0, &mut rng);
        assert!(bodies[0].velocity.x < 0.0, "left node should move left");
        assert!(bodies[1].velocity.x > 0.0, "right node should move right");
        assert!(
            (bodies[0].velocity.x + bodies[1].velocity.x).abs() < 1e-4,
            "pairwise charge should be symmetric"
        );
    }

    #[test]
    fn charge_separates_coincident_nodes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bodies = vec![body_at(5.0, 5.0), body_at(5.0, 5.0)];
        apply_charge(&mut bodies, -300.0, 1.0, 1.0, &mut rng);
        for body in &bodies {
            assert!(body.velocity.x.is_finite() && body.velocity.y.is_finite());
        }
    }

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bodies = vec![body_at(0.0, 0.0), body_at(200.0, 0.0)];
        let spec = LinkSpec {
            source: 0,
            target: 1,
            weight: 1.0,
        };
        let links = vec![Link::resolve(&spec, &bodies, 1.0, 1.0, 15.0)];
        apply_links(&mut bodies, &links, 80.0, 1.0, &mut rng);
        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
    }

    #[test]
    fn compressed_link_pushes_endpoints_apart() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bodies = vec![body_at(0.0, 0.0), body_at(20.0, 0.0)];
        let spec = LinkSpec {
            source: 0,
            target: 1,
            weight: 1.0,
        };
        let links = vec![Link::resolve(&spec, &bodies, 1.0, 1.0, 15.0)];
        apply_links(&mut bodies, &links, 80.0, 1.0, &mut rng);
        assert!(bodies[0].velocity.x < 0.0);
        assert!(bodies[1].velocity.x > 0.0);
    }

    #[test]
    fn centering_moves_centroid_onto_center() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(20.0, 40.0)];
        apply_centering(&mut bodies, Pos2::new(100.0, 100.0), 1.0);
        let cx = (bodies[0].position.x + bodies[1].position.x) / 2.0;
        let cy = (bodies[0].position.y + bodies[1].position.y) / 2.0;
        assert!((cx - 100.0).abs() < 1e-4);
        assert!((cy - 100.0).abs() < 1e-4);
        assert_eq!(bodies[1].position - bodies[0].position, Vec2::new(20.0, 40.0));
    }
}
