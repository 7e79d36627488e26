use serde::{Deserialize, Serialize};

/// How bodies are positioned before the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Placement {
    /// Sunflower spiral around the viewport center. Deterministic.
    #[default]
    Phyllotaxis,
    /// Uniform scatter over the middle half of the viewport, seeded.
    Scatter,
}

/// Tunables for the three forces and the cooling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceParams {
    /// Rest length of every link.
    pub link_distance: f32,
    /// Global multiplier on link strength.
    pub link_stiffness: f32,
    /// Radius that counts as one unit of mass.
    pub mass_unit: f32,
    /// Many-body strength; negative repels.
    pub charge_strength: f32,
    /// Distance below which the many-body force stops growing.
    pub charge_distance_min: f32,
    /// Fraction of the centroid offset removed each step.
    pub center_strength: f32,
    /// Fraction of velocity lost each step.
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Alpha the simulation is held at while a node is dragged.
    pub drag_alpha_target: f32,
    pub placement: Placement,
    pub seed: u64,
}

impl ForceParams {
    /// Decay rate that cools from 1 to `alpha_min` in `steps` steps.
    pub fn decay_for_steps(alpha_min: f32, steps: u32) -> f32 {
        1.0 - alpha_min.powf(1.0 / steps.max(1) as f32)
    }
}

impl Default for ForceParams {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            link_distance: 80.0,
            link_stiffness: 1.0,
            mass_unit: 15.0,
            charge_strength: -300.0,
            charge_distance_min: 1.0,
            center_strength: 1.0,
            velocity_decay: 0.4,
            alpha_min,
            alpha_decay: Self::decay_for_steps(alpha_min, 300),
            drag_alpha_target: 0.3,
            placement: Placement::Phyllotaxis,
            seed: 0x5eed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_decay_cools_in_about_300_steps() {
        let params = ForceParams::default();
        let alpha = (1.0 - params.alpha_decay).powi(300);
        assert!(
            (alpha - params.alpha_min).abs() < 1e-4,
            "alpha after 300 steps should be ~alpha_min, got {}",
            alpha
        );
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let params: ForceParams =
            serde_json::from_str(r#"{ "link_distance": 120.0 }"#).unwrap();
        assert_eq!(params.link_distance, 120.0);
        assert_eq!(params.charge_strength, -300.0);
        assert_eq!(params.placement, Placement::Phyllotaxis);
    }
}
