use eframe::egui::Color32;

use crate::catalog::{GapSeverity, Impact, InsightKind};
use crate::knowledge::ConceptGroup;

pub const UNKNOWN_GROUP: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
pub const EDGE: Color32 = Color32::from_rgba_premultiplied(0x2c, 0x33, 0x3e, 153);
pub const HOVER_RING: Color32 = Color32::WHITE;
pub const LABEL: Color32 = Color32::WHITE;
pub const CANVAS: Color32 = Color32::from_rgb(0x0b, 0x12, 0x20);
pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

pub fn group_color(group: &ConceptGroup) -> Color32 {
    match group {
        ConceptGroup::Environment => Color32::from_rgb(0x31, 0x82, 0xce),
        ConceptGroup::Effect => Color32::from_rgb(0xdc, 0x26, 0x26),
        ConceptGroup::Mechanism => Color32::from_rgb(0x10, 0xb9, 0x81),
        ConceptGroup::Organism => Color32::from_rgb(0x8b, 0x5c, 0xf6),
        ConceptGroup::Solution => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        ConceptGroup::Other(_) => UNKNOWN_GROUP,
    }
}

pub fn impact_color(impact: Impact) -> Color32 {
    match impact {
        Impact::High => Color32::from_rgb(0xdc, 0x26, 0x26),
        Impact::Medium => Color32::from_rgb(0xf5, 0x9e, 0x0b),
    }
}

pub fn insight_color(kind: InsightKind) -> Color32 {
    match kind {
        InsightKind::PatternDiscovery => Color32::from_rgb(0x3b, 0x82, 0xf6),
        InsightKind::NovelHypothesis => Color32::from_rgb(0x8b, 0x5c, 0xf6),
        InsightKind::ResearchGap => Color32::from_rgb(0xf5, 0x9e, 0x0b),
    }
}

pub fn severity_color(severity: GapSeverity) -> Color32 {
    match severity {
        GapSeverity::Critical => Color32::from_rgb(0xdc, 0x26, 0x26),
        GapSeverity::Severe => Color32::from_rgb(0xea, 0x58, 0x0c),
        GapSeverity::Moderate => Color32::from_rgb(0xca, 0x8a, 0x04),
    }
}

/// Fill for a score in `[0, 1]`, used by relevance and confidence bars.
pub fn score_color(t: f32) -> Color32 {
    let c = colorous::VIRIDIS.eval_continuous(f64::from(t.clamp(0.0, 1.0)));
    Color32::from_rgb(c.r, c.g, c.b)
}
