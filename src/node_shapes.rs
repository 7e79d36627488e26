use eframe::egui::{
    self, FontFamily, FontId, Pos2, Shape, Stroke, Vec2,
    epaint::{CircleShape, TextShape},
};
use egui_graphs::{DisplayEdge, DisplayNode, DrawContext, EdgeProps, Node, NodeProps};
use petgraph::Undirected;
use petgraph::graph::DefaultIx;

use crate::knowledge::Concept;
use crate::theme;

const LABEL_FONT_SIZE: f32 = 12.0;
/// Label center sits this far below the node center.
const LABEL_DY: f32 = 4.0;
const HOVER_RING_WIDTH: f32 = 2.0;
/// Extra slack around an edge when testing whether the pointer is on it.
const EDGE_HIT_SLACK: f32 = 3.0;

pub type ConceptNode = Node<Concept, f32, Undirected, DefaultIx, ConceptNodeShape>;

/// Filled disc sized by the concept's weight and colored by its group.
#[derive(Clone, Debug)]
pub struct ConceptNodeShape {
    pos: Pos2,
    hovered: bool,
    dragged: bool,
    radius: f32,
    color: egui::Color32,
    label: String,
    pub show_label: bool,
}

impl From<NodeProps<Concept>> for ConceptNodeShape {
    fn from(props: NodeProps<Concept>) -> Self {
        Self {
            pos: props.location(),
            hovered: props.hovered,
            dragged: props.dragged,
            radius: props.payload.size,
            color: theme::group_color(&props.payload.group),
            label: props.payload.label(),
            show_label: true,
        }
    }
}

impl DisplayNode<Concept, f32, Undirected, DefaultIx> for ConceptNodeShape {
    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.pos).length() <= self.radius
    }

    fn closest_boundary_point(&self, dir: Vec2) -> Pos2 {
        self.pos + dir.normalized() * self.radius
    }

    fn shapes(&mut self, ctx: &DrawContext) -> Vec<Shape> {
        let mut res = Vec::with_capacity(2);
        let center = ctx.meta.canvas_to_screen_pos(self.pos);
        let radius = ctx.meta.canvas_to_screen_size(self.radius);
        let stroke = if self.hovered || self.dragged {
            Stroke::new(HOVER_RING_WIDTH, theme::HOVER_RING)
        } else {
            Stroke::NONE
        };
        res.push(
            CircleShape {
                center,
                radius,
                fill: self.color,
                stroke,
            }
            .into(),
        );

        if !self.show_label {
            return res;
        }

        let galley = ctx.ctx.fonts_mut(|f| {
            f.layout_no_wrap(
                self.label.clone(),
                FontId::new(LABEL_FONT_SIZE, FontFamily::Proportional),
                theme::LABEL,
            )
        });
        let anchor = ctx
            .meta
            .canvas_to_screen_pos(self.pos + Vec2::new(0.0, LABEL_DY));
        let top_left = anchor - galley.size() / 2.0;
        res.push(TextShape::new(top_left, galley, theme::LABEL).into());
        res
    }

    fn update(&mut self, state: &NodeProps<Concept>) {
        self.pos = state.location();
        self.hovered = state.hovered;
        self.dragged = state.dragged;
    }
}

/// Stroke width for a relation of weight `w`.
pub fn edge_width(weight: f32) -> f32 {
    weight.max(0.0).sqrt()
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Straight center-to-center line whose width grows with the relation
/// weight. Nodes are drawn over the line ends.
#[derive(Clone, Debug)]
pub struct RelationEdgeShape {
    width: f32,
}

impl From<EdgeProps<f32>> for RelationEdgeShape {
    fn from(props: EdgeProps<f32>) -> Self {
        Self {
            width: edge_width(props.payload),
        }
    }
}

impl DisplayEdge<Concept, f32, Undirected, DefaultIx, ConceptNodeShape> for RelationEdgeShape {
    fn is_inside(&self, start: &ConceptNode, end: &ConceptNode, pos: Pos2) -> bool {
        segment_distance(start.location(), end.location(), pos)
            <= self.width / 2.0 + EDGE_HIT_SLACK
    }

    fn shapes(&mut self, start: &ConceptNode, end: &ConceptNode, ctx: &DrawContext) -> Vec<Shape> {
        let from = ctx.meta.canvas_to_screen_pos(start.location());
        let to = ctx.meta.canvas_to_screen_pos(end.location());
        vec![Shape::line_segment([from, to], Stroke::new(self.width, theme::EDGE))]
    }

    fn update(&mut self, state: &EdgeProps<f32>) {
        self.width = edge_width(state.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_width_is_sqrt_of_weight() {
        assert_eq!(edge_width(3.0), 3.0_f32.sqrt());
        assert_eq!(edge_width(1.0), 1.0);
        assert_eq!(edge_width(-2.0), 0.0);
    }

    #[test]
    fn segment_distance_measures_to_nearest_point() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(segment_distance(a, b, Pos2::new(5.0, 3.0)), 3.0);
        assert_eq!(segment_distance(a, b, Pos2::new(-4.0, 0.0)), 4.0);
        assert_eq!(segment_distance(a, b, Pos2::new(13.0, 4.0)), 5.0);
        assert_eq!(segment_distance(a, a, Pos2::new(3.0, 4.0)), 5.0);
    }
}
