// Pages module - paints the body of each tab and the detail modal from a
// `view::Page`.

use eframe::egui::{self, Color32, RichText, Sense};

use crate::actions::Action;
use crate::catalog::{GapSeverity, Priority, SummaryStat};
use crate::graph_view::{self, GraphHost};
use crate::settings::{
    CHARGE_STRENGTH_RANGE, LINK_DISTANCE_RANGE, SliderRange, VELOCITY_DECAY_RANGE,
};
use crate::theme;
use crate::view::{
    Body, ExperimentCard, ExperimentDetail, GapRow, GraphControls, InsightCard, Listing,
};

const CARD_SPACING: f32 = 8.0;
const SECTION_SPACING: f32 = 16.0;
const CONFIDENCE_BAR: egui::Vec2 = egui::vec2(128.0, 8.0);

fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::Response {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .response
}

fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(18.0).strong());
    ui.add_space(CARD_SPACING);
}

fn tag_row(ui: &mut egui::Ui, tags: &[&str]) {
    ui.horizontal_wrapped(|ui| {
        for tag in tags {
            ui.label(RichText::new(*tag).small().color(theme::ACCENT).background_color(
                Color32::from_rgba_premultiplied(0x0c, 0x1a, 0x31, 0x33),
            ));
        }
    });
}

/// Horizontal bar filled to `fraction`, colored by the score gradient.
fn score_bar(ui: &mut egui::Ui, fraction: f32) {
    let (rect, _) = ui.allocate_exact_size(CONFIDENCE_BAR, Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    let mut filled = rect;
    filled.set_width(rect.width() * fraction.clamp(0.0, 1.0));
    painter.rect_filled(filled, 4.0, theme::score_color(fraction));
}

// -------------------------------------------------------------------
// Experiments
// -------------------------------------------------------------------

fn experiment_card(
    ui: &mut egui::Ui,
    card_view: &ExperimentCard,
    compact: bool,
    out: &mut Vec<Action>,
) {
    let response = card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_width(ui.available_width() - 90.0);
                ui.label(RichText::new(card_view.title).size(16.0).strong());
                if compact {
                    ui.label(RichText::new(&card_view.headline).color(theme::MUTED));
                } else {
                    ui.horizontal_wrapped(|ui| {
                        for fact in [
                            card_view.year.to_string(),
                            card_view.mission.to_string(),
                            card_view.organism.to_string(),
                            card_view.citations.clone(),
                        ] {
                            ui.label(RichText::new(fact).color(theme::MUTED));
                        }
                    });
                }
                ui.label(card_view.findings);
                tag_row(ui, card_view.tags);
            });
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(&card_view.relevance_label)
                        .size(22.0)
                        .strong()
                        .color(theme::score_color(card_view.relevance)),
                );
                ui.label(RichText::new("Relevance").small().color(theme::MUTED));
            });
        });
    });
    let response = response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    if response.clicked() {
        out.push(Action::OpenExperiment { id: card_view.id });
    }
}

fn listing(ui: &mut egui::Ui, listing: &Listing, compact: bool, out: &mut Vec<Action>) {
    match listing {
        Listing::Cards(cards) => {
            for c in cards {
                experiment_card(ui, c, compact, out);
                ui.add_space(CARD_SPACING);
            }
        }
        Listing::NoResults => {
            ui.add_space(SECTION_SPACING);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("No experiments match your search").strong());
                let hint = "Try a different query or clear the filters.";
                ui.label(RichText::new(hint).color(theme::MUTED));
            });
        }
    }
}

// -------------------------------------------------------------------
// Dashboard and insights
// -------------------------------------------------------------------

fn summary_stats(ui: &mut egui::Ui, stats: &[SummaryStat]) {
    ui.columns(stats.len().max(1), |columns| {
        for (ui, stat) in columns.iter_mut().zip(stats) {
            card(ui, |ui| {
                ui.label(RichText::new(stat.value).size(26.0).strong());
                ui.label(stat.caption);
                ui.label(RichText::new(stat.trend).small().color(theme::score_color(1.0)));
            });
        }
    });
}

fn impact_badge(ui: &mut egui::Ui, insight: &InsightCard) {
    ui.label(
        RichText::new(insight.impact.badge())
            .small()
            .strong()
            .color(theme::impact_color(insight.impact)),
    );
}

fn insight_preview(ui: &mut egui::Ui, insights: &[InsightCard]) {
    ui.columns(insights.len().max(1), |columns| {
        for (ui, insight) in columns.iter_mut().zip(insights) {
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    impact_badge(ui, insight);
                    ui.label(RichText::new(insight.kind.label()).small().color(theme::MUTED));
                });
                ui.label(RichText::new(insight.title).strong());
                ui.label(RichText::new(insight.description).small());
                ui.label(
                    RichText::new(format!("Confidence: {}", insight.confidence_label))
                        .small()
                        .color(theme::MUTED),
                );
            });
        }
    });
}

fn insight_card(ui: &mut egui::Ui, insight: &InsightCard) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(insight.kind.label())
                        .small()
                        .color(theme::insight_color(insight.kind)),
                );
                ui.label(RichText::new(insight.title).size(18.0).strong());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                impact_badge(ui, insight);
            });
        });
        ui.label(insight.description);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Confidence Score:").color(theme::MUTED));
            ui.label(RichText::new(&insight.confidence_label).strong());
            score_bar(ui, insight.confidence);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let _ = ui.link("Explore Further ›");
            });
        });
    });
}

fn banner(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    card(ui, |ui| {
        ui.label(RichText::new(title).size(22.0).strong());
        ui.label(RichText::new(subtitle).color(theme::MUTED));
    });
    ui.add_space(SECTION_SPACING);
}

// -------------------------------------------------------------------
// Research gaps
// -------------------------------------------------------------------

fn research_gaps(ui: &mut egui::Ui, understudied: &[GapRow], priorities: &[Priority]) {
    banner(
        ui,
        "Critical Research Gaps",
        "Areas requiring immediate attention for advancing space biology",
    );
    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            ui.label(
                RichText::new("Understudied Areas")
                    .strong()
                    .color(theme::severity_color(GapSeverity::Critical)),
            );
            for row in understudied {
                ui.horizontal(|ui| {
                    ui.label(row.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(&row.studies_label)
                                .small()
                                .color(theme::severity_color(row.severity)),
                        );
                    });
                });
            }
        });
        card(&mut columns[1], |ui| {
            ui.label(RichText::new("Emerging Priorities").strong().color(theme::ACCENT));
            for p in priorities {
                ui.label(RichText::new(p.name).strong());
                ui.label(RichText::new(p.rationale).small().color(theme::MUTED));
                ui.add_space(CARD_SPACING / 2.0);
            }
        });
    });
}

// -------------------------------------------------------------------
// Knowledge graph
// -------------------------------------------------------------------

fn slider(ui: &mut egui::Ui, value: f32, range: SliderRange, text: &str) -> Option<f32> {
    let mut v = value;
    let response = ui.add(
        egui::Slider::new(&mut v, range.min..=range.max)
            .step_by(range.step as f64)
            .text(text),
    );
    response.changed().then_some(v)
}

fn graph_controls(ui: &mut egui::Ui, controls: &GraphControls, out: &mut Vec<Action>) {
    ui.horizontal_wrapped(|ui| {
        if let Some(value) = slider(
            ui,
            controls.link_distance,
            LINK_DISTANCE_RANGE,
            "Link distance",
        ) {
            out.push(Action::SetLinkDistance { value });
        }
        if let Some(value) = slider(ui, controls.charge_strength, CHARGE_STRENGTH_RANGE, "Charge") {
            out.push(Action::SetChargeStrength { value });
        }
        if let Some(value) = slider(
            ui,
            controls.velocity_decay,
            VELOCITY_DECAY_RANGE,
            "Velocity decay",
        ) {
            out.push(Action::SetVelocityDecay { value });
        }
        let mut show = controls.show_labels;
        if ui.checkbox(&mut show, "Labels").changed() {
            out.push(Action::SetShowLabels { show });
        }
        if ui.button("Re-run layout").clicked() {
            out.push(Action::RerunLayout);
        }
    });
}

// -------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------

pub fn show_body(
    ui: &mut egui::Ui,
    body: &Body,
    graph: &mut GraphHost,
    canvas: egui::Vec2,
    out: &mut Vec<Action>,
) {
    match body {
        Body::Dashboard {
            stats,
            recent,
            insights,
        } => {
            summary_stats(ui, stats);
            ui.add_space(SECTION_SPACING);
            heading(ui, "Recent High-Impact Experiments");
            listing(ui, recent, true, out);
            ui.add_space(SECTION_SPACING);
            heading(ui, "Latest AI-Generated Insights");
            insight_preview(ui, insights);
        }
        Body::Experiments { listing: l } => listing(ui, l, false, out),
        Body::KnowledgeGraph { controls } => {
            card(ui, |ui| {
                heading(ui, "Space Biology Knowledge Graph");
                graph_controls(ui, controls, out);
                ui.add_space(CARD_SPACING);
                graph_view::show_canvas(ui, graph, canvas, controls.show_labels);
                ui.add_space(CARD_SPACING);
                graph_view::show_legend(ui);
            });
        }
        Body::Insights { insights } => {
            banner(
                ui,
                "AI-Powered Insights Engine",
                "Discovering patterns and generating hypotheses from decades of space biology data",
            );
            for insight in insights {
                insight_card(ui, insight);
                ui.add_space(CARD_SPACING);
            }
        }
        Body::ResearchGaps {
            understudied,
            priorities,
        } => research_gaps(ui, understudied, priorities),
    }
}

/// Modal over the current page. Escape, a click outside and the Close
/// button all dismiss it.
pub fn show_detail(ctx: &egui::Context, detail: &ExperimentDetail, out: &mut Vec<Action>) {
    let modal = egui::Modal::new(egui::Id::new("experiment_detail")).show(ctx, |ui| {
        ui.set_max_width(560.0);
        ui.label(RichText::new(detail.title).size(22.0).strong());
        ui.add_space(CARD_SPACING);
        egui::Grid::new("experiment_facts")
            .num_columns(2)
            .spacing(egui::vec2(24.0, 6.0))
            .show(ui, |ui| {
                for pair in detail.facts.chunks(2) {
                    for (caption, value) in pair {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(*caption).small().color(theme::MUTED));
                            ui.label(RichText::new(value).strong());
                        });
                    }
                    ui.end_row();
                }
            });
        ui.add_space(CARD_SPACING);
        ui.label(RichText::new("Key Findings").small().color(theme::MUTED));
        ui.label(RichText::new(detail.findings).size(16.0));
        ui.add_space(CARD_SPACING);
        tag_row(ui, detail.tags);
        ui.add_space(SECTION_SPACING);
        ui.horizontal(|ui| {
            // Paper links are not available.
            let _ = ui.button("View Full Paper");
            let _ = ui.button("Related Studies");
            ui.button("Close").clicked()
        })
        .inner
    });
    if modal.inner || modal.should_close() {
        out.push(Action::CloseExperiment);
    }
}
