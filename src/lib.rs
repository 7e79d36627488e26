pub mod actions;
pub mod cache;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod filter;
pub mod graph_view;
pub mod knowledge;
pub mod layout_force;
pub mod native;
pub mod node_shapes;
pub mod pages;
pub mod panels;
pub mod settings;
pub mod state;
pub mod store;
pub mod theme;
pub mod view;
pub mod web;

use eframe::egui;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::knowledge::KnowledgeGraph;
use crate::settings::AppSettings;
use crate::state::State;

pub struct App {
    state: State,
}

/// Build the dashboard. Fails when the built-in knowledge graph cannot be
/// laid out.
pub fn create_app(cc: &eframe::CreationContext<'_>) -> Result<App, AppError> {
    cc.egui_ctx.set_visuals(egui::Visuals::dark());

    let settings = load_settings();
    let knowledge = KnowledgeGraph::builtin()?;
    let state = State::new(settings, Catalog::builtin(), knowledge)?;
    info!(
        experiments = state.catalog.experiments.len(),
        concepts = state.graph.knowledge().concept_count(),
        "dashboard ready"
    );
    Ok(App { state })
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> AppSettings {
    AppSettings::load_or_default(std::path::Path::new(settings::SETTINGS_FILE))
}

#[cfg(target_arch = "wasm32")]
fn load_settings() -> AppSettings {
    AppSettings::default()
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let page = self.state.page();
        let mut out = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            panels::show_header(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            panels::show_tabs(ui, page.tab, &mut out);
        });

        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            ui.add_space(4.0);
            panels::show_filter_bar(ui, &page.filter_bar, &mut out);
            ui.add_space(4.0);
        });

        let canvas = egui::vec2(
            self.state.settings.canvas.width,
            self.state.settings.canvas.height,
        );
        let graph = &mut self.state.graph;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                pages::show_body(ui, &page.body, graph, canvas, &mut out);
            });
        });

        if let Some(detail) = &page.detail {
            pages::show_detail(ctx, detail, &mut out);
        }

        let changed = !out.is_empty();
        for action in out {
            self.state.dispatch(action);
        }
        self.state.flush_actions();
        self.state.flush_effects();
        if changed {
            ctx.request_repaint();
        }
    }
}
