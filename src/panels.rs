// Panels module - the chrome around every page: header, tab strip and the
// search/filter bar. Input becomes actions pushed onto `out`.

use eframe::egui::{self, RichText};

use crate::actions::Action;
use crate::catalog::{CATEGORY_OPTIONS, YEAR_OPTIONS};
use crate::filter::Choice;
use crate::store::ActiveTab;
use crate::theme;
use crate::view::FilterBar;

pub const APP_TITLE: &str = "Space Biology Knowledge Engine";
const APP_SUBTITLE: &str = "NASA Space Apps Challenge 2025";
const SEARCH_HINT: &str = "Search experiments, organisms, findings...";

pub fn show_header(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(APP_TITLE).size(22.0).strong().color(theme::ACCENT));
            ui.label(RichText::new(APP_SUBTITLE).small().color(theme::MUTED));
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Export and sharing are not wired up.
            let _ = ui.button("Share");
            let _ = ui.button("Download");
        });
    });
}

pub fn show_tabs(ui: &mut egui::Ui, active: ActiveTab, out: &mut Vec<Action>) {
    ui.horizontal_wrapped(|ui| {
        for tab in ActiveTab::ALL {
            if ui.selectable_label(active == tab, tab.label()).clicked() {
                out.push(Action::SetActiveTab { tab });
            }
        }
    });
}

fn choice_text(choice: &Choice, all_label: &str) -> String {
    match choice {
        Choice::All => all_label.to_string(),
        Choice::Only(v) => v.clone(),
    }
}

/// Dropdown over `"all"` plus `options`. Returns the new choice when the
/// selection changed.
fn choice_combo(
    ui: &mut egui::Ui,
    id: &str,
    current: &Choice,
    all_label: &str,
    options: &[&str],
) -> Option<Choice> {
    let mut selected = current.clone();
    egui::ComboBox::from_id_salt(id)
        .selected_text(choice_text(current, all_label))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, Choice::All, all_label);
            for option in options {
                ui.selectable_value(&mut selected, Choice::parse(option), *option);
            }
        });
    (selected != *current).then_some(selected)
}

pub fn show_filter_bar(ui: &mut egui::Ui, bar: &FilterBar, out: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        let mut query = bar.search_query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text(SEARCH_HINT)
                .desired_width(ui.available_width() - 110.0),
        );
        if response.changed() {
            out.push(Action::SetSearchQuery { query });
        }
        // Plain filtering already runs on every keystroke.
        let _ = ui.button("AI Search");
    });

    ui.horizontal(|ui| {
        if let Some(choice) = choice_combo(
            ui,
            "category_filter",
            &bar.category,
            "All Categories",
            &CATEGORY_OPTIONS,
        ) {
            out.push(Action::SetCategoryFilter { choice });
        }
        if let Some(choice) =
            choice_combo(ui, "year_filter", &bar.year, "All Years", &YEAR_OPTIONS)
        {
            out.push(Action::SetYearFilter { choice });
        }
        if bar.constrained && ui.button("Clear filters").clicked() {
            out.push(Action::ClearFilters);
        }
    });
}
