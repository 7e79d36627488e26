// View module - turns the store and the record catalog into a description
// of what to draw. Nothing here touches egui.

use crate::catalog::{
    Catalog, Experiment, ExperimentId, GapSeverity, Impact, Insight, InsightKind, Priority,
    SummaryStat,
};
use crate::filter::Choice;
use crate::store::{ActiveTab, Store};

/// Experiments shown under "Recent High-Impact Experiments".
pub const RECENT_LIMIT: usize = 3;
/// Tags shown on a compact card.
pub const COMPACT_TAG_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub tab: ActiveTab,
    pub filter_bar: FilterBar,
    pub body: Body,
    pub detail: Option<ExperimentDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterBar {
    pub search_query: String,
    pub category: Choice,
    pub year: Choice,
    /// Any of the four categorical filters is set.
    pub constrained: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Dashboard {
        stats: &'static [SummaryStat],
        recent: Listing,
        insights: Vec<InsightCard>,
    },
    Experiments {
        listing: Listing,
    },
    KnowledgeGraph {
        controls: GraphControls,
    },
    Insights {
        insights: Vec<InsightCard>,
    },
    ResearchGaps {
        understudied: Vec<GapRow>,
        priorities: &'static [Priority],
    },
}

/// Current values behind the graph tab's sliders and toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphControls {
    pub link_distance: f32,
    pub charge_strength: f32,
    pub velocity_decay: f32,
    pub show_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Cards(Vec<ExperimentCard>),
    NoResults,
}

impl Listing {
    fn from_records<'a>(records: impl Iterator<Item = &'a Experiment>, compact: bool) -> Self {
        let cards: Vec<ExperimentCard> = records.map(|e| ExperimentCard::new(e, compact)).collect();
        if cards.is_empty() {
            Listing::NoResults
        } else {
            Listing::Cards(cards)
        }
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<ExperimentId> {
        match self {
            Listing::Cards(cards) => cards.iter().map(|c| c.id).collect(),
            Listing::NoResults => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentCard {
    pub id: ExperimentId,
    pub title: &'static str,
    /// "mission • year"
    pub headline: String,
    pub year: u16,
    pub mission: &'static str,
    pub organism: &'static str,
    pub citations: String,
    pub findings: &'static str,
    pub tags: &'static [&'static str],
    pub relevance: f32,
    pub relevance_label: String,
}

impl ExperimentCard {
    fn new(exp: &Experiment, compact: bool) -> Self {
        let all: &'static [&'static str] = exp.tags;
        let tags = if compact {
            &all[..all.len().min(COMPACT_TAG_LIMIT)]
        } else {
            all
        };
        Self {
            id: exp.id,
            title: exp.title,
            headline: format!("{} • {}", exp.mission, exp.year),
            year: exp.year,
            mission: exp.mission,
            organism: exp.organism,
            citations: format!("{} citations", exp.citations),
            findings: exp.findings,
            tags,
            relevance: exp.relevance,
            relevance_label: percent(exp.relevance),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightCard {
    pub id: u32,
    pub kind: InsightKind,
    pub impact: Impact,
    pub title: &'static str,
    pub description: &'static str,
    pub confidence: f32,
    pub confidence_label: String,
}

impl From<&Insight> for InsightCard {
    fn from(insight: &Insight) -> Self {
        Self {
            id: insight.id,
            kind: insight.kind,
            impact: insight.impact,
            title: insight.title,
            description: insight.description,
            confidence: insight.confidence,
            confidence_label: percent(insight.confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub name: &'static str,
    pub severity: GapSeverity,
    pub studies_label: String,
}

/// Everything the detail modal shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentDetail {
    pub id: ExperimentId,
    pub title: &'static str,
    /// Caption/value pairs in display order.
    pub facts: Vec<(&'static str, String)>,
    pub findings: &'static str,
    pub tags: &'static [&'static str],
}

impl From<&Experiment> for ExperimentDetail {
    fn from(exp: &Experiment) -> Self {
        Self {
            id: exp.id,
            title: exp.title,
            facts: vec![
                ("Mission", exp.mission.to_string()),
                ("Year", exp.year.to_string()),
                ("Organism", exp.organism.to_string()),
                ("Citations", exp.citations.to_string()),
            ],
            findings: exp.findings,
            tags: exp.tags,
        }
    }
}

/// Whole-number percentage of a `[0, 1]` score.
pub fn percent(fraction: f32) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn render(store: &Store, catalog: &Catalog, filtered: &[ExperimentId]) -> Page {
    let records = filtered.iter().filter_map(|&id| catalog.experiment(id));
    let insight_cards =
        || -> Vec<InsightCard> { catalog.insights.iter().map(InsightCard::from).collect() };

    let body = match store.active_tab {
        ActiveTab::Dashboard => Body::Dashboard {
            stats: catalog.summary,
            recent: Listing::from_records(records.take(RECENT_LIMIT), true),
            insights: insight_cards(),
        },
        ActiveTab::Experiments => Body::Experiments {
            listing: Listing::from_records(records, false),
        },
        ActiveTab::KnowledgeGraph => Body::KnowledgeGraph {
            controls: GraphControls {
                link_distance: store.layout.link_distance,
                charge_strength: store.layout.charge_strength,
                velocity_decay: store.layout.velocity_decay,
                show_labels: store.show_labels,
            },
        },
        ActiveTab::Insights => Body::Insights {
            insights: insight_cards(),
        },
        ActiveTab::ResearchGaps => Body::ResearchGaps {
            understudied: catalog
                .understudied
                .iter()
                .map(|area| GapRow {
                    name: area.name,
                    severity: area.severity,
                    studies_label: match area.severity {
                        GapSeverity::Critical => format!("Only {} studies", area.studies),
                        _ => format!("{} studies", area.studies),
                    },
                })
                .collect(),
            priorities: catalog.priorities,
        },
    };

    Page {
        tab: store.active_tab,
        filter_bar: FilterBar {
            search_query: store.search_query.clone(),
            category: store.filters.category.clone(),
            year: store.filters.year.clone(),
            constrained: !store.filters.is_unconstrained(),
        },
        body,
        detail: store
            .selected_experiment
            .and_then(|id| catalog.experiment(id))
            .map(ExperimentDetail::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_experiment_ids;

    fn page(store: &Store) -> Page {
        let catalog = Catalog::builtin();
        let filtered =
            filter_experiment_ids(catalog.experiments, &store.search_query, &store.filters);
        render(store, &catalog, &filtered)
    }

    #[test]
    fn dashboard_shows_first_three_filtered() {
        let page = page(&Store::default());
        let Body::Dashboard {
            stats,
            recent,
            insights,
        } = page.body
        else {
            panic!("expected dashboard");
        };
        assert_eq!(stats.len(), 4);
        assert_eq!(recent.ids(), vec![1, 2, 3]);
        assert_eq!(insights.len(), 3);
        if let Listing::Cards(cards) = recent {
            assert!(cards.iter().all(|c| c.tags.len() <= COMPACT_TAG_LIMIT));
            assert_eq!(cards[0].headline, "ISS Expedition 68 • 2023");
            assert_eq!(cards[0].relevance_label, "95%");
        }
    }

    #[test]
    fn experiments_tab_lists_every_match_with_all_tags() {
        let store = Store {
            active_tab: ActiveTab::Experiments,
            search_query: "human health".into(),
            ..Store::default()
        };
        let Body::Experiments { listing } = page(&store).body else {
            panic!("expected experiments");
        };
        let Listing::Cards(cards) = listing else {
            panic!("expected cards");
        };
        assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(cards[1].tags.len(), 4);
        assert_eq!(cards[0].citations, "128 citations");
    }

    #[test]
    fn empty_filter_result_is_no_results() {
        let store = Store {
            active_tab: ActiveTab::Experiments,
            search_query: "zzz".into(),
            ..Store::default()
        };
        assert_eq!(
            page(&store).body,
            Body::Experiments {
                listing: Listing::NoResults
            }
        );

        let dashboard = Store {
            search_query: "zzz".into(),
            ..Store::default()
        };
        let Body::Dashboard { recent, .. } = page(&dashboard).body else {
            panic!("expected dashboard");
        };
        assert_eq!(recent, Listing::NoResults);
    }

    #[test]
    fn detail_overlays_any_tab() {
        let store = Store {
            active_tab: ActiveTab::ResearchGaps,
            selected_experiment: Some(4),
            ..Store::default()
        };
        let page = page(&store);
        let detail = page.detail.expect("detail open");
        assert_eq!(detail.title, "Tardigrade Survival in Space Vacuum");
        assert_eq!(detail.facts[0], ("Mission", "FOTON-M3".to_string()));
        assert_eq!(detail.facts[3], ("Citations", "89".to_string()));
        assert!(matches!(page.body, Body::ResearchGaps { .. }));
    }

    #[test]
    fn unknown_selection_renders_no_modal() {
        let store = Store {
            selected_experiment: Some(99),
            ..Store::default()
        };
        assert!(page(&store).detail.is_none());
    }

    #[test]
    fn research_gaps_flag_critical_areas() {
        let store = Store {
            active_tab: ActiveTab::ResearchGaps,
            ..Store::default()
        };
        let Body::ResearchGaps {
            understudied,
            priorities,
        } = page(&store).body
        else {
            panic!("expected research gaps");
        };
        assert_eq!(understudied[0].studies_label, "Only 12 studies");
        assert_eq!(understudied[1].studies_label, "23 studies");
        assert_eq!(priorities.len(), 2);
    }

    #[test]
    fn insight_confidence_is_a_percentage() {
        let store = Store {
            active_tab: ActiveTab::Insights,
            ..Store::default()
        };
        let Body::Insights { insights } = page(&store).body else {
            panic!("expected insights");
        };
        let labels: Vec<&str> = insights.iter().map(|i| i.confidence_label.as_str()).collect();
        assert_eq!(labels, vec!["89%", "76%", "94%"]);
    }

    #[test]
    fn graph_tab_carries_slider_values() {
        let mut store = Store {
            active_tab: ActiveTab::KnowledgeGraph,
            show_labels: false,
            ..Store::default()
        };
        store.layout.link_distance = 120.0;
        let Body::KnowledgeGraph { controls } = page(&store).body else {
            panic!("expected knowledge graph");
        };
        assert_eq!(controls.link_distance, 120.0);
        assert_eq!(controls.charge_strength, -300.0);
        assert!(!controls.show_labels);
    }

    #[test]
    fn filter_bar_reflects_store() {
        let mut store = Store::default();
        assert!(!page(&store).filter_bar.constrained);
        store.filters.mission = Choice::parse("ISS");
        let bar = page(&store).filter_bar;
        assert!(bar.constrained);
        assert_eq!(bar.category, Choice::All);
    }
}
