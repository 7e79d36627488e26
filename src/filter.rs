use serde::{Deserialize, Serialize};

use crate::catalog::{Experiment, ExperimentId};

/// Selection value used by the filter dropdowns.
pub const ALL: &str = "all";

/// One categorical filter: either no constraint or a concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// `"all"` is the sentinel for no constraint; anything else is a value.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// True when unconstrained, otherwise defers to `test` with the value.
    pub fn admits(&self, test: impl FnOnce(&str) -> bool) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => test(v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperimentFilters {
    /// Substring of the mission name.
    pub mission: Choice,
    /// Exact organism.
    pub organism: Choice,
    /// Exact year, compared on its decimal rendering.
    pub year: Choice,
    /// Exact category.
    pub category: Choice,
}

impl ExperimentFilters {
    pub fn is_unconstrained(&self) -> bool {
        self.mission.is_all()
            && self.organism.is_all()
            && self.year.is_all()
            && self.category.is_all()
    }

    pub fn matches(&self, exp: &Experiment) -> bool {
        self.mission.admits(|m| exp.mission.contains(m))
            && self.organism.admits(|o| exp.organism == o)
            && self.year.admits(|y| exp.year.to_string() == y)
            && self.category.admits(|c| exp.category == c)
    }
}

/// Case-insensitive literal substring match against title, findings and tags.
pub fn matches_query(exp: &Experiment, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);
    hit(exp.title) || hit(exp.findings) || exp.tags.iter().any(|t| hit(t))
}

/// Records matching both the query and the filters, in catalog order.
pub fn filter_experiments<'a>(
    records: &'a [Experiment],
    query: &str,
    filters: &ExperimentFilters,
) -> Vec<&'a Experiment> {
    records
        .iter()
        .filter(|exp| matches_query(exp, query) && filters.matches(exp))
        .collect()
}

pub fn filter_experiment_ids(
    records: &[Experiment],
    query: &str,
    filters: &ExperimentFilters,
) -> Vec<ExperimentId> {
    filter_experiments(records, query, filters)
        .into_iter()
        .map(|e| e.id)
        .collect()
}
