// Record store - the fixed experiment, insight and summary content shown by
// the dashboard. Everything here is static and never mutated.

pub type ExperimentId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub id: ExperimentId,
    pub title: &'static str,
    pub mission: &'static str,
    pub year: u16,
    pub organism: &'static str,
    pub category: &'static str,
    pub findings: &'static str,
    /// Relevance score in `0.0..=1.0`.
    pub relevance: f32,
    pub citations: u32,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    PatternDiscovery,
    NovelHypothesis,
    ResearchGap,
}

impl InsightKind {
    pub fn label(&self) -> &'static str {
        match self {
            InsightKind::PatternDiscovery => "Pattern Discovery",
            InsightKind::NovelHypothesis => "Novel Hypothesis",
            InsightKind::ResearchGap => "Research Gap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
}

impl Impact {
    pub fn badge(&self) -> &'static str {
        match self {
            Impact::High => "HIGH IMPACT",
            Impact::Medium => "MEDIUM IMPACT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub id: u32,
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f32,
    pub impact: Impact,
}

/// Headline number on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStat {
    pub value: &'static str,
    pub caption: &'static str,
    pub trend: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapSeverity {
    Critical,
    Severe,
    Moderate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnderstudiedArea {
    pub name: &'static str,
    pub studies: u32,
    pub severity: GapSeverity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Priority {
    pub name: &'static str,
    pub rationale: &'static str,
}

pub const CATEGORY_OPTIONS: [&str; 4] = [
    "Microbiology",
    "Human Physiology",
    "Plant Biology",
    "Extremophiles",
];

pub const YEAR_OPTIONS: [&str; 4] = ["2023", "2022", "2021", "2020"];

static EXPERIMENTS: [Experiment; 6] = [
    Experiment {
        id: 1,
        title: "Microbial Gene Expression in Microgravity",
        mission: "ISS Expedition 68",
        year: 2023,
        organism: "E. coli",
        category: "Microbiology",
        findings: "Significant upregulation of stress response genes in microgravity conditions",
        relevance: 0.95,
        citations: 42,
        tags: &["gene expression", "microgravity", "stress response", "bacteria"],
    },
    Experiment {
        id: 2,
        title: "Bone Density Changes in Long-Duration Spaceflight",
        mission: "ISS Expedition 65",
        year: 2021,
        organism: "Homo sapiens",
        category: "Human Physiology",
        findings: "1-2% monthly bone loss in weight-bearing bones during extended missions",
        relevance: 0.98,
        citations: 128,
        tags: &["bone density", "human health", "long-duration", "countermeasures"],
    },
    Experiment {
        id: 3,
        title: "Plant Growth Orientation Without Gravity",
        mission: "SpaceX CRS-25",
        year: 2022,
        organism: "Arabidopsis thaliana",
        category: "Plant Biology",
        findings: "Plants use light cues to establish growth direction in absence of gravity",
        relevance: 0.87,
        citations: 56,
        tags: &["plant growth", "phototropism", "microgravity adaptation"],
    },
    Experiment {
        id: 4,
        title: "Tardigrade Survival in Space Vacuum",
        mission: "FOTON-M3",
        year: 2020,
        organism: "Tardigrades",
        category: "Extremophiles",
        findings: "68% survival rate after 10 days exposure to space vacuum",
        relevance: 0.92,
        citations: 89,
        tags: &["extremophiles", "space survival", "radiation resistance"],
    },
    Experiment {
        id: 5,
        title: "Muscle Atrophy Biomarkers in Astronauts",
        mission: "ISS Expedition 67",
        year: 2023,
        organism: "Homo sapiens",
        category: "Human Physiology",
        findings: "Novel protein markers identified for early muscle degradation detection",
        relevance: 0.94,
        citations: 37,
        tags: &["muscle atrophy", "biomarkers", "human health", "proteomics"],
    },
    Experiment {
        id: 6,
        title: "Fungal Colony Morphology in Space",
        mission: "ISS Expedition 64",
        year: 2021,
        organism: "Aspergillus niger",
        category: "Microbiology",
        findings: "3D hyphal growth patterns differ significantly from Earth controls",
        relevance: 0.82,
        citations: 24,
        tags: &["fungi", "morphology", "3D growth", "microgravity"],
    },
];

static INSIGHTS: [Insight; 3] = [
    Insight {
        id: 1,
        kind: InsightKind::PatternDiscovery,
        title: "Convergent Stress Responses Across Species",
        description: "Multiple organisms show similar oxidative stress pathways activation in space, suggesting universal adaptation mechanisms.",
        confidence: 0.89,
        impact: Impact::High,
    },
    Insight {
        id: 2,
        kind: InsightKind::NovelHypothesis,
        title: "Microgravity-Induced Epigenetic Changes",
        description: "Data patterns suggest heritable changes in gene expression that could persist after return to Earth gravity.",
        confidence: 0.76,
        impact: Impact::Medium,
    },
    Insight {
        id: 3,
        kind: InsightKind::ResearchGap,
        title: "Limited Multi-Generational Studies",
        description: "Only 3% of experiments study organisms across multiple generations in space, limiting understanding of adaptation.",
        confidence: 0.94,
        impact: Impact::High,
    },
];

static SUMMARY: [SummaryStat; 4] = [
    SummaryStat {
        value: "2,847",
        caption: "Total Experiments",
        trend: "+12% this year",
    },
    SummaryStat {
        value: "347",
        caption: "Active Studies",
        trend: "23 new this month",
    },
    SummaryStat {
        value: "156",
        caption: "Species Studied",
        trend: "82% show adaptations",
    },
    SummaryStat {
        value: "89",
        caption: "AI Insights Generated",
        trend: "15 high-impact",
    },
];

static UNDERSTUDIED: [UnderstudiedArea; 3] = [
    UnderstudiedArea {
        name: "Reproductive Biology in Space",
        studies: 12,
        severity: GapSeverity::Critical,
    },
    UnderstudiedArea {
        name: "Microbiome Dynamics",
        studies: 23,
        severity: GapSeverity::Severe,
    },
    UnderstudiedArea {
        name: "Psychological Adaptations",
        studies: 31,
        severity: GapSeverity::Moderate,
    },
];

static PRIORITIES: [Priority; 2] = [
    Priority {
        name: "Mars Gravity Simulation",
        rationale: "Critical for Mars mission planning",
    },
    Priority {
        name: "Closed-Loop Life Support",
        rationale: "Essential for long-duration missions",
    },
];

/// Borrowed view over all static record sets.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub experiments: &'static [Experiment],
    pub insights: &'static [Insight],
    pub summary: &'static [SummaryStat],
    pub understudied: &'static [UnderstudiedArea],
    pub priorities: &'static [Priority],
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            experiments: &EXPERIMENTS,
            insights: &INSIGHTS,
            summary: &SUMMARY,
            understudied: &UNDERSTUDIED,
            priorities: &PRIORITIES,
        }
    }

    pub fn experiment(&self, id: ExperimentId) -> Option<&'static Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn experiment_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<_> = catalog.experiments.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), catalog.experiments.len());
    }

    #[test]
    fn scores_are_fractions() {
        let catalog = Catalog::builtin();
        for e in catalog.experiments {
            assert!((0.0..=1.0).contains(&e.relevance), "{}", e.title);
        }
        for i in catalog.insights {
            assert!((0.0..=1.0).contains(&i.confidence), "{}", i.title);
        }
    }

    #[test]
    fn every_category_and_year_option_is_used() {
        let catalog = Catalog::builtin();
        for category in CATEGORY_OPTIONS {
            assert!(catalog.experiments.iter().any(|e| e.category == category));
        }
        for year in YEAR_OPTIONS {
            assert!(catalog.experiments.iter().any(|e| e.year.to_string() == year));
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.experiment(4).map(|e| e.organism), Some("Tardigrades"));
        assert!(catalog.experiment(42).is_none());
    }
}
