use crate::catalog::{Catalog, ExperimentId};
use crate::filter::{ExperimentFilters, filter_experiment_ids};
use crate::store::Store;

// -------------------------------------------------------------------
// Memo
// -------------------------------------------------------------------

/// Single-slot memo: keeps the last key and value, recomputes only when
/// the key changes.
pub struct Memo<K, V> {
    last: Option<(K, V)>,
    recomputations: u64,
}

impl<K, V> Memo<K, V>
where
    K: PartialEq,
{
    pub fn new() -> Self {
        Self {
            last: None,
            recomputations: 0,
        }
    }

    pub fn get(&mut self, key: K, calc: impl FnOnce(&K) -> V) -> &V {
        if !matches!(&self.last, Some((k, _)) if *k == key) {
            self.last = None;
        }
        let recomputations = &mut self.recomputations;
        let (_, value) = self.last.get_or_insert_with(|| {
            *recomputations = recomputations.wrapping_add(1);
            let value = calc(&key);
            (key, value)
        });
        value
    }

    /// How many times the value has been computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// -------------------------------------------------------------------
// Cache
// -------------------------------------------------------------------

pub type FilterKey = (String, ExperimentFilters);

/// Derived data recomputed from the store on demand.
#[derive(Default)]
pub struct Cache {
    pub filtered_experiments: Memo<FilterKey, Vec<ExperimentId>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filtered(&mut self, store: &Store, catalog: &Catalog) -> &[ExperimentId] {
        let key = (store.search_query.clone(), store.filters.clone());
        self.filtered_experiments.get(key, |(query, filters)| {
            filter_experiment_ids(catalog.experiments, query, filters)
        })
    }
}
