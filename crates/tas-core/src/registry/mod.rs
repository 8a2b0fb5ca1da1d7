//! Extractor registry resolving one active extractor per `(data type, label)` pair.
//!
//! The registry is built once from the complete set of extractors and is read-only afterwards,
//! so it can be shared between threads without locking.
use std::collections::BTreeMap;

use tas_model::{DataType, LabelSource, LabelValues};
use tracing::{debug, trace};

use crate::{
    error::CoreError,
    extractor::{ExtractorRef, default_extractors},
};

/// Label name → active extractor, for one data type.
type LabelTable = BTreeMap<String, ExtractorRef>;

/// Immutable `(data type, label)` → extractor mapping.
///
/// For every pair the extractor with the strictly highest priority wins.
/// Two extractors sharing the highest priority for the same pair is a configuration error.
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    resolved: BTreeMap<DataType, LabelTable>,
}

impl ExtractorRegistry {
    /// Build the registry from the full set of available extractors.
    ///
    /// Fails with [`CoreError::ExtractorConflict`] when two extractors for the same pair share
    /// the maximal priority, and with [`CoreError::InvalidExtractor`] for a blank label name.
    pub fn register<I>(extractors: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = ExtractorRef>,
    {
        let mut candidates: BTreeMap<(DataType, String), Vec<ExtractorRef>> = BTreeMap::new();
        for ex in extractors {
            let label = ex.label_name().trim();
            if label.is_empty() {
                return Err(CoreError::InvalidExtractor(format!(
                    "extractor '{}' declares an empty label name",
                    ex.name()
                )));
            }
            trace!(
                extractor = ex.name(),
                data_type = %ex.data_type(),
                label,
                priority = ex.priority(),
                "extractor discovered"
            );
            candidates
                .entry((ex.data_type(), label.to_string()))
                .or_default()
                .push(ex);
        }

        let mut resolved: BTreeMap<DataType, LabelTable> = BTreeMap::new();
        for ((data_type, label), mut group) in candidates {
            group.sort_by_key(|ex| std::cmp::Reverse(ex.priority()));
            if let [winner, runner_up, ..] = group.as_slice() {
                if winner.priority() == runner_up.priority() {
                    return Err(CoreError::ExtractorConflict {
                        data_type,
                        label,
                        priority: winner.priority(),
                        first: winner.name().to_string(),
                        second: runner_up.name().to_string(),
                    });
                }
                debug!(
                    %data_type,
                    label = %label,
                    winner = winner.name(),
                    overridden = group.len() - 1,
                    "extractor overrides lower priority registrants"
                );
            }
            let winner = group.swap_remove(0);
            resolved.entry(data_type).or_default().insert(label, winner);
        }
        Ok(Self { resolved })
    }

    /// Build the registry from the built-in extractors plus the given ones.
    pub fn with_defaults<I>(extractors: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = ExtractorRef>,
    {
        Self::register(default_extractors().into_iter().chain(extractors))
    }

    /// Look up the active extractor for a pair.
    pub fn resolve(&self, data_type: DataType, label: &str) -> Option<&ExtractorRef> {
        self.resolved.get(&data_type)?.get(label)
    }

    /// Compute one label for a record.
    ///
    /// The data type is taken from the record. Returns `None` when no extractor is registered
    /// for the pair or the extractor has no value for the record.
    pub fn extract<'a>(&self, label: &str, source: impl Into<LabelSource<'a>>) -> Option<LabelValues> {
        let source = source.into();
        let ex = self.resolve(source.data_type(), label)?;
        ex.extract(source).filter(|v| !v.is_empty())
    }

    /// Compute every registered label for a record, skipping labels without a value.
    pub fn labels_for<'a>(&self, source: impl Into<LabelSource<'a>>) -> BTreeMap<String, LabelValues> {
        let source = source.into();
        let Some(table) = self.resolved.get(&source.data_type()) else {
            return BTreeMap::new();
        };
        table
            .iter()
            .filter_map(|(label, ex)| {
                ex.extract(source)
                    .filter(|v| !v.is_empty())
                    .map(|v| (label.clone(), v))
            })
            .collect()
    }

    /// Number of resolved `(data type, label)` pairs.
    pub fn len(&self) -> usize {
        self.resolved.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (dt, table) in &self.resolved {
            for (label, ex) in table {
                map.entry(&format_args!("{dt}/{label}"), &ex.name());
            }
        }
        map.finish()
    }
}
