//! Label value extractors.
//!
//! An extractor computes the values of one label for one kind of record.
//! Extractors never fail: a record the extractor has nothing to say about yields `None`.
mod defaults;
pub use defaults::{DEFAULT_PRIORITY, DelimitedValueExtractor, default_extractors};

mod task_skills;
pub use task_skills::TaskSkillsExtractor;

mod values;

use std::sync::Arc;

use tas_model::{DataType, LabelSource, LabelValues};

/// Strategy computing the values of a single label for a single [`DataType`].
///
/// Several extractors may declare the same `(data_type, label_name)` pair;
/// [`crate::ExtractorRegistry`] keeps the one with the highest priority.
pub trait LabelValueExtractor: Send + Sync {
    /// Extractor name used in logs and conflict reports.
    fn name(&self) -> &str;

    /// Kind of record this extractor applies to.
    fn data_type(&self) -> DataType;

    /// Label produced by this extractor (e.g. `"SKILLS"`).
    fn label_name(&self) -> &str;

    /// Higher wins when several extractors target the same label.
    fn priority(&self) -> i32;

    /// Compute label values for the given record.
    ///
    /// Returns `None` when the record carries nothing for this label,
    /// including records of a different data type. Never returns `Some` of an empty set.
    fn extract(&self, source: LabelSource<'_>) -> Option<LabelValues>;
}

/// Shared handle to an extractor.
pub type ExtractorRef = Arc<dyn LabelValueExtractor>;
