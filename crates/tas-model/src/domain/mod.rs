mod attributes;
pub use attributes::Attributes;

mod data_type;
pub use data_type::DataType;

mod constants;
pub use constants::{DefaultLabel, INPUT_AFFINITIES, INPUT_SKILLS, LABEL_AFFINITIES, LABEL_SKILLS};

/// Set of values computed for a single label on a single record.
///
/// Ordered so that label output is stable across runs.
pub type LabelValues = std::collections::BTreeSet<String>;
