pub mod error;
pub mod extractor;
pub mod metrics;
pub mod registry;
pub mod user_system;

pub use error::CoreError;
pub use extractor::{
    DelimitedValueExtractor, ExtractorRef, LabelValueExtractor, TaskSkillsExtractor,
    default_extractors,
};
pub use metrics::{DirectoryMetrics, MetricsHandle, NoOpMetrics, QueryOutcome, noop_metrics};
pub use registry::ExtractorRegistry;
pub use user_system::{UserSystemCatalog, UserSystemError, UserSystemService};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::extractor::{ExtractorRef, LabelValueExtractor};
    pub use crate::registry::ExtractorRegistry;
    pub use crate::user_system::{UserSystemError, UserSystemService};
}
