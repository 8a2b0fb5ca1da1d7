mod domain;
pub use domain::{Attributes, DataType, DefaultLabel, LabelValues};
pub use domain::{INPUT_AFFINITIES, INPUT_SKILLS, LABEL_AFFINITIES, LABEL_SKILLS};

mod error;
pub use error::{ModelError, ModelResult};

mod directory;
pub use directory::{Group, User};

mod task;
pub use task::TaskData;

mod source;
pub use source::LabelSource;
