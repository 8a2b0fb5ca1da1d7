use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of record a label extractor applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// Human task instance handed over by the host.
    Task,
    /// Directory user.
    User,
}

impl DataType {
    /// Returns the data type as a static string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataType::Task => "task",
            DataType::User => "user",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
