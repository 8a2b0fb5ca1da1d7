use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a host task relevant to label extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    /// Host-assigned task identifier.
    pub task_id: u64,
    /// Task name, informational only.
    #[serde(default)]
    pub name: String,
    /// Task input variables as provided by the process engine.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub input_data: Map<String, Value>,
}

impl TaskData {
    pub fn new(task_id: u64, name: impl Into<String>) -> Self {
        Self {
            task_id,
            name: name.into(),
            input_data: Map::new(),
        }
    }

    /// Set an input variable and return `self` for chaining.
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input_data.insert(key.into(), value.into());
        self
    }

    /// Get an input variable; JSON `null` is reported as absent.
    pub fn input(&self, key: &str) -> Option<&Value> {
        self.input_data.get(key).filter(|v| !v.is_null())
    }
}
