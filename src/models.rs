use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of one day's task. A record can only carry a "done" fact
/// through the `Completed` variant, so `done` implying `saved` is
/// structural rather than a pair of booleans to keep in sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTask", into = "RawTask")]
pub enum TaskRecord {
    #[default]
    Empty,
    Drafted {
        text: String,
    },
    Saved {
        text: String,
    },
    Completed {
        text: String,
    },
}

impl TaskRecord {
    pub fn text(&self) -> &str {
        match self {
            TaskRecord::Empty => "",
            TaskRecord::Drafted { text }
            | TaskRecord::Saved { text }
            | TaskRecord::Completed { text } => text,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, TaskRecord::Saved { .. } | TaskRecord::Completed { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskRecord::Completed { .. })
    }
}

/// Flat on-disk shape of one record, as written to month snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawTask {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub done: bool,
}

impl From<RawTask> for TaskRecord {
    fn from(raw: RawTask) -> Self {
        if raw.done {
            // done implies saved; snapshots that claim otherwise are
            // coerced on the way in.
            TaskRecord::Completed { text: raw.text }
        } else if raw.saved {
            TaskRecord::Saved { text: raw.text }
        } else if raw.text.is_empty() {
            TaskRecord::Empty
        } else {
            TaskRecord::Drafted { text: raw.text }
        }
    }
}

impl From<TaskRecord> for RawTask {
    fn from(record: TaskRecord) -> Self {
        match record {
            TaskRecord::Empty => RawTask::default(),
            TaskRecord::Drafted { text } => RawTask {
                text,
                saved: false,
                done: false,
            },
            TaskRecord::Saved { text } => RawTask {
                text,
                saved: true,
                done: false,
            },
            TaskRecord::Completed { text } => RawTask {
                text,
                saved: true,
                done: true,
            },
        }
    }
}

/// Sparse day-of-month -> task mapping for one displayed month.
pub type TaskMap = BTreeMap<u32, TaskRecord>;

#[derive(Debug, Deserialize)]
pub struct TaskTextRequest {
    pub day: u32,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskDayRequest {
    pub day: u32,
}

#[derive(Debug, Deserialize)]
pub struct TimerDurationRequest {
    pub minutes: u64,
}

#[derive(Debug, Serialize)]
pub struct TaskView {
    pub day: u32,
    pub text: String,
    pub saved: bool,
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct PlannerResponse {
    pub date: String,
    pub day: u32,
    pub days_in_month: u32,
    pub month_label: String,
    pub tasks: Vec<TaskView>,
    pub progress: u32,
    pub streak: u32,
    pub congrats: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimerResponse {
    pub remaining_seconds: u64,
    pub running: bool,
    pub expired: bool,
    pub display: String,
}
