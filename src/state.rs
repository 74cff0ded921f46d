use crate::models::TaskMap;
use crate::timer::Timer;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The task store for the month currently in memory, plus the ephemeral
/// session signals that never reach storage.
#[derive(Debug)]
pub struct Planner {
    pub month_key: String,
    pub tasks: TaskMap,
    /// One-shot congratulations signal, dismissed by the UI.
    pub congrats: bool,
}

impl Planner {
    pub fn new(month_key: String, tasks: TaskMap) -> Self {
        Self {
            month_key,
            tasks,
            congrats: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub planner: Arc<Mutex<Planner>>,
    pub timer: Timer,
}

impl AppState {
    pub fn new(data_dir: PathBuf, month_key: String, tasks: TaskMap) -> Self {
        Self {
            data_dir,
            planner: Arc::new(Mutex::new(Planner::new(month_key, tasks))),
            timer: Timer::new(),
        }
    }
}
