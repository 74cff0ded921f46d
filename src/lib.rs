pub mod app;
pub mod clock;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod timer;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_month, resolve_data_dir};
