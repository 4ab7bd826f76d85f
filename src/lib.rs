pub mod app;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod history;
pub mod models;
pub mod progress;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, SlotStorage};
pub use store::ExerciseStore;
