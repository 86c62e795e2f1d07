pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod table;
pub mod tags;
pub mod ui;
pub mod state;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_table, persist_table};
