pub mod app;
pub mod backend;
pub mod board;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod reorder;
pub mod rules;
pub mod state;
pub mod storage;
pub mod trend;
pub mod ui;
pub mod validation;

pub use app::router;
pub use backend::BackendClient;
pub use board::HabitBoard;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_board, persist_board};
