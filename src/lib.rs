pub mod app;
pub mod challenges;
pub mod emissions;
pub mod errors;
pub mod handlers;
pub mod leaderboard;
pub mod level;
pub mod models;
pub mod progression;
pub mod state;
pub mod store;
pub mod streak;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use store::{ProgressStore, load_data, resolve_data_path};
