pub mod config;
pub mod handlers;
pub mod middleware;
mod router;
pub mod state;

pub use config::Settings;
pub use router::create_router;
pub use state::AppState;
