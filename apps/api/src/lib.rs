pub mod dashboard;
pub mod handlers;
pub mod navigation;
pub mod router;
pub mod state;

pub use state::ApiState;
