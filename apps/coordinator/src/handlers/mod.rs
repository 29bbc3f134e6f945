// [apps/coordinator/src/handlers/mod.rs]
//! APARATO: HANDLER ACCESS MATRIX

pub mod dashboard;
pub mod health;
pub mod submit;

pub use dashboard::DashboardHandler;
pub use health::HealthHandler;
pub use submit::SubmitWorkHandler;
