mod app;
mod input;
pub mod logging;
mod ui;

pub use app::run_app;
