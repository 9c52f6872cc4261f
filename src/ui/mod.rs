//! Terminal front-end split across logical submodules.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
