// Library surface for headless/integration tests and reuse.
// Keep this lean; terminal setup lives in main.rs.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod timer;
pub mod ui;
