pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scoreboard;
pub mod session;
pub mod snake;
pub mod snapshot;
pub mod terminal_input;
pub mod terminal_runtime;
pub mod ui;
