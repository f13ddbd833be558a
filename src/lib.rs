pub mod config;
pub mod cover;
pub mod engine;
pub mod error;
pub mod field;
pub mod game;
pub mod geometry;
pub mod reveal;
pub mod tui;
