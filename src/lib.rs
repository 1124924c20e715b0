pub mod app;
pub mod cache;
pub mod config;
pub mod ddragon;
pub mod display;
pub mod domain;
pub mod error;
pub mod output;
pub mod roster;
pub mod selector;
pub mod store;
pub mod tui;
