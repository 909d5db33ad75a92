// Core infrastructure modules
pub mod config;
pub mod core;

// Roster management modules
pub mod grid;
pub mod menu;
pub mod roster;
