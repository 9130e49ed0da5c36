//! Pokemon detail TUI
//!
//! Fetches one Pokemon from PokeAPI and shows it as a tabbed detail view.
//! The library exposes the modules for testing; the binary wires them to a
//! terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod palette;
pub mod reducer;
pub mod state;
pub mod view_model;
