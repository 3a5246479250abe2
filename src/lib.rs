//! Forecast TUI - current conditions and a daily forecast from WeatherAPI.com
//!
//! The binary wires these modules into a tui-dispatch runtime; they are
//! exposed here for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod images;
pub mod reducer;
pub mod runner;
pub mod state;
pub mod theme;
pub mod view;
