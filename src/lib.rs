//! Core of the CSV time-series viewer: parsing, column selection, chart
//! projection and the event-driven session that ties them together. The
//! egui front end in `main.rs` is one [`session::Presenter`].

pub mod chart;
pub mod config;
pub mod data;
pub mod selection;
pub mod session;
