// Crate root library declaration and module exports.
pub mod bucket;
pub mod clock;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod map;
pub mod model;
pub mod source;
pub mod store;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
