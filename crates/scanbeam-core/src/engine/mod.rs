pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod positions;
pub mod templates;
