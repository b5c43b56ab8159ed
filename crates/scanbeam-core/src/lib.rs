//! # scanbeam Core Library
//!
//! Prepares input files for EGSnrc simulations of a scanning radiation beam
//! swept across a target, and translates the per-beamlet phase space files
//! those simulations produce.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture to keep the numeric core,
//! the run machinery, and the user-facing procedures cleanly separated.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models ([`core::models::Beamlet`],
//!   [`core::models::DirectionCosines`]) and the egsinp template codec (`core::io::egsinp`).
//!
//! - **[`engine`]: The Logic Core.** Holds the typed run configuration, history
//!   allocation, beamlet position generation, incidence geometry, template field
//!   application, and the async external command runner.
//!
//! - **[`workflows`]: The Public API.** Complete procedures tying `engine` and
//!   `core` together: [`workflows::prepare`] emits one simulation input per
//!   beamlet, [`workflows::translate`] runs the external phase space translator
//!   concurrently over all beamlets.

pub mod core;
pub mod engine;
pub mod workflows;
