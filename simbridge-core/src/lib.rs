#![warn(missing_docs)]
//! Episode adapters between simulated plants and a reinforcement learning
//! platform.
//!
//! A plant runs inside an external numeric modeling engine; a training
//! platform drives it one tick at a time through a fixed lifecycle owned by
//! an external driver loop. This crate holds the plant-independent half of
//! that lifecycle: [`EpisodeAdapter`] owns the step counters, the episode
//! return and the cached tick used by the log formatters, while a
//! [`SimModel`] descriptor contributes the record layouts, the constants and
//! the closed-form reward of one concrete plant.
//!
//! Toward the simulator the wire format is an ordered `f64` signal vector in
//! both directions; toward the platform it is a named dictionary, handled by
//! the [`wire`] module. Plants that expose a window of past samples keep a
//! [`History`].
pub mod config;
pub mod error;
pub mod wire;

mod base;
pub use base::{Engine, EpisodeAdapter, SimModel, StepLine, Tick, Verdict};

mod history;
pub use history::History;
