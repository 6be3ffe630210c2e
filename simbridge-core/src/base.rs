//! Lifecycle engine and the per-plant descriptor seam.
mod adapter;
mod engine;
mod model;
pub use adapter::{EpisodeAdapter, Tick};
pub use engine::Engine;
pub use model::{SimModel, StepLine, Verdict};
