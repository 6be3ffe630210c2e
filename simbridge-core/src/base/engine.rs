//! Handle to the external modeling engine.
use anyhow::Result;

/// Entry point into the numeric modeling engine hosting the plant.
///
/// The engine process is owned by the external driver; adapters only issue
/// commands through this seam, once per run, to load a model definition.
pub trait Engine {
    /// Evaluates a command string inside the engine.
    fn eval(&mut self, command: &str) -> Result<()>;
}
