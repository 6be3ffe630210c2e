//! Generic episode lifecycle engine.
use super::{Engine, SimModel, StepLine};
use crate::error::BridgeError;
use anyhow::Result;
use log::trace;

/// State, reward and termination flag of one tick, as handed to the driver.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick<S> {
    /// Named state for the platform.
    pub state: S,

    /// Scalar reward.
    pub reward: f64,

    /// Termination flag.
    pub terminal: bool,
}

/// Generic episode lifecycle engine around a plant descriptor.
///
/// The engine owns everything the plants share: the step counters, the
/// running episode return and the cached tick used by the formatters. The
/// external driver calls the lifecycle strictly sequentially: `episode_init`
/// once per episode, then per tick `episode_step`, `convert_output`,
/// `convert_input` and optionally `format_step`.
pub struct EpisodeAdapter<M: SimModel> {
    model: M,
    nsteps: usize,
    sim_nsteps: usize,
    total_reward: f64,
    state: Option<M::State>,
    action: Option<M::Action>,
    reward: Option<f64>,
    terminal: Option<bool>,
    tstamp: Option<f64>,
}

impl<M: SimModel> EpisodeAdapter<M> {
    /// Wraps a plant descriptor.
    pub fn new(model: M) -> Self {
        Self {
            model,
            nsteps: 0,
            sim_nsteps: 0,
            total_reward: 0.0,
            state: None,
            action: None,
            reward: None,
            terminal: None,
            tstamp: None,
        }
    }

    /// The wrapped descriptor.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Loads the model definition into the modeling engine.
    pub fn load<E: Engine>(&self, engine: &mut E) -> Result<()> {
        engine.eval(&format!("load_system('{}')", self.model.model_name()))
    }

    /// Path of the compiled executable counterpart of the model.
    pub fn executable_name(&self) -> &'static str {
        self.model.executable_name()
    }

    /// Resets the raw-tick counter at the start of a simulator episode.
    pub fn clockdivide_init(&mut self) {
        self.sim_nsteps = 0;
    }

    /// Called on every raw simulator tick; true forwards the tick to the
    /// agent loop.
    ///
    /// Currently every tick is forwarded. A divided clock would return true
    /// every N ticks, starting with the first (`sim_nsteps == 0`).
    pub fn clockdivide_step(&mut self) -> bool {
        let forward = true;
        self.sim_nsteps += 1;
        forward
    }

    /// Resets the counters, the episode return and the cached tick.
    pub fn episode_init(&mut self) {
        trace!("episode_init: {}", self.model.model_name());
        self.nsteps = 0;
        self.total_reward = 0.0;
        self.state = None;
        self.action = None;
        self.reward = None;
        self.terminal = None;
        self.tstamp = None;
        self.model.reset();
    }

    /// Advances the agent step counter at the start of an iteration.
    pub fn episode_step(&mut self) {
        self.nsteps += 1;
    }

    /// Builds the ordered parameter vector for the episode.
    ///
    /// `None` means the platform supplied no config (prediction mode); the
    /// plant default is substituted.
    pub fn convert_config(&self, config: Option<M::Config>) -> Vec<f64> {
        let config = config.unwrap_or_else(|| self.model.default_config());
        self.model.config_vec(&config)
    }

    /// Maps one signal vector into a [`Tick`] and caches it for the
    /// formatters.
    pub fn convert_input(&mut self, signals: &[f64]) -> Result<Tick<M::State>, BridgeError> {
        let expected = self.model.signal_arity();
        if signals.len() != expected {
            return Err(BridgeError::SignalArity {
                expected,
                got: signals.len(),
            });
        }
        self.tstamp = self.model.tstamp_index().map(|ix| signals[ix]);
        let state = self.model.state_from_signals(signals);
        let limit_reached = self.nsteps >= self.model.step_limit();
        let verdict = self.model.evaluate(&state, limit_reached);
        if self.nsteps > 0 {
            // The initial state, converted before the first step, does not
            // count toward the episode return.
            self.total_reward += verdict.reward;
        }
        trace!(
            "tick {}: reward = {}, terminal = {}",
            self.nsteps,
            verdict.reward,
            verdict.terminal
        );
        self.state = Some(state.clone());
        self.reward = Some(verdict.reward);
        self.terminal = Some(verdict.terminal);
        Ok(Tick {
            state,
            reward: verdict.reward,
            terminal: verdict.terminal,
        })
    }

    /// Builds the ordered control vector for an action of the platform.
    ///
    /// `None` means no action was issued and maps to an empty vector.
    pub fn convert_output(&mut self, action: Option<M::Action>) -> Vec<f64> {
        match action {
            None => Vec::new(),
            Some(action) => {
                let out = self.model.action_vec(&action);
                self.action = Some(action);
                out
            }
        }
    }

    /// Header and initial state lines, emitted once per episode.
    ///
    /// Requires that `convert_input` has run for the initial state.
    pub fn format_start(&self) -> Result<(String, String), BridgeError> {
        let state = self.state.as_ref().ok_or(BridgeError::StateUnset)?;
        Ok((
            self.model.format_header().to_string(),
            self.model.format_init(state),
        ))
    }

    /// One fixed-width line for the current tick.
    ///
    /// Requires that both an action and a state have been converted.
    pub fn format_step(&self) -> Result<String, BridgeError> {
        let state = self.state.as_ref().ok_or(BridgeError::StateUnset)?;
        let action = self.action.as_ref().ok_or(BridgeError::ActionUnset)?;
        let terminal = self.terminal.unwrap_or(false);
        let line = StepLine {
            nsteps: self.nsteps,
            tstamp: self.tstamp,
            state,
            action,
            reward: self.reward.unwrap_or(0.0),
            terminal,
            total_reward: if terminal {
                Some(self.total_reward)
            } else {
                None
            },
        };
        Ok(self.model.format_line(&line))
    }

    /// Steps taken by the agent in the current episode.
    pub fn nsteps(&self) -> usize {
        self.nsteps
    }

    /// Raw ticks taken by the simulator in the current episode.
    pub fn sim_nsteps(&self) -> usize {
        self.sim_nsteps
    }

    /// Running episode return.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Termination flag of the last converted tick.
    pub fn terminal(&self) -> bool {
        self.terminal.unwrap_or(false)
    }
}
