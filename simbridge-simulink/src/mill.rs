//! Roll gap positioning on the `rolling_mill` model.
use serde::{Deserialize, Serialize};
use simbridge_core::{SimModel, StepLine, Verdict};

pub(crate) const STEP_LIMIT: usize = 500;

/// 0.10^0.4; scales the combined offset so a 0.1 total miss lands at 0.0.
const OFFSET_SCALE: f64 = 0.398;

/// Actuator gains applied to the normalized agent commands.
pub(crate) const U_X_GAIN: f64 = 30.0;
pub(crate) const U_Y_GAIN: f64 = 20.0;

/// Episode parameters of the rolling mill model.
///
/// The model takes no real parameters; the single slot is a placeholder the
/// adapter fills with -1.0 when the platform supplies no config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MillConfig {
    /// Placeholder parameter.
    pub dummy: f64,
}

impl Default for MillConfig {
    fn default() -> Self {
        Self { dummy: -1.0 }
    }
}

/// Forces and position offsets of the roll stand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MillState {
    /// Roll force, x axis.
    pub f_x: f64,
    /// Roll force, y axis.
    pub f_y: f64,
    /// Position offset, x axis.
    pub delta_x: f64,
    /// Position offset, y axis.
    pub delta_y: f64,
}

impl MillState {
    pub(crate) fn from_signals(signals: &[f64]) -> Self {
        Self {
            f_x: signals[0],
            f_y: signals[1],
            delta_x: signals[2],
            delta_y: signals[3],
        }
    }
}

/// Normalized actuator commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MillAction {
    /// Position command, x axis.
    pub u_x: f64,
    /// Position command, y axis.
    pub u_y: f64,
}

/// Reward of the combined position offset, floored at -1.0.
///
/// The plant occasionally produces huge offsets; the floor keeps those
/// ticks from dominating the return.
pub(crate) fn offset_reward(delta_x: f64, delta_y: f64) -> f64 {
    let reward = 1.0 - (delta_x.abs() + delta_y.abs()).powf(0.4) / OFFSET_SCALE;
    if reward < -1.0 {
        -1.0
    } else {
        reward
    }
}

pub(crate) const MILL_HEADER: &str =
    "  itr   tm    u_x   u_y =>         f_x         f_y        dx      dy = t    rwd";

pub(crate) fn format_mill_init(s: &MillState) -> String {
    format!(
        "                           {:11.1} {:11.1}   {:7.3} {:7.3}",
        s.f_x, s.f_y, s.delta_x, s.delta_y
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn format_mill_line(
    nsteps: usize,
    tstamp: f64,
    u_x: f64,
    u_y: f64,
    s: &MillState,
    terminal: bool,
    reward: f64,
    total_reward: Option<f64>,
) -> String {
    let total = match total_reward {
        Some(total) => format!(" {:6.3}", total),
        None => String::new(),
    };
    format!(
        " {:4} {:5.3} {:5.1} {:5.1} => {:11.1} {:11.1}   {:7.3} {:7.3} = {} {:6.3}{}",
        nsteps,
        tstamp,
        u_x,
        u_y,
        s.f_x,
        s.f_y,
        s.delta_x,
        s.delta_y,
        terminal as u8,
        reward,
        total,
    )
}

/// Descriptor of the `rolling_mill` model.
///
/// Signals arrive as `[f_x, f_y, delta_x, delta_y, _, tstamp]`; the fifth
/// slot is unused by the adapter. The episode ends when the combined offset
/// drives the reward negative or after 500 steps. Commands leave the agent
/// normalized and are scaled by the actuator gains on the way out.
#[derive(Clone, Debug, Default)]
pub struct RollingMill;

impl SimModel for RollingMill {
    type Config = MillConfig;
    type State = MillState;
    type Action = MillAction;

    fn model_name(&self) -> &'static str {
        "rolling_mill"
    }

    fn executable_name(&self) -> &'static str {
        "./rolling_mill"
    }

    fn signal_arity(&self) -> usize {
        6
    }

    fn step_limit(&self) -> usize {
        STEP_LIMIT
    }

    fn tstamp_index(&self) -> Option<usize> {
        Some(5)
    }

    fn default_config(&self) -> MillConfig {
        MillConfig::default()
    }

    fn config_vec(&self, config: &MillConfig) -> Vec<f64> {
        vec![config.dummy]
    }

    fn state_from_signals(&mut self, signals: &[f64]) -> MillState {
        MillState::from_signals(signals)
    }

    fn evaluate(&self, state: &MillState, limit_reached: bool) -> Verdict {
        let reward = offset_reward(state.delta_x, state.delta_y);
        let terminal = reward < 0.0 || limit_reached;
        Verdict { reward, terminal }
    }

    fn action_vec(&self, action: &MillAction) -> Vec<f64> {
        vec![action.u_x * U_X_GAIN, action.u_y * U_Y_GAIN]
    }

    fn format_header(&self) -> &'static str {
        MILL_HEADER
    }

    fn format_init(&self, state: &MillState) -> String {
        format_mill_init(state)
    }

    fn format_line(&self, line: &StepLine<MillState, MillAction>) -> String {
        format_mill_line(
            line.nsteps,
            line.tstamp.unwrap_or(0.0),
            line.action.u_x * U_X_GAIN,
            line.action.u_y * U_Y_GAIN,
            line.state,
            line.terminal,
            line.reward,
            line.total_reward,
        )
    }
}
