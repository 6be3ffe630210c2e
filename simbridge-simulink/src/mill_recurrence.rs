//! Roll gap positioning with force recurrence windows.
//!
//! Same plant and episode rules as [`RollingMill`](crate::RollingMill), but
//! the platform additionally sees the three most recent roll forces per
//! axis. There is no meaningful zero force to start from, so the windows
//! seed themselves with the first observed value of the episode.
use crate::mill::{
    format_mill_init, format_mill_line, offset_reward, MillAction, MillConfig, MillState,
    MILL_HEADER, STEP_LIMIT, U_X_GAIN, U_Y_GAIN,
};
use serde::{Deserialize, Serialize};
use simbridge_core::{History, SimModel, StepLine, Verdict};

const WINDOW: usize = 3;

/// State sent to the platform: forces, offsets and the force windows.
///
/// `f_x_t1` is the force of the current tick and equals `f_x`; `_t3` is two
/// ticks older. On the first tick of an episode all three slots hold the
/// first observed force.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MillRecurrenceState {
    /// Roll force, x axis.
    pub f_x: f64,
    /// Roll force, y axis.
    pub f_y: f64,
    /// x-axis force at the current tick (window slot 1).
    pub f_x_t1: f64,
    /// x-axis force one tick earlier.
    pub f_x_t2: f64,
    /// x-axis force two ticks earlier.
    pub f_x_t3: f64,
    /// y-axis force at the current tick (window slot 1).
    pub f_y_t1: f64,
    /// y-axis force one tick earlier.
    pub f_y_t2: f64,
    /// y-axis force two ticks earlier.
    pub f_y_t3: f64,
    /// Position offset, x axis.
    pub delta_x: f64,
    /// Position offset, y axis.
    pub delta_y: f64,
}

/// Descriptor of the `rolling_mill` model with force windows.
#[derive(Clone, Debug)]
pub struct RollingMillRecurrence {
    f_x_window: History,
    f_y_window: History,
    // Raw plant signals of the current tick, for the log line.
    logged: MillState,
}

impl Default for RollingMillRecurrence {
    fn default() -> Self {
        Self {
            f_x_window: History::deferred(WINDOW),
            f_y_window: History::deferred(WINDOW),
            logged: MillState::default(),
        }
    }
}

impl SimModel for RollingMillRecurrence {
    type Config = MillConfig;
    type State = MillRecurrenceState;
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

    fn reset(&mut self) {
        self.f_x_window = History::deferred(WINDOW);
        self.f_y_window = History::deferred(WINDOW);
        self.logged = MillState::default();
    }

    fn default_config(&self) -> MillConfig {
        MillConfig::default()
    }

    fn config_vec(&self, config: &MillConfig) -> Vec<f64> {
        vec![config.dummy]
    }

    fn state_from_signals(&mut self, signals: &[f64]) -> MillRecurrenceState {
        let raw = MillState::from_signals(signals);
        self.f_x_window.push(raw.f_x);
        self.f_y_window.push(raw.f_y);
        let state = MillRecurrenceState {
            f_x: raw.f_x,
            f_y: raw.f_y,
            f_x_t1: self.f_x_window.get(0),
            f_x_t2: self.f_x_window.get(1),
            f_x_t3: self.f_x_window.get(2),
            f_y_t1: self.f_y_window.get(0),
            f_y_t2: self.f_y_window.get(1),
            f_y_t3: self.f_y_window.get(2),
            delta_x: raw.delta_x,
            delta_y: raw.delta_y,
        };
        self.logged = raw;
        state
    }

    fn evaluate(&self, state: &MillRecurrenceState, limit_reached: bool) -> Verdict {
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

    fn format_init(&self, _state: &MillRecurrenceState) -> String {
        format_mill_init(&self.logged)
    }

    fn format_line(&self, line: &StepLine<MillRecurrenceState, MillAction>) -> String {
        format_mill_line(
            line.nsteps,
            line.tstamp.unwrap_or(0.0),
            line.action.u_x * U_X_GAIN,
            line.action.u_y * U_Y_GAIN,
            &self.logged,
            line.terminal,
            line.reward,
            line.total_reward,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simbridge_core::EpisodeAdapter;

    fn signals(f_x: f64, f_y: f64) -> [f64; 6] {
        [f_x, f_y, 0.01, 0.01, 0.0, 0.0]
    }

    #[test]
    fn first_tick_seeds_the_windows_with_the_first_sample() {
        let mut adapter = EpisodeAdapter::new(RollingMillRecurrence::default());
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(100.0, 50.0)).unwrap();
        let state = tick.state;
        assert_eq!(state.f_x_t1, 100.0);
        assert_eq!(state.f_x_t2, 100.0);
        assert_eq!(state.f_x_t3, 100.0);
        assert_eq!(state.f_y_t1, 50.0);
        assert_eq!(state.f_y_t2, 50.0);
        assert_eq!(state.f_y_t3, 50.0);
    }

    #[test]
    fn later_ticks_shift_the_windows() {
        let mut adapter = EpisodeAdapter::new(RollingMillRecurrence::default());
        adapter.episode_init();
        adapter.convert_input(&signals(100.0, 50.0)).unwrap();
        adapter.episode_step();
        let tick = adapter.convert_input(&signals(110.0, 60.0)).unwrap();
        let state = tick.state;
        assert_eq!(state.f_x_t1, 110.0);
        assert_eq!(state.f_x_t2, 100.0);
        assert_eq!(state.f_x_t3, 100.0);
        assert_eq!(state.f_y_t1, 60.0);
        assert_eq!(state.f_y_t2, 50.0);
        assert_eq!(state.f_y_t3, 50.0);
    }

    #[test]
    fn episode_init_discards_the_previous_windows() {
        let mut adapter = EpisodeAdapter::new(RollingMillRecurrence::default());
        adapter.episode_init();
        adapter.convert_input(&signals(100.0, 50.0)).unwrap();
        adapter.episode_step();
        adapter.convert_input(&signals(110.0, 60.0)).unwrap();

        adapter.episode_init();
        let tick = adapter.convert_input(&signals(7.0, 3.0)).unwrap();
        assert_eq!(tick.state.f_x_t3, 7.0);
        assert_eq!(tick.state.f_y_t3, 3.0);
    }

    #[test]
    fn reward_and_output_match_the_plain_mill() {
        let mut adapter = EpisodeAdapter::new(RollingMillRecurrence::default());
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(100.0, 50.0)).unwrap();
        assert!((tick.reward - 0.4746).abs() < 1e-3);
        assert_eq!(
            adapter.convert_output(Some(MillAction { u_x: 1.0, u_y: 1.0 })),
            vec![30.0, 20.0]
        );
    }
}
