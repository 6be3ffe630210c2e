//! House heating control with a window of recent set-point misses.
//!
//! Same plant and episode rules as [`HouseHeat`](crate::HouseHeat), but the
//! platform sees the last five absolute set-point misses instead of the raw
//! room signals, and the heater command stays continuous: clamped to
//! [-1, 1] and rescaled to [0, 1] for the plant.
use crate::househeat::{
    format_heat_init, format_heat_line, temperature_reward, HouseHeatAction, HouseHeatConfig,
    HouseHeatState, HEAT_HEADER, STEP_LIMIT,
};
use serde::{Deserialize, Serialize};
use simbridge_core::{History, SimModel, StepLine, Verdict};

const WINDOW: usize = 5;

/// State sent to the platform: heating cost plus the miss window.
///
/// `temperature_difference_t1` is the most recent miss and equals
/// `temperature_difference`; `_t5` is four ticks older. A fresh episode
/// starts from an all-zero window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseHeatHistoryState {
    /// Accumulated heating cost.
    pub heat_cost: f64,
    /// Absolute set-point miss of the current tick.
    pub temperature_difference: f64,
    /// Miss at the current tick (window slot 1).
    pub temperature_difference_t1: f64,
    /// Miss one tick earlier.
    pub temperature_difference_t2: f64,
    /// Miss two ticks earlier.
    pub temperature_difference_t3: f64,
    /// Miss three ticks earlier.
    pub temperature_difference_t4: f64,
    /// Miss four ticks earlier.
    pub temperature_difference_t5: f64,
    /// Outside temperature rate of change.
    pub outside_temp_change: f64,
}

/// Descriptor of the `simulink_househeat` model with a miss window.
#[derive(Clone, Debug)]
pub struct HouseHeatHistory {
    misses: History,
    // Raw room signals of the current tick; the log line shows these, not
    // the windowed state.
    room: HouseHeatState,
}

impl Default for HouseHeatHistory {
    fn default() -> Self {
        Self {
            misses: History::zeros(WINDOW),
            room: HouseHeatState::default(),
        }
    }
}

impl SimModel for HouseHeatHistory {
    type Config = HouseHeatConfig;
    type State = HouseHeatHistoryState;
    type Action = HouseHeatAction;

    fn model_name(&self) -> &'static str {
        "simulink_househeat"
    }

    fn executable_name(&self) -> &'static str {
        "./simulink_househeat"
    }

    fn signal_arity(&self) -> usize {
        7
    }

    fn step_limit(&self) -> usize {
        STEP_LIMIT
    }

    fn tstamp_index(&self) -> Option<usize> {
        Some(6)
    }

    fn reset(&mut self) {
        self.misses = History::zeros(WINDOW);
        self.room = HouseHeatState::default();
    }

    fn default_config(&self) -> HouseHeatConfig {
        HouseHeatConfig::default()
    }

    fn config_vec(&self, config: &HouseHeatConfig) -> Vec<f64> {
        vec![config.outside_phase]
    }

    fn state_from_signals(&mut self, signals: &[f64]) -> HouseHeatHistoryState {
        let room = HouseHeatState::from_signals(signals);
        let tdiff = (room.set_temp - room.room_temp).abs();
        self.misses.push(tdiff);
        let state = HouseHeatHistoryState {
            heat_cost: room.heat_cost,
            temperature_difference: tdiff,
            temperature_difference_t1: self.misses.get(0),
            temperature_difference_t2: self.misses.get(1),
            temperature_difference_t3: self.misses.get(2),
            temperature_difference_t4: self.misses.get(3),
            temperature_difference_t5: self.misses.get(4),
            outside_temp_change: room.outside_temp_change,
        };
        self.room = room;
        state
    }

    fn evaluate(&self, state: &HouseHeatHistoryState, limit_reached: bool) -> Verdict {
        let reward = temperature_reward(state.temperature_difference);
        let terminal = limit_reached || reward < 0.0;
        Verdict { reward, terminal }
    }

    fn action_vec(&self, action: &HouseHeatAction) -> Vec<f64> {
        // Agents without output clamping can leave the estimator range.
        let clamped = action.heater_on.max(-1.0).min(1.0);
        vec![(clamped + 1.0) / 2.0]
    }

    fn format_header(&self) -> &'static str {
        HEAT_HEADER
    }

    fn format_init(&self, _state: &HouseHeatHistoryState) -> String {
        format_heat_init(&self.room)
    }

    fn format_line(&self, line: &StepLine<HouseHeatHistoryState, HouseHeatAction>) -> String {
        format_heat_line(
            line.nsteps,
            line.tstamp.unwrap_or(0.0),
            line.action.heater_on,
            &self.room,
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

    fn signals(set_temp: f64, room_temp: f64) -> [f64; 7] {
        [12.0, set_temp, room_temp, 0.1, 10.0, -0.2, 0.0]
    }

    #[test]
    fn window_holds_the_five_most_recent_misses() {
        let mut adapter = EpisodeAdapter::new(HouseHeatHistory::default());
        adapter.episode_init();
        // Misses 1.0 through 5.0, oldest first. Episodes would terminate on
        // misses this large, but the window updates regardless.
        let mut last = None;
        for miss in 1..=5 {
            adapter.episode_step();
            let tick = adapter
                .convert_input(&signals(20.0 + miss as f64, 20.0))
                .unwrap();
            assert_eq!(tick.state.temperature_difference, miss as f64);
            last = Some(tick.state);
        }
        // After five distinct misses the window is exactly those five,
        // newest first.
        let state = last.unwrap();
        assert_eq!(state.temperature_difference_t1, 5.0);
        assert_eq!(state.temperature_difference_t2, 4.0);
        assert_eq!(state.temperature_difference_t3, 3.0);
        assert_eq!(state.temperature_difference_t4, 2.0);
        assert_eq!(state.temperature_difference_t5, 1.0);

        let tick = adapter.convert_input(&signals(20.0, 20.0)).unwrap();
        let state = tick.state;
        assert_eq!(state.temperature_difference_t1, 0.0);
        assert_eq!(state.temperature_difference_t2, 5.0);
        assert_eq!(state.temperature_difference_t3, 4.0);
        assert_eq!(state.temperature_difference_t4, 3.0);
        assert_eq!(state.temperature_difference_t5, 2.0);
    }

    #[test]
    fn current_miss_fills_the_first_window_slot() {
        let mut adapter = EpisodeAdapter::new(HouseHeatHistory::default());
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(21.0, 20.0)).unwrap();
        assert!((tick.state.temperature_difference_t1 - 1.0).abs() < 1e-12);
        assert_eq!(
            tick.state.temperature_difference,
            tick.state.temperature_difference_t1
        );
        assert_eq!(tick.state.temperature_difference_t2, 0.0);
    }

    #[test]
    fn episode_init_zeroes_the_window() {
        let mut adapter = EpisodeAdapter::new(HouseHeatHistory::default());
        adapter.episode_init();
        adapter.convert_input(&signals(22.0, 20.0)).unwrap();
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(20.0, 20.0)).unwrap();
        assert_eq!(tick.state.temperature_difference_t2, 0.0);
        assert_eq!(tick.state.temperature_difference_t5, 0.0);
    }

    #[test]
    fn heater_command_is_clamped_and_rescaled() {
        let mut adapter = EpisodeAdapter::new(HouseHeatHistory::default());
        adapter.episode_init();
        assert!(adapter.convert_output(None).is_empty());
        assert_eq!(
            adapter.convert_output(Some(HouseHeatAction { heater_on: 0.0 })),
            vec![0.5]
        );
        assert_eq!(
            adapter.convert_output(Some(HouseHeatAction { heater_on: -4.0 })),
            vec![0.0]
        );
        assert_eq!(
            adapter.convert_output(Some(HouseHeatAction { heater_on: 1.0 })),
            vec![1.0]
        );
    }

    #[test]
    fn log_line_shows_the_raw_room_signals() {
        let mut adapter = EpisodeAdapter::new(HouseHeatHistory::default());
        adapter.episode_init();
        adapter.convert_input(&signals(20.0, 20.0)).unwrap();
        adapter.episode_step();
        adapter.convert_output(Some(HouseHeatAction { heater_on: 1.0 }));
        adapter.convert_input(&signals(20.0, 20.0)).unwrap();
        assert_eq!(
            adapter.format_step().unwrap(),
            "   1 0.000 1 =>    12.0 20.0    20.0     0.1 10.0 -0.2 = 0  1.000"
        );
    }
}
