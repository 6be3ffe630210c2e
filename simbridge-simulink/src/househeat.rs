//! House heating control on the `simulink_househeat` model.
use serde::{Deserialize, Serialize};
use simbridge_core::{SimModel, StepLine, Verdict};

pub(crate) const STEP_LIMIT: usize = 480;

/// 2.0^0.4; scales set-point misses so +/-2 degC maps onto [0, 1].
const DIFF_SCALE: f64 = 1.32;

/// Episode parameters of the house heating model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseHeatConfig {
    /// Phase offset of the outside temperature cycle.
    pub outside_phase: f64,
}

impl Default for HouseHeatConfig {
    fn default() -> Self {
        Self { outside_phase: 0.0 }
    }
}

/// Signals of the heating plant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseHeatState {
    /// Accumulated heating cost.
    pub heat_cost: f64,
    /// Thermostat set point.
    pub set_temp: f64,
    /// Room temperature.
    pub room_temp: f64,
    /// Room temperature rate of change.
    pub room_temp_change: f64,
    /// Outside temperature.
    pub outside_temp: f64,
    /// Outside temperature rate of change.
    pub outside_temp_change: f64,
}

impl HouseHeatState {
    pub(crate) fn from_signals(signals: &[f64]) -> Self {
        Self {
            heat_cost: signals[0],
            set_temp: signals[1],
            room_temp: signals[2],
            room_temp_change: signals[3],
            outside_temp: signals[4],
            outside_temp_change: signals[5],
        }
    }
}

/// Heater command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseHeatAction {
    /// Heater drive from the agent; positive means heat.
    pub heater_on: f64,
}

/// Reward of a set-point miss of `tdiff` degrees.
///
/// The absolute miss is raised to the 0.4 power, which spreads the reward
/// distribution near the set point, then scaled so exact tracking scores
/// 1.0 and a miss past 2 degC goes negative.
pub(crate) fn temperature_reward(tdiff: f64) -> f64 {
    1.0 - tdiff.powf(0.4) / DIFF_SCALE
}

pub(crate) const HEAT_HEADER: &str =
    " itr  time h =>    cost  set   troom   droom tout dout = t    rwd";

pub(crate) fn format_heat_init(s: &HouseHeatState) -> String {
    format!(
        "                {:7.1} {:4.1} {:7.1} {:7.1} {:4.1} {:4.1}",
        s.heat_cost, s.set_temp, s.room_temp, s.room_temp_change, s.outside_temp, s.outside_temp_change
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn format_heat_line(
    nsteps: usize,
    tstamp: f64,
    heater_on: f64,
    s: &HouseHeatState,
    terminal: bool,
    reward: f64,
    total_reward: Option<f64>,
) -> String {
    let total = match total_reward {
        Some(total) => format!(" {:6.3}", total),
        None => String::new(),
    };
    format!(
        " {:3} {:5.3} {:1.0} => {:7.1} {:4.1} {:7.1} {:7.1} {:4.1} {:4.1} = {} {:6.3}{}",
        nsteps,
        tstamp,
        heater_on,
        s.heat_cost,
        s.set_temp,
        s.room_temp,
        s.room_temp_change,
        s.outside_temp,
        s.outside_temp_change,
        terminal as u8,
        reward,
        total,
    )
}

/// Descriptor of the `simulink_househeat` model.
///
/// Signals arrive as `[heat_cost, set_temp, room_temp, room_temp_change,
/// outside_temp, outside_temp_change, tstamp]`. The episode ends when the
/// room drifts more than 2 degC from the set point (the reward goes
/// negative) or after 480 steps. The agent drives an on/off heater; the
/// continuous command is thresholded at zero.
#[derive(Clone, Debug, Default)]
pub struct HouseHeat;

impl SimModel for HouseHeat {
    type Config = HouseHeatConfig;
    type State = HouseHeatState;
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

    fn default_config(&self) -> HouseHeatConfig {
        HouseHeatConfig::default()
    }

    fn config_vec(&self, config: &HouseHeatConfig) -> Vec<f64> {
        vec![config.outside_phase]
    }

    fn state_from_signals(&mut self, signals: &[f64]) -> HouseHeatState {
        HouseHeatState::from_signals(signals)
    }

    fn evaluate(&self, state: &HouseHeatState, limit_reached: bool) -> Verdict {
        let tdiff = (state.set_temp - state.room_temp).abs();
        let reward = temperature_reward(tdiff);
        let terminal = limit_reached || reward < 0.0;
        Verdict { reward, terminal }
    }

    fn action_vec(&self, action: &HouseHeatAction) -> Vec<f64> {
        // The plant wants a switch, the agent emits an estimator range.
        let heater_on = if action.heater_on > 0.0 { 1.0 } else { 0.0 };
        vec![heater_on]
    }

    fn format_header(&self) -> &'static str {
        HEAT_HEADER
    }

    fn format_init(&self, state: &HouseHeatState) -> String {
        format_heat_init(state)
    }

    fn format_line(&self, line: &StepLine<HouseHeatState, HouseHeatAction>) -> String {
        let heater_on = if line.action.heater_on > 0.0 { 1.0 } else { 0.0 };
        format_heat_line(
            line.nsteps,
            line.tstamp.unwrap_or(0.0),
            heater_on,
            line.state,
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

    fn signals(set_temp: f64, room_temp: f64, tstamp: f64) -> [f64; 7] {
        [12.0, set_temp, room_temp, 0.1, 10.0, -0.2, tstamp]
    }

    #[test]
    fn exact_tracking_scores_one() {
        let mut adapter = EpisodeAdapter::new(HouseHeat);
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(20.0, 20.0, 0.0)).unwrap();
        assert_eq!(tick.reward, 1.0);
        assert!(!tick.terminal);
    }

    #[test]
    fn two_degree_miss_scores_about_zero() {
        let mut adapter = EpisodeAdapter::new(HouseHeat);
        adapter.episode_init();
        let tick = adapter.convert_input(&signals(22.0, 20.0, 0.0)).unwrap();
        assert!(tick.reward.abs() < 1e-3, "reward = {}", tick.reward);
    }

    #[test]
    fn drifting_past_two_degrees_terminates() {
        let mut adapter = EpisodeAdapter::new(HouseHeat);
        adapter.episode_init();
        adapter.episode_step();
        let tick = adapter.convert_input(&signals(23.0, 20.0, 0.0)).unwrap();
        assert!(tick.reward < 0.0);
        assert!(tick.terminal);
    }

    #[test]
    fn prediction_mode_config_is_the_outside_phase() {
        let adapter = EpisodeAdapter::new(HouseHeat);
        assert_eq!(adapter.convert_config(None), vec![0.0]);
        assert_eq!(
            adapter.convert_config(Some(HouseHeatConfig { outside_phase: 0.5 })),
            vec![0.5]
        );
    }

    #[test]
    fn heater_command_is_thresholded() {
        let mut adapter = EpisodeAdapter::new(HouseHeat);
        adapter.episode_init();
        assert!(adapter.convert_output(None).is_empty());
        assert_eq!(
            adapter.convert_output(Some(HouseHeatAction { heater_on: 0.3 })),
            vec![1.0]
        );
        assert_eq!(
            adapter.convert_output(Some(HouseHeatAction { heater_on: -0.3 })),
            vec![0.0]
        );
    }

    #[test]
    fn step_line_matches_the_deployed_log_format() {
        let mut adapter = EpisodeAdapter::new(HouseHeat);
        adapter.episode_init();
        adapter.convert_input(&signals(20.0, 20.0, 0.0)).unwrap();
        adapter.episode_step();
        adapter.convert_output(Some(HouseHeatAction { heater_on: 0.7 }));
        adapter.convert_input(&signals(20.0, 20.0, 0.125)).unwrap();
        assert_eq!(
            adapter.format_step().unwrap(),
            "   1 0.125 1 =>    12.0 20.0    20.0     0.1 10.0 -0.2 = 0  1.000"
        );
    }
}
