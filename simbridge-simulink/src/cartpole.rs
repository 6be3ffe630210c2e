//! Cart-pole balancing on the `simulink_cartpole` model.
use serde::{Deserialize, Serialize};
use simbridge_core::{SimModel, StepLine, Verdict};

const STEP_LIMIT: usize = 1000;

/// Pole angle bound in radians (15 degrees); leaving it ends the episode.
const THETA_BOUND: f64 = 0.261799;

/// Episode parameters of the cart-pole model.
///
/// The model takes no real parameters; the single slot is a placeholder the
/// adapter fills with -1.0 when the platform supplies no config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartPoleConfig {
    /// Placeholder parameter.
    pub dummy: f64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self { dummy: -1.0 }
    }
}

/// State of the cart and pole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartPoleState {
    /// Cart position.
    pub x: f64,
    /// Cart velocity.
    pub dx: f64,
    /// Pole angle in radians.
    pub theta: f64,
    /// Pole angular velocity.
    pub dtheta: f64,
}

/// Force command on the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartPoleAction {
    /// Horizontal force.
    pub f: f64,
}

/// Descriptor of the `simulink_cartpole` model.
///
/// Signals arrive as `[x, dx, theta, dtheta]`. The reward is 1.0 on every
/// surviving tick and 0.0 on the terminal one; the episode ends when the
/// pole leaves the angle bound or after 1000 steps.
#[derive(Clone, Debug, Default)]
pub struct CartPole;

impl SimModel for CartPole {
    type Config = CartPoleConfig;
    type State = CartPoleState;
    type Action = CartPoleAction;

    fn model_name(&self) -> &'static str {
        "simulink_cartpole"
    }

    fn executable_name(&self) -> &'static str {
        "./simulink_cartpole"
    }

    fn signal_arity(&self) -> usize {
        4
    }

    fn step_limit(&self) -> usize {
        STEP_LIMIT
    }

    fn default_config(&self) -> CartPoleConfig {
        CartPoleConfig::default()
    }

    fn config_vec(&self, config: &CartPoleConfig) -> Vec<f64> {
        vec![config.dummy]
    }

    fn state_from_signals(&mut self, signals: &[f64]) -> CartPoleState {
        CartPoleState {
            x: signals[0],
            dx: signals[1],
            theta: signals[2],
            dtheta: signals[3],
        }
    }

    fn evaluate(&self, state: &CartPoleState, limit_reached: bool) -> Verdict {
        let terminal = state.theta.abs() > THETA_BOUND || limit_reached;
        let reward = if terminal { 0.0 } else { 1.0 };
        Verdict { reward, terminal }
    }

    fn action_vec(&self, action: &CartPoleAction) -> Vec<f64> {
        vec![action.f]
    }

    fn format_header(&self) -> &'static str {
        "  itr     f =>       x      dx     theta  dtheta = t    rwd"
    }

    fn format_init(&self, state: &CartPoleState) -> String {
        format!(
            "               {:7.3} {:7.3}   {:7.3} {:7.3}",
            state.x, state.dx, state.theta, state.dtheta
        )
    }

    fn format_line(&self, line: &StepLine<CartPoleState, CartPoleAction>) -> String {
        let total = match line.total_reward {
            Some(total) => format!(" {:6.3}", total),
            None => String::new(),
        };
        format!(
            " {:4} {:5.1} => {:7.3} {:7.3}   {:7.3} {:7.3} = {} {:6.3}{}",
            line.nsteps,
            line.action.f,
            line.state.x,
            line.state.dx,
            line.state.theta,
            line.state.dtheta,
            line.terminal as u8,
            line.reward,
            total,
        )
    }
}
