#![warn(missing_docs)]
//! Episode adapters for Simulink plants.
//!
//! Each module here describes one Simulink model to the generic
//! [`EpisodeAdapter`](simbridge_core::EpisodeAdapter) engine: the order of
//! the signals the model emits, the parameter and control vectors it
//! consumes, the reward of its control objective and the fixed-width
//! episode log of its deployment.
//!
//! Three plants, five descriptors:
//!
//! * [`CartPole`] — cart-pole balancing; survive-or-fail reward, pole angle
//!   bound of 15 degrees, 1000-step episodes.
//! * [`HouseHeat`] / [`HouseHeatHistory`] — thermostat control against a
//!   moving set point; the windowed variant feeds the platform the five
//!   most recent set-point misses instead of the raw room signals.
//! * [`RollingMill`] / [`RollingMillRecurrence`] — roll gap positioning;
//!   the recurrence variant adds three-deep force windows seeded from the
//!   first observation of the episode.
//!
//! The descriptors are data and formulas only; counters, episode return and
//! call-order bookkeeping live in the engine.
mod cartpole;
mod househeat;
mod househeat_history;
mod mill;
mod mill_recurrence;

pub use cartpole::{CartPole, CartPoleAction, CartPoleConfig, CartPoleState};
pub use househeat::{HouseHeat, HouseHeatAction, HouseHeatConfig, HouseHeatState};
pub use househeat_history::{HouseHeatHistory, HouseHeatHistoryState};
pub use mill::{MillAction, MillConfig, MillState, RollingMill};
pub use mill_recurrence::{MillRecurrenceState, RollingMillRecurrence};
