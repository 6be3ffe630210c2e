//! One cart-pole episode through the full adapter lifecycle.
//!
//! Stands in for the external driver loop: an engine stub, a canned plant
//! rollout and a random force policy. The pole drifts a little more every
//! tick, so the episode ends at the angle bound after a few dozen steps.
use anyhow::Result;
use log::info;
use simbridge_core::{Engine, EpisodeAdapter};
use simbridge_simulink::{CartPole, CartPoleAction};

struct StubEngine;

impl Engine for StubEngine {
    fn eval(&mut self, command: &str) -> Result<()> {
        info!("engine <- {}", command);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let mut adapter = EpisodeAdapter::new(CartPole);
    let mut engine = StubEngine;
    adapter.load(&mut engine)?;

    adapter.episode_init();
    adapter.clockdivide_init();
    info!("sim config = {:?}", adapter.convert_config(None));

    let mut theta: f64 = 0.01;
    adapter.convert_input(&[0.0, 0.0, theta, 0.0])?;
    let (header, init) = adapter.format_start()?;
    info!("{}", header);
    info!("{}", init);

    loop {
        if !adapter.clockdivide_step() {
            continue;
        }
        adapter.episode_step();
        let f = fastrand::f64() * 2.0 - 1.0;
        let control = adapter.convert_output(Some(CartPoleAction { f }));
        log::trace!("sim <- {:?}", control);

        // The stub plant: the pole drifts, nudged by the force.
        theta += 0.004 + 0.002 * f.abs();
        let tick = adapter.convert_input(&[0.0, 0.1 * f, theta, 0.0])?;
        info!("{}", adapter.format_step()?);
        if tick.terminal {
            break;
        }
    }
    info!("episode return = {:.3}", adapter.total_reward());
    Ok(())
}
