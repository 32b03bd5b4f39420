use anyhow::{Error, Result};

use crate::clock::{Clock, SystemClock};

/// Lets at most one call through per pulse. Pulses sit on a fixed grid of
/// `interval` multiples, so eligibility is decided against the grid rather
/// than against the time of the previous call.
pub struct PulseGate<C = SystemClock> {
    pub interval: u64,
    last_pulse: Option<u64>,
    clock: C,
}

impl PulseGate<SystemClock> {
    pub fn new(interval: u64) -> Result<Self> {
        Self::with_clock(interval, SystemClock)
    }
}

impl<C: Clock> PulseGate<C> {
    pub fn with_clock(interval: u64, clock: C) -> Result<Self> {
        if interval == 0 {
            return Err(Error::msg("interval must be positive"));
        }

        Ok(Self {
            interval,
            last_pulse: None,
            clock,
        })
    }

    /// True when this call lands on a fresh pulse; false when it is dropped.
    ///
    /// On a pass, `last_pulse` snaps to the grid boundary at or before now,
    /// not to now itself. A call arriving exactly on the next boundary
    /// passes. The very first call always passes.
    pub fn try_pass(&mut self) -> bool {
        let now = self.clock.now_millis();
        if let Some(last) = self.last_pulse {
            if now < last + self.interval {
                return false;
            }
        }

        self.last_pulse = Some(now / self.interval * self.interval);
        true
    }
}

/// Wraps `func` so it runs at most once per `interval` milliseconds of wall
/// time. Dropped calls return `None` without invoking `func`; passed calls
/// forward the arguments and return `Some` of the result.
pub fn pulse_gate<F, Args, R>(func: F, interval: u64) -> Result<impl FnMut(Args) -> Option<R>>
where
    F: FnMut(Args) -> R,
{
    pulse_gate_with_clock(func, interval, SystemClock)
}

/// Same as [`pulse_gate`], reading time from the given clock.
pub fn pulse_gate_with_clock<F, Args, R, C>(
    mut func: F,
    interval: u64,
    clock: C,
) -> Result<impl FnMut(Args) -> Option<R>>
where
    F: FnMut(Args) -> R,
    C: Clock,
{
    let mut gate = PulseGate::with_clock(interval, clock)?;

    Ok(move |args: Args| gate.try_pass().then(|| func(args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn gate_at(interval: u64, clock: &ManualClock) -> PulseGate<ManualClock> {
        PulseGate::with_clock(interval, clock.clone()).unwrap()
    }

    #[test]
    fn first_call_passes_even_at_time_zero() {
        let clock = ManualClock::new(0);
        let mut gate = gate_at(1000, &clock);

        assert!(gate.try_pass());
    }

    #[test]
    fn first_call_passes_at_wall_clock_scale() {
        let clock = ManualClock::new(1_717_171_717_171);
        let mut gate = gate_at(1000, &clock);

        assert!(gate.try_pass());
    }

    #[test]
    fn one_pass_per_pulse_window() {
        let clock = ManualClock::new(0);
        let mut gate = gate_at(1000, &clock);

        assert!(gate.try_pass());
        clock.set(50);
        assert!(!gate.try_pass());
        clock.set(1000);
        assert!(gate.try_pass());
        clock.set(1999);
        assert!(!gate.try_pass());
        clock.set(2000);
        assert!(gate.try_pass());
    }

    #[test]
    fn boundary_call_passes() {
        let clock = ManualClock::new(250);
        let mut gate = gate_at(1000, &clock);

        assert!(gate.try_pass());
        clock.set(999);
        assert!(!gate.try_pass());
        clock.set(1000);
        assert!(gate.try_pass());
    }

    #[test]
    fn pulse_snaps_to_grid_not_to_call_time() {
        let clock = ManualClock::new(1700);
        let mut gate = gate_at(1000, &clock);

        assert!(gate.try_pass());
        // snapped to 1000, so 2000 is eligible; sliding from 1700 would
        // hold the next call until 2700
        clock.set(2000);
        assert!(gate.try_pass());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(PulseGate::new(0).is_err());
        assert!(PulseGate::with_clock(0, ManualClock::new(0)).is_err());
    }

    #[test]
    fn wrapper_forwards_args_and_result() {
        let clock = ManualClock::new(0);
        let mut gated =
            pulse_gate_with_clock(|(a, b): (u64, u64)| a + b, 1000, clock.clone()).unwrap();

        assert_eq!(gated((2, 40)), Some(42));
        assert_eq!(gated((3, 4)), None);
        clock.advance(1000);
        assert_eq!(gated((3, 4)), Some(7));
    }
}
