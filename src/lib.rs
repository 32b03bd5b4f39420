//! Call throttling on a fixed time grid. Wrap a function and an interval and
//! the wrapper runs it at most once per interval boundary, silently dropping
//! the calls made in between.
//!
//! ```
//! use pulse_gate::pulse_gate;
//!
//! let mut log_once_per_second = pulse_gate(|msg: &str| println!("{msg}"), 1000).unwrap();
//!
//! let _ = log_once_per_second("prints");
//! let _ = log_once_per_second("dropped until the next pulse");
//! ```

pub mod clock;
pub mod gate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{pulse_gate, pulse_gate_with_clock, PulseGate};
