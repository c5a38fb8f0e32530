//! Simulated time, counted in fixed-length slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A point in simulated time: the number of slots since simulation start.
///
/// The slot length in milliseconds is a property of the simulation
/// configuration (0.5 ms in the default calibration); `SimTime` itself is a
/// plain slot counter and never carries the unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Slot count since simulation start.
    pub fn slots(self) -> u64 {
        self.0
    }

    /// Slots elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
