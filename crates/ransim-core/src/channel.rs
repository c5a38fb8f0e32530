//! The shared downlink channel resource.

use crate::error::{SimError, SimResult};

/// A counting-semaphore gate over the downlink channel.
///
/// The default capacity of 1 models a single channel shared by all traffic
/// classes: at most one packet in flight at any simulated instant. A larger
/// capacity widens the gate without changing the arbitration policy, which
/// lives in the event state machine, not here.
#[derive(Debug)]
pub struct Channel {
    capacity: usize,
    in_flight: usize,
}

impl Channel {
    pub fn new(capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidConfig(
                "channel capacity must be at least 1".into(),
            ));
        }
        Ok(Channel {
            capacity,
            in_flight: 0,
        })
    }

    /// Claim a transmission grant.
    ///
    /// Returns `false` without blocking when every grant is occupied; the
    /// resource itself never queues waiters.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight < self.capacity {
            self.in_flight += 1;
            true
        } else {
            false
        }
    }

    /// Return a transmission grant.
    ///
    /// Releasing with no grant outstanding is a sequencing bug in the
    /// arbitration policy and fails with [`SimError::ClearGate`].
    pub fn release(&mut self) -> SimResult<()> {
        if self.in_flight == 0 {
            return Err(SimError::ClearGate);
        }
        self.in_flight -= 1;
        Ok(())
    }

    /// Grants currently outstanding.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_free(&self) -> bool {
        self.in_flight < self.capacity
    }
}
