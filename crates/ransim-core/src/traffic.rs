//! Traffic classes, their packet generation rules, and the packets
//! themselves.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SimError, SimResult};
use crate::sampler::{TruncatedLogNormal, TruncatedPareto};
use crate::time::SimTime;

/// The three downlink traffic classes served by the shared channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficClass {
    /// Constant-bitrate voice traffic.
    Voice,
    /// Bursty video traffic with Pareto-distributed packet sizes.
    Video,
    /// Latency-critical traffic with log-normal packet sizes.
    LatencyCritical,
}

impl TrafficClass {
    /// All classes, in stable table order.
    pub const ALL: [TrafficClass; 3] = [
        TrafficClass::Voice,
        TrafficClass::Video,
        TrafficClass::LatencyCritical,
    ];

    /// Stable index into per-class tables.
    pub fn index(self) -> usize {
        match self {
            TrafficClass::Voice => 0,
            TrafficClass::Video => 1,
            TrafficClass::LatencyCritical => 2,
        }
    }
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficClass::Voice => write!(f, "voice"),
            TrafficClass::Video => write!(f, "video"),
            TrafficClass::LatencyCritical => write!(f, "latency-critical"),
        }
    }
}

/// How a class draws packet sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeRule {
    /// Every packet has the same size.
    Fixed { size: f64 },
    /// `min(min + Pareto(shape), max)`.
    Pareto { min: f64, max: f64, shape: f64 },
    /// Log-normal truncated to `[min, max]` on the linear scale.
    LogNormal { min: f64, max: f64, mu: f64, sigma: f64 },
}

/// Delay until a class's next generation event, in slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterArrival {
    /// Constant delay. Must be at least one slot: a zero delay would
    /// re-schedule generation at the same instant forever, so simulated
    /// time could never advance past the first generation slot.
    Fixed { slots: u64 },
    /// Uniform integer in `[0, max)`.
    Uniform { max: u64 },
}

/// A class's size rule compiled to a validated sampler.
#[derive(Debug, Clone)]
enum SizeSampler {
    Fixed(f64),
    Pareto(TruncatedPareto),
    LogNormal(TruncatedLogNormal),
}

/// Validated runtime parameters for one traffic class.
#[derive(Debug, Clone)]
pub struct ClassParams {
    class: TrafficClass,
    sampler: SizeSampler,
    rate: f64,
    inter_arrival: InterArrival,
}

impl ClassParams {
    pub fn new(
        class: TrafficClass,
        size: &SizeRule,
        rate: f64,
        inter_arrival: InterArrival,
    ) -> SimResult<Self> {
        if rate <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "class {class}: rate must be positive, got {rate}"
            )));
        }
        match inter_arrival {
            InterArrival::Fixed { slots: 0 } => {
                // A zero delay would regenerate in the same slot forever and
                // the run would never drain.
                return Err(SimError::InvalidConfig(format!(
                    "class {class}: fixed inter-arrival needs at least one slot"
                )));
            }
            InterArrival::Uniform { max: 0 } => {
                return Err(SimError::InvalidConfig(format!(
                    "class {class}: uniform inter-arrival needs max > 0"
                )));
            }
            _ => {}
        }
        let sampler = match *size {
            SizeRule::Fixed { size } => {
                if size <= 0.0 {
                    return Err(SimError::InvalidConfig(format!(
                        "class {class}: fixed size must be positive, got {size}"
                    )));
                }
                SizeSampler::Fixed(size)
            }
            SizeRule::Pareto { min, max, shape } => {
                SizeSampler::Pareto(TruncatedPareto::new(min, max, shape)?)
            }
            SizeRule::LogNormal {
                min,
                max,
                mu,
                sigma,
            } => SizeSampler::LogNormal(TruncatedLogNormal::new(min, max, mu, sigma)?),
        };
        Ok(ClassParams {
            class,
            sampler,
            rate,
            inter_arrival,
        })
    }

    pub fn class(&self) -> TrafficClass {
        self.class
    }

    /// Draw the delay until this class's next generation event.
    pub fn next_inter_arrival<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self.inter_arrival {
            InterArrival::Fixed { slots } => slots,
            InterArrival::Uniform { max } => rng.gen_range(0..max),
        }
    }

    /// Sample a new packet for this class at `now`.
    pub fn generate<R: Rng + ?Sized>(&self, now: SimTime, slot_ms: f64, rng: &mut R) -> Packet {
        let size = match &self.sampler {
            SizeSampler::Fixed(size) => *size,
            SizeSampler::Pareto(p) => p.sample(rng),
            SizeSampler::LogNormal(l) => l.sample(rng),
        };
        Packet::new(self.class, now, size, self.rate, slot_ms)
    }
}

/// A single downlink packet.
///
/// Immutable once created: it either transmits immediately or sits unchanged
/// in its class's wait queue until the channel frees. Its identity ends when
/// its transmission-complete event executes.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    class: TrafficClass,
    created: SimTime,
    size: f64,
    rate: f64,
    tx_slots: u64,
}

impl Packet {
    /// `size / rate` approximates the transmission time in milliseconds; it
    /// is rounded up to a whole millisecond and then converted to slots,
    /// truncating.
    pub(crate) fn new(
        class: TrafficClass,
        created: SimTime,
        size: f64,
        rate: f64,
        slot_ms: f64,
    ) -> Packet {
        let tx_slots = ((size / rate).ceil() / slot_ms).floor() as u64;
        Packet {
            class,
            created,
            size,
            rate,
            tx_slots,
        }
    }

    pub fn class(&self) -> TrafficClass {
        self.class
    }

    /// Slot at which the packet's generation event fired.
    pub fn created(&self) -> SimTime {
        self.created
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Transmission duration in slots.
    pub fn tx_slots(&self) -> u64 {
        self.tx_slots
    }
}
