//! Simulation configuration and its eager validation.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::traffic::{ClassParams, InterArrival, SizeRule, TrafficClass};

/// Default slot length in milliseconds.
pub const DEFAULT_SLOT_MS: f64 = 0.5;

/// Default horizon: one 1000 ms frame of 0.5 ms slots.
pub const DEFAULT_DURATION_SLOTS: u64 = 2000;

/// Per-class configuration as it appears in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub class: TrafficClass,
    pub size: SizeRule,
    /// Transmission rate in size-units per millisecond.
    pub rate: f64,
    pub inter_arrival: InterArrival,
}

/// Full configuration for one simulation run.
///
/// All distribution bounds and parameters live here; nothing is hard-coded
/// in the engine, so alternate calibrations are plain config changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Horizon in slots; events scheduled past it are discarded unexecuted.
    #[serde(default = "default_duration")]
    pub duration_slots: u64,
    /// Slot length in milliseconds.
    #[serde(default = "default_slot_ms")]
    pub slot_ms: f64,
    /// Simultaneous transmission grants (1 = single shared channel).
    #[serde(default = "default_channels")]
    pub channel_capacity: usize,
    /// Seed for the run's random sequence.
    #[serde(default)]
    pub seed: u64,
    /// Traffic classes active in this run.
    pub classes: Vec<ClassConfig>,
}

fn default_duration() -> u64 {
    DEFAULT_DURATION_SLOTS
}

fn default_slot_ms() -> f64 {
    DEFAULT_SLOT_MS
}

fn default_channels() -> usize {
    1
}

impl SimulationConfig {
    /// The stock three-class downlink calibration: voice at a constant
    /// 40 units / rate 51, video with Pareto sizes on [100, 250], and
    /// latency-critical traffic with log-normal sizes on [1e6, 5e6]. All
    /// classes regenerate after a uniform delay in [0, 160) slots.
    pub fn downlink_default(seed: u64) -> Self {
        SimulationConfig {
            duration_slots: DEFAULT_DURATION_SLOTS,
            slot_ms: DEFAULT_SLOT_MS,
            channel_capacity: 1,
            seed,
            classes: vec![
                ClassConfig {
                    class: TrafficClass::Voice,
                    size: SizeRule::Fixed { size: 40.0 },
                    rate: 51.0,
                    inter_arrival: InterArrival::Uniform { max: 160 },
                },
                ClassConfig {
                    class: TrafficClass::Video,
                    size: SizeRule::Pareto {
                        min: 100.0,
                        max: 250.0,
                        shape: 1.2,
                    },
                    rate: 5_000.0,
                    inter_arrival: InterArrival::Uniform { max: 160 },
                },
                ClassConfig {
                    class: TrafficClass::LatencyCritical,
                    size: SizeRule::LogNormal {
                        min: 1e6,
                        max: 5e6,
                        mu: 2e6,
                        sigma: 0.722e6,
                    },
                    rate: 10_000.0,
                    inter_arrival: InterArrival::Uniform { max: 160 },
                },
            ],
        }
    }

    /// Validate and compile the per-class parameter table.
    pub(crate) fn compile(&self) -> SimResult<[Option<ClassParams>; 3]> {
        if self.slot_ms <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "slot length must be positive, got {} ms",
                self.slot_ms
            )));
        }
        let mut table: [Option<ClassParams>; 3] = [None, None, None];
        for cfg in &self.classes {
            let slot = &mut table[cfg.class.index()];
            if slot.is_some() {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate configuration for class {}",
                    cfg.class
                )));
            }
            *slot = Some(ClassParams::new(
                cfg.class,
                &cfg.size,
                cfg.rate,
                cfg.inter_arrival,
            )?);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration_compiles() {
        let table = SimulationConfig::downlink_default(0).compile().unwrap();
        assert!(table.iter().all(|p| p.is_some()));
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let mut config = SimulationConfig::downlink_default(0);
        let extra = config.classes[0].clone();
        config.classes.push(extra);
        assert!(matches!(
            config.compile(),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_slot_length_is_rejected() {
        let mut config = SimulationConfig::downlink_default(0);
        config.slot_ms = 0.0;
        assert!(matches!(
            config.compile(),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bad_distribution_parameters_are_rejected() {
        let mut config = SimulationConfig::downlink_default(0);
        config.classes[1].size = SizeRule::Pareto {
            min: 100.0,
            max: 250.0,
            shape: -1.0,
        };
        assert!(matches!(
            config.compile(),
            Err(SimError::InvalidConfig(_))
        ));
    }
}
