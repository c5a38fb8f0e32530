//! Discrete-event simulation of slot-level packet traffic on a shared
//! downlink channel.
//!
//! Three traffic classes (constant-bitrate voice, bursty video, and a
//! latency-critical class) contend for a single transmission gate. The
//! engine is a classic event-driven scheduler: a time-ordered queue of
//! Generation and TransmissionComplete events, one FIFO backlog per class,
//! and a counting-semaphore channel resource. Simulated time advances only
//! by popping the next scheduled event; a run is fully determined by its
//! configuration and seed.
//!
//! # Example
//!
//! ```
//! use ransim_core::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::downlink_default(7);
//! let stats = Simulation::new(&config).unwrap().run().unwrap();
//! assert!(stats.total_used_time >= stats.total_wait_time);
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod queue;
pub mod sampler;
pub mod sim;
pub mod time;
pub mod traffic;

pub use channel::Channel;
pub use config::{ClassConfig, SimulationConfig, DEFAULT_DURATION_SLOTS, DEFAULT_SLOT_MS};
pub use error::{SimError, SimResult};
pub use sim::{Simulation, SimulationStats};
pub use time::SimTime;
pub use traffic::{InterArrival, Packet, SizeRule, TrafficClass};
