//! The event state machine, scheduler loop, and statistics accumulator.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::channel::Channel;
use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::queue::{EventQueue, WaitQueue};
use crate::time::SimTime;
use crate::traffic::{ClassParams, Packet, TrafficClass};

/// The two event kinds driving the simulation.
///
/// Both are terminal after a single execution: they schedule fresh event
/// instances rather than re-firing themselves.
#[derive(Debug)]
enum EventKind {
    /// A class produces a new packet and schedules its successor.
    Generation(TrafficClass),
    /// A packet finishes occupying the channel.
    TransmissionComplete(Packet),
}

/// Final counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    /// Packets whose transmission completed within the horizon.
    pub packet_count: u64,
    /// Sum over completed packets of completion slot minus creation slot
    /// (queueing plus transmission).
    pub total_used_time: u64,
    /// Sum of queueing delay in slots over packets that went through a wait
    /// queue. Packets transmitted immediately on generation contribute
    /// nothing.
    pub total_wait_time: u64,
    /// Completed packets per class, indexed by [`TrafficClass::index`].
    pub completed_by_class: [u64; 3],
    /// Packets still sitting in each class's wait queue when the run ended.
    pub residual_backlog: [usize; 3],
    /// Simulated time when the run stopped.
    pub final_time: SimTime,
}

/// One simulation run.
///
/// All mutable state for the run lives here, so independent runs never share
/// anything and can proceed concurrently. Execution is single-threaded and
/// purely logical-time: each event handler runs to completion before the
/// next event is popped.
#[derive(Debug)]
pub struct Simulation {
    events: EventQueue<EventKind>,
    wait: [WaitQueue; 3],
    channel: Channel,
    params: [Option<ClassParams>; 3],
    rng: ChaCha8Rng,
    now: SimTime,
    horizon: u64,
    slot_ms: f64,
    stats: SimulationStats,
}

impl Simulation {
    /// Build a run from a configuration.
    ///
    /// Configuration problems are rejected here, before any event executes.
    /// Every configured class starts with a generation event at slot 0.
    pub fn new(config: &SimulationConfig) -> SimResult<Self> {
        let params = config.compile()?;
        let channel = Channel::new(config.channel_capacity)?;
        let mut sim = Simulation {
            events: EventQueue::new(),
            wait: [WaitQueue::new(), WaitQueue::new(), WaitQueue::new()],
            channel,
            params,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            now: SimTime::ZERO,
            horizon: config.duration_slots,
            slot_ms: config.slot_ms,
            stats: SimulationStats::default(),
        };
        for class in TrafficClass::ALL {
            if sim.params[class.index()].is_some() {
                sim.events.insert(SimTime::ZERO, EventKind::Generation(class));
            }
        }
        Ok(sim)
    }

    /// Drive the run to completion and return the final counters.
    ///
    /// The loop pops the earliest pending event, advances simulated time to
    /// its scheduled slot, and stops once that slot passes the horizon; the
    /// popped event is then discarded without side effects. Termination is
    /// driven by time, not event count.
    pub fn run(mut self) -> SimResult<SimulationStats> {
        while !self.events.is_empty() {
            let (time, event) = self.events.remove_earliest()?;
            self.now = time;
            if self.now.slots() > self.horizon {
                break;
            }
            self.execute(event)?;
        }
        for class in TrafficClass::ALL {
            self.stats.residual_backlog[class.index()] = self.wait[class.index()].len();
        }
        self.stats.final_time = self.now;
        Ok(self.stats)
    }

    fn execute(&mut self, event: EventKind) -> SimResult<()> {
        match event {
            EventKind::Generation(class) => self.on_generation(class),
            EventKind::TransmissionComplete(packet) => self.on_transmission_complete(packet),
        }
    }

    /// Generation(C): sample a packet, schedule the next Generation(C), then
    /// apply the arbitration policy.
    fn on_generation(&mut self, class: TrafficClass) -> SimResult<()> {
        let params = self.params[class.index()].as_ref().ok_or_else(|| {
            SimError::InvalidConfig(format!("generation event for unconfigured class {class}"))
        })?;
        let packet = params.generate(self.now, self.slot_ms, &mut self.rng);
        let delay = params.next_inter_arrival(&mut self.rng);
        trace!(
            time = self.now.slots(),
            %class,
            size = packet.size(),
            next_in = delay,
            "generated packet"
        );
        self.events.insert(self.now + delay, EventKind::Generation(class));

        // A non-empty backlog is never bypassed, even when the channel
        // happens to be free: per-class FIFO would break otherwise.
        if !self.wait[class.index()].is_empty() {
            self.wait[class.index()].enqueue(packet);
            return Ok(());
        }
        if self.channel.try_acquire() {
            debug!(
                time = self.now.slots(),
                %class,
                size = packet.size(),
                tx_slots = packet.tx_slots(),
                "transmitting"
            );
            let done = self.now + packet.tx_slots();
            self.events
                .insert(done, EventKind::TransmissionComplete(packet));
        } else {
            self.wait[class.index()].enqueue(packet);
        }
        Ok(())
    }

    /// TransmissionComplete(p): release the channel, record statistics, and
    /// offer the freed grant back to p's own class only.
    ///
    /// This is the class-sticky arbitration policy: a class with backlog
    /// keeps the channel until its own queue empties. Other classes' waiting
    /// packets contend again only through their own generation events.
    fn on_transmission_complete(&mut self, packet: Packet) -> SimResult<()> {
        let class = packet.class();
        self.channel.release()?;
        debug!(time = self.now.slots(), %class, "transmission complete");

        self.stats.packet_count += 1;
        self.stats.completed_by_class[class.index()] += 1;
        self.stats.total_used_time += self.now.since(packet.created());

        if !self.wait[class.index()].is_empty() {
            let next = self.wait[class.index()].dequeue()?;
            let acquired = self.channel.try_acquire();
            debug_assert!(acquired, "grant released this instant must be available");
            let waited = self.now.since(next.created());
            self.stats.total_wait_time += waited;
            trace!(
                time = self.now.slots(),
                %class,
                waited,
                "transmitting from backlog"
            );
            let done = self.now + next.tx_slots();
            self.events
                .insert(done, EventKind::TransmissionComplete(next));
        }
        Ok(())
    }

    /// Current simulated time (the slot of the last popped event).
    pub fn current_time(&self) -> SimTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassConfig;
    use crate::traffic::{InterArrival, SizeRule};

    fn voice_only(duration_slots: u64, inter_arrival: InterArrival) -> SimulationConfig {
        SimulationConfig {
            duration_slots,
            slot_ms: 0.5,
            channel_capacity: 1,
            seed: 0,
            classes: vec![ClassConfig {
                class: TrafficClass::Voice,
                size: SizeRule::Fixed { size: 40.0 },
                rate: 51.0,
                inter_arrival,
            }],
        }
    }

    #[test]
    fn no_classes_means_nothing_happens() {
        let config = SimulationConfig {
            duration_slots: 100,
            slot_ms: 0.5,
            channel_capacity: 1,
            seed: 0,
            classes: Vec::new(),
        };
        let stats = Simulation::new(&config).unwrap().run().unwrap();
        assert_eq!(stats, SimulationStats::default());
    }

    #[test]
    fn events_past_the_horizon_are_discarded() {
        // One packet completes at slot 2; the next generation at slot 50
        // falls past the 10-slot horizon and is popped but never executed.
        let config = voice_only(10, InterArrival::Fixed { slots: 50 });
        let stats = Simulation::new(&config).unwrap().run().unwrap();
        assert_eq!(stats.packet_count, 1);
        assert_eq!(stats.total_used_time, 2);
        assert_eq!(stats.total_wait_time, 0);
        assert_eq!(stats.final_time, SimTime(50));
    }

    #[test]
    fn event_at_exact_horizon_still_executes() {
        // Completions land on even slots; the one at slot 10 == horizon runs.
        let config = voice_only(10, InterArrival::Fixed { slots: 2 });
        let stats = Simulation::new(&config).unwrap().run().unwrap();
        assert_eq!(stats.packet_count, 5);
    }
}
