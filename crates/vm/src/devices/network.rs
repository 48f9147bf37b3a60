//! Packet-switched machine network.
//!
//! Boots `size` copies of one program, each on its own thread, and routes
//! packets between them. The network works as follows:
//! 1. **Boot:** A machine's first `input` reads its own address.
//! 2. **Send:** Three consecutive outputs `(dest, x, y)` form one packet.
//! 3. **Receive:** Each `input` reads the next pending `x`, then its `y`; an empty queue reads as `-1`.
//! 4. **NAT:** Packets addressed to the NAT are remembered; once every machine is idle the NAT
//!    re-sends the last one to address 0.
//!
//! A machine is idle after `idle_threshold` consecutive empty reads with no
//! `output` in between. The idle registry is shared by all machine threads
//! and the switch behind a mutex.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use tracing::{debug, info, trace, warn};

use crate::common::{SimError, VmError};
use crate::config::{Config, NetworkConfig};
use crate::core::io::{Input, Output, PortClosed};
use crate::sim::loader::Program;
use crate::sim::runner::{MachineThread, spawn_with_ports};

/// Value read by a machine whose packet queue is empty.
const NO_PACKET: i64 = -1;

/// A routed packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Packet {
    /// Sender address.
    pub from: u64,
    /// Destination address.
    pub to: u64,
    /// First payload word.
    pub x: i64,
    /// Second payload word.
    pub y: i64,
}

/// When `Network::run` stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NatMode {
    /// Stop at the first packet addressed to the NAT and return it.
    #[default]
    FirstNatPacket,
    /// Stop when the NAT wakes address 0 with the same `y` twice in a row,
    /// returning the second wake-up packet.
    RepeatedWake,
}

/// Consecutive empty reads per machine.
#[derive(Debug)]
pub struct IdleTracker {
    empty_reads: Mutex<Vec<u64>>,
}

impl IdleTracker {
    /// Creates a tracker for `size` machines, all busy.
    pub fn new(size: usize) -> Self {
        Self {
            empty_reads: Mutex::new(vec![0; size]),
        }
    }

    fn counts(&self) -> MutexGuard<'_, Vec<u64>> {
        // Counters stay meaningful even if a holder panicked.
        self.empty_reads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records an empty read by `addr`.
    pub fn mark_empty(&self, addr: u64) {
        if let Some(count) = self.counts().get_mut(addr as usize) {
            *count = count.saturating_add(1);
        }
    }

    /// Marks `addr` busy.
    pub fn reset(&self, addr: u64) {
        if let Some(count) = self.counts().get_mut(addr as usize) {
            *count = 0;
        }
    }

    /// True if every machine has at least `threshold` consecutive empty reads.
    pub fn all_idle(&self, threshold: u64) -> bool {
        self.counts().iter().all(|&count| count >= threshold)
    }

    /// Consecutive empty reads of `addr`.
    pub fn empty_reads(&self, addr: u64) -> Option<u64> {
        self.counts().get(addr as usize).copied()
    }
}

/// Network interface, inbound side.
#[derive(Debug)]
struct NicInput {
    addr: u64,
    booted: bool,
    queue: Receiver<(i64, i64)>,
    pending_y: Option<i64>,
    idle: Arc<IdleTracker>,
    shutdown: Arc<AtomicBool>,
}

impl Input for NicInput {
    fn read(&mut self) -> Result<i64, PortClosed> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(PortClosed);
        }
        if !self.booted {
            self.booted = true;
            return Ok(self.addr as i64);
        }
        if let Some(y) = self.pending_y.take() {
            self.idle.reset(self.addr);
            return Ok(y);
        }
        match self.queue.try_recv() {
            Ok((x, y)) => {
                self.idle.reset(self.addr);
                self.pending_y = Some(y);
                Ok(x)
            }
            Err(TryRecvError::Empty) => {
                self.idle.mark_empty(self.addr);
                thread::yield_now();
                Ok(NO_PACKET)
            }
            Err(TryRecvError::Disconnected) => Err(PortClosed),
        }
    }
}

/// Network interface, outbound side.
#[derive(Debug)]
struct NicOutput {
    addr: u64,
    words: Vec<i64>,
    switch: Option<Sender<Packet>>,
    idle: Arc<IdleTracker>,
}

impl Output for NicOutput {
    fn write(&mut self, value: i64) -> Result<(), PortClosed> {
        self.idle.reset(self.addr);
        self.words.push(value);
        let [dest, x, y] = self.words[..] else {
            return Ok(());
        };
        self.words.clear();

        let Ok(to) = u64::try_from(dest) else {
            warn!(from = self.addr, dest, "dropping packet to negative address");
            return Ok(());
        };
        let packet = Packet {
            from: self.addr,
            to,
            x,
            y,
        };
        self.switch
            .as_ref()
            .ok_or(PortClosed)?
            .send(packet)
            .map_err(|_| PortClosed)
    }

    fn close(&mut self) {
        drop(self.switch.take());
    }
}

/// A booted network of machines and its switch.
#[derive(Debug)]
pub struct Network {
    config: NetworkConfig,
    queues: Vec<Sender<(i64, i64)>>,
    packets: Receiver<Packet>,
    machines: Vec<MachineThread>,
    idle: Arc<IdleTracker>,
    shutdown: Arc<AtomicBool>,
}

impl Network {
    /// Boots `config.network.size` machines running `program`.
    ///
    /// Fails with `SimError::Config` if the network is too large to boot.
    pub fn boot(program: &Program, config: &Config) -> Result<Self, SimError> {
        config.network.validate()?;
        let net = config.network.clone();
        let size = net.size as usize;
        let idle = Arc::new(IdleTracker::new(size));
        let shutdown = Arc::new(AtomicBool::new(false));
        let (switch_tx, packets) = unbounded();

        let mut queues = Vec::with_capacity(size);
        let mut machines = Vec::with_capacity(size);
        for addr in 0..net.size {
            let (queue_tx, queue) = unbounded();
            let input = NicInput {
                addr,
                booted: false,
                queue,
                pending_y: None,
                idle: Arc::clone(&idle),
                shutdown: Arc::clone(&shutdown),
            };
            let output = NicOutput {
                addr,
                words: Vec::with_capacity(3),
                switch: Some(switch_tx.clone()),
                idle: Arc::clone(&idle),
            };
            match spawn_with_ports(program, &config.machine, input, output) {
                Ok(machine) => machines.push(machine),
                Err(err) => {
                    shutdown.store(true, Ordering::Release);
                    return Err(err);
                }
            }
            queues.push(queue_tx);
        }
        info!(size = net.size, nat = net.nat_address, "network booted");

        Ok(Self {
            config: net,
            queues,
            packets,
            machines,
            idle,
            shutdown,
        })
    }

    /// Shared idle registry.
    pub const fn idle(&self) -> &Arc<IdleTracker> {
        &self.idle
    }

    /// Routes packets until `mode` is satisfied, then stops every machine.
    ///
    /// Fails with `SimError::Disconnected` if every machine stopped first.
    pub fn run(self, mode: NatMode) -> Result<Packet, SimError> {
        let outcome = self.switch(mode);
        self.stop();
        outcome
    }

    fn switch(&self, mode: NatMode) -> Result<Packet, SimError> {
        let poll = Duration::from_millis(self.config.poll_interval_ms);
        let mut nat: Option<Packet> = None;
        let mut last_wake_y: Option<i64> = None;

        loop {
            match self.packets.recv_timeout(poll) {
                Ok(packet) if packet.to == self.config.nat_address => {
                    debug!(from = packet.from, x = packet.x, y = packet.y, "NAT received packet");
                    if mode == NatMode::FirstNatPacket {
                        return Ok(packet);
                    }
                    nat = Some(packet);
                }
                Ok(packet) => self.deliver(packet),
                Err(RecvTimeoutError::Timeout) => {
                    let Some(stored) = nat else { continue };
                    if !self.idle.all_idle(self.config.idle_threshold) {
                        continue;
                    }
                    let wake = Packet {
                        from: self.config.nat_address,
                        to: 0,
                        x: stored.x,
                        y: stored.y,
                    };
                    debug!(x = wake.x, y = wake.y, "network idle, NAT waking address 0");
                    self.deliver(wake);
                    if last_wake_y == Some(wake.y) {
                        return Ok(wake);
                    }
                    last_wake_y = Some(wake.y);
                }
                Err(RecvTimeoutError::Disconnected) => return Err(SimError::Disconnected),
            }
        }
    }

    fn deliver(&self, packet: Packet) {
        let Some(queue) = self.queues.get(packet.to as usize) else {
            warn!(from = packet.from, to = packet.to, "dropping packet to unknown address");
            return;
        };
        trace!(from = packet.from, to = packet.to, x = packet.x, y = packet.y, "routing packet");
        self.idle.reset(packet.to);
        if queue.send((packet.x, packet.y)).is_err() {
            warn!(to = packet.to, "destination machine has stopped");
        }
    }

    /// Cancels every machine through its input and joins it.
    fn stop(self) {
        self.shutdown.store(true, Ordering::Release);
        drop(self.queues);
        for machine in self.machines {
            let name = machine.name().to_string();
            match machine.join() {
                Ok(_) | Err(SimError::Vm(VmError::InputClosed { .. })) => {}
                Err(err) => warn!(thread = %name, error = %err, "machine stopped abnormally"),
            }
        }
        debug!("network stopped");
    }
}
