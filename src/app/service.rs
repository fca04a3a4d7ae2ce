//! Monitor service: The hexagonal core.
//!
//! [`MonitorService`] owns every [`Signal`], the per-machine reject latch,
//! and the command dispatcher.  One call to [`MonitorService::tick`] is one
//! full poll-and-dispatch pass.  All I/O flows through port traits injected
//! at call sites, making the service testable with mock adapters.
//!
//! ```text
//!  SamplePort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        MonitorService         │
//!   ClockPort ──▶ │ Debounce · Resend · Policies  │ ──▶ Transport
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Poll order
//!
//! Machines are processed in configuration order.  Within a machine the
//! order is fixed: availability, reject, completion.  The reject edge must
//! be consumed before the completion edge of the same cycle, otherwise a
//! reject mark and a mould-close arriving together would be classified as
//! a good part.  The clock is read per operation rather than once per pass.

use log::{info, warn};

use crate::config::{MAX_MACHINES, MachineConfig, MachineName, MonitorConfig};
use crate::dispatch::CommandDispatcher;
use crate::error::{DispatchError, Result};
use crate::policy::{AvailabilityPolicy, CommandKind, CompletionPolicy, MachineCommands};
use crate::signal::{Debouncer, ResendScheduler, Signal};
use crate::transport::Transport;

use super::events::{InputRole, MonitorEvent, MonitorStats};
use super::ports::{ClockPort, EventSink, SamplePort};

// ───────────────────────────────────────────────────────────────
// Machine
// ───────────────────────────────────────────────────────────────

/// Runtime state of one monitored machine.
#[derive(Debug, Clone)]
pub struct Machine {
    name: MachineName,
    commands: MachineCommands,
    availability: Signal,
    reject: Option<Signal>,
    completion: Signal,
    parts: CompletionPolicy,
}

impl Machine {
    fn new(config: &MachineConfig, now_ms: u32) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            commands: MachineCommands::new(&config.name)?,
            availability: Signal::new(config.availability_pin, now_ms),
            reject: config.reject_pin.map(|pin| Signal::new(pin, now_ms)),
            completion: Signal::new(config.completion_pin, now_ms),
            parts: CompletionPolicy::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn availability(&self) -> &Signal {
        &self.availability
    }

    pub fn reject(&self) -> Option<&Signal> {
        self.reject.as_ref()
    }

    pub fn completion(&self) -> &Signal {
        &self.completion
    }

    pub fn is_reject_latched(&self) -> bool {
        self.parts.is_reject_latched()
    }
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor service orchestrates all domain logic.
pub struct MonitorService<T: Transport> {
    machines: heapless::Vec<Machine, MAX_MACHINES>,
    debouncer: Debouncer,
    resend: ResendScheduler,
    availability: AvailabilityPolicy,
    dispatcher: CommandDispatcher<T>,
    stats: MonitorStats,
}

impl<T: Transport> MonitorService<T> {
    /// Construct the service.  `now_ms` is the boot timestamp every signal
    /// starts from.
    pub fn new(config: &MonitorConfig, transport: T, now_ms: u32) -> Result<Self> {
        config.validate()?;

        let machines = config
            .machines
            .iter()
            .map(|m| Machine::new(m, now_ms))
            .collect::<Result<heapless::Vec<_, MAX_MACHINES>>>()?;

        Ok(Self {
            machines,
            debouncer: Debouncer::new(config.debounce_ms),
            resend: ResendScheduler::new(config.resend_period_ms),
            availability: AvailabilityPolicy,
            dispatcher: CommandDispatcher::new(transport, config.append_newline),
            stats: MonitorStats::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&MonitorEvent::Started {
            machines: self.machines.len(),
        });
        for m in &self.machines {
            info!(
                "Monitoring {} (avail=GPIO{}, reject={:?}, done=GPIO{})",
                m.name,
                m.availability.pin(),
                m.reject.as_ref().map(Signal::pin),
                m.completion.pin()
            );
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full poll cycle over every machine.
    pub fn tick(
        &mut self,
        io: &mut impl SamplePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.stats.poll_cycles += 1;

        let Self {
            machines,
            debouncer,
            resend,
            availability,
            dispatcher,
            stats,
        } = self;

        let mut cycle = Cycle {
            io,
            clock,
            sink,
            stats,
            debouncer: *debouncer,
        };

        for m in machines.iter_mut() {
            // 1. Availability: debounce → resend check → level policy
            cycle.poll(&m.name, InputRole::Availability, &mut m.availability);
            resend.check(&mut m.availability, clock.now_ms());
            let is_resend =
                m.availability.pending_edge().is_none() && m.availability.announce_due();
            if let Some(kind) = availability.evaluate(&mut m.availability) {
                let now = clock.now_ms();
                if cycle.send(dispatcher, &m.name, &m.commands, kind, is_resend) {
                    m.availability.mark_announced(now);
                }
            }

            // 2. Reject: arm the latch before completion is looked at
            if let Some(reject) = m.reject.as_mut() {
                cycle.poll(&m.name, InputRole::Reject, reject);
                if m.parts.observe_reject(reject) {
                    info!("{}: reject latched", m.name);
                    cycle.sink.emit(&MonitorEvent::RejectLatched {
                        machine: m.name.clone(),
                    });
                }
            }

            // 3. Completion: classify and clear the latch
            cycle.poll(&m.name, InputRole::Completion, &mut m.completion);
            if let Some(kind) = m.parts.observe_completion(&mut m.completion) {
                let now = clock.now_ms();
                if cycle.send(dispatcher, &m.name, &m.commands, kind, false) {
                    m.completion.mark_announced(now);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.dispatcher.transport_mut()
    }
}

// ───────────────────────────────────────────────────────────────
// Per-cycle helpers
// ───────────────────────────────────────────────────────────────

/// Borrowed context for one poll pass.
struct Cycle<'a, S, C, E> {
    io: &'a mut S,
    clock: &'a C,
    sink: &'a mut E,
    stats: &'a mut MonitorStats,
    debouncer: Debouncer,
}

impl<S: SamplePort, C: ClockPort, E: EventSink> Cycle<'_, S, C, E> {
    /// Sample one input and run it through the debouncer.
    fn poll(&mut self, machine: &MachineName, input: InputRole, signal: &mut Signal) {
        let raw = match self.io.read_level(signal.pin()) {
            Ok(level) => level,
            Err(error) => {
                // Hold the previous sample; a read glitch is not a transition.
                self.stats.sample_failures = self.stats.sample_failures.saturating_add(1);
                warn!("{}: {:?} read failed: {}", machine, input, error);
                self.sink.emit(&MonitorEvent::SampleFailed { error });
                signal.raw_level()
            }
        };

        if let Some(edge) = self.debouncer.poll(signal, raw, self.clock.now_ms()) {
            self.sink.emit(&MonitorEvent::EdgeDetected {
                machine: machine.clone(),
                input,
                edge,
            });
        }
    }

    /// Dispatch `kind` for `machine`.  Returns `true` when the message was
    /// handed to the transport, whether or not the write succeeded.
    fn send<T: Transport>(
        &mut self,
        dispatcher: &mut CommandDispatcher<T>,
        machine: &MachineName,
        commands: &MachineCommands,
        kind: CommandKind,
        resend: bool,
    ) -> bool {
        let result = dispatcher.dispatch(commands.id(kind), None);
        match result {
            Ok(()) => {
                self.stats.record_sent(kind);
                if resend {
                    self.stats.resends = self.stats.resends.saturating_add(1);
                }
                let tag = if resend { " (resend)" } else { "" };
                info!("{}: sent {}{}", machine, commands.id(kind), tag);
                self.sink.emit(&MonitorEvent::CommandSent {
                    machine: machine.clone(),
                    kind,
                    resend,
                });
                true
            }
            Err(error) => {
                self.stats.dispatch_failures = self.stats.dispatch_failures.saturating_add(1);
                self.sink.emit(&MonitorEvent::DispatchFailed {
                    machine: machine.clone(),
                    kind,
                    error,
                });
                // Fire-and-forget: a transport failure still counts as sent.
                error == DispatchError::Transport
            }
        }
    }
}
