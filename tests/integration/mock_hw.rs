//! Mock adapters and a simulation rig for integration tests.
//!
//! The rig owns a [`MonitorService`] driven through the crate's own
//! `HalInputs` and `WriterTransport` adapters, backed here by scripted pins
//! and an in-memory wire log, plus a manual clock and a recording sink.
//! Every wire message is logged with the clock value of the tick that
//! produced it.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use mouldmon::adapters::hardware::HalInputs;
use mouldmon::adapters::uart::WriterTransport;
use mouldmon::app::events::MonitorEvent;
use mouldmon::app::ports::{ClockPort, EventSink};
use mouldmon::app::service::MonitorService;
use mouldmon::config::MonitorConfig;

// ── Inputs ────────────────────────────────────────────────────

#[derive(Default)]
struct Board {
    levels: HashMap<i32, bool>,
    failing: HashSet<i32>,
}

/// Pin levels set by the test.  Unset pins rest HIGH.
#[derive(Clone, Default)]
pub struct ScriptedInputs {
    board: Rc<RefCell<Board>>,
}

#[allow(dead_code)]
impl ScriptedInputs {
    pub fn set(&self, pin: i32, high: bool) {
        self.board.borrow_mut().levels.insert(pin, high);
    }

    pub fn fail(&self, pin: i32, failing: bool) {
        let mut board = self.board.borrow_mut();
        if failing {
            board.failing.insert(pin);
        } else {
            board.failing.remove(&pin);
        }
    }

    /// An `embedded-hal` input pin wired to `gpio` on this board.
    pub fn pin(&self, gpio: i32) -> ScriptedPin {
        ScriptedPin {
            gpio,
            board: self.clone(),
        }
    }
}

pub struct ScriptedPin {
    gpio: i32,
    board: ScriptedInputs,
}

impl ErrorType for ScriptedPin {
    type Error = ErrorKind;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        let board = self.board.board.borrow();
        if board.failing.contains(&self.gpio) {
            return Err(ErrorKind::Other);
        }
        Ok(board.levels.get(&self.gpio).copied().unwrap_or(true))
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|high| !high)
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

// ── Transport ─────────────────────────────────────────────────

/// Host-side end of the serial link.  Records every write, including the
/// ones refused while the link is down.
#[derive(Default)]
pub struct WireLog {
    pub writes: Vec<Vec<u8>>,
    pub link_down: bool,
}

impl io::Write for WireLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(buf.to_vec());
        if self.link_down {
            Err(io::Error::other("link down"))
        } else {
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<MonitorEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub const M1: &str = "InjectionMouldingMachine1";
pub const STEP_MS: u32 = 5;

pub struct Rig {
    pub service: MonitorService<WriterTransport<WireLog>>,
    pub inputs: ScriptedInputs,
    pins: HalInputs<ScriptedPin>,
    pub clock: ManualClock,
    pub sink: RecordingSink,
    /// (clock at tick, wire message) for every write.
    pub log: Vec<(u32, String)>,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with(MonitorConfig::default(), 0)
    }

    pub fn with(config: MonitorConfig, start_ms: u32) -> Self {
        let transport = WriterTransport::new(WireLog::default());
        let service = MonitorService::new(&config, transport, start_ms).expect("valid config");

        let inputs = ScriptedInputs::default();
        let mut pins = HalInputs::new();
        for gpio in config.machines.iter().flat_map(|m| m.pins()) {
            assert!(pins.add(gpio, inputs.pin(gpio)).is_ok(), "too many pins");
        }

        let mut rig = Self {
            service,
            inputs,
            pins,
            clock: ManualClock::new(start_ms),
            sink: RecordingSink::default(),
            log: Vec::new(),
        };
        rig.service.start(&mut rig.sink);
        rig
    }

    pub fn wire_log(&self) -> &WireLog {
        self.service.transport().get_ref()
    }

    pub fn set_link_down(&mut self, down: bool) {
        self.service.transport_mut().get_mut().link_down = down;
    }

    pub fn now(&self) -> u32 {
        self.clock.now_ms()
    }

    /// Tick every `step_ms` for `duration_ms`, starting now.
    pub fn run_for_step(&mut self, duration_ms: u32, step_ms: u32) {
        let mut elapsed = 0;
        while elapsed < duration_ms {
            let before = self.wire_log().writes.len();
            self.service
                .tick(&mut self.pins, &self.clock, &mut self.sink);
            let now = self.clock.now_ms();
            for w in &self.service.transport().get_ref().writes[before..] {
                self.log.push((now, String::from_utf8_lossy(w).into_owned()));
            }
            self.clock.advance(step_ms);
            elapsed += step_ms;
        }
    }

    pub fn run_for(&mut self, duration_ms: u32) {
        self.run_for_step(duration_ms, STEP_MS);
    }

    /// Hold `pin` active (LOW) for `hold_ms`, then release and run `after_ms`.
    pub fn pulse(&mut self, pin: i32, hold_ms: u32, after_ms: u32) {
        self.inputs.set(pin, false);
        self.run_for(hold_ms);
        self.inputs.set(pin, true);
        self.run_for(after_ms);
    }

    pub fn messages(&self) -> Vec<&str> {
        self.log.iter().map(|(_, m)| m.as_str()).collect()
    }

    /// Number of wire messages for `<machine>_<suffix>`.
    pub fn count(&self, machine: &str, suffix: &str) -> usize {
        let wire = wire(machine, suffix);
        self.log.iter().filter(|(_, m)| *m == wire).count()
    }

    /// Tick times of every `<machine>_<suffix>` message.
    pub fn times_of(&self, machine: &str, suffix: &str) -> Vec<u32> {
        let wire = wire(machine, suffix);
        self.log
            .iter()
            .filter(|(_, m)| *m == wire)
            .map(|(t, _)| *t)
            .collect()
    }
}

pub fn wire(machine: &str, suffix: &str) -> String {
    format!("{{\"{}_{}\":null}}", machine, suffix)
}
