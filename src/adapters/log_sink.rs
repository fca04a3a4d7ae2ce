//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured monitor events to the
//! ESP-IDF logger (UART0 / USB-CDC console in production, kept separate
//! from the host command link).

use log::{debug, info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started { machines } => {
                info!("START | machines={}", machines);
            }
            MonitorEvent::EdgeDetected {
                machine,
                input,
                edge,
            } => {
                debug!("EDGE  | {} {:?} {:?}", machine, input, edge);
            }
            MonitorEvent::RejectLatched { machine } => {
                info!("LATCH | {} reject armed", machine);
            }
            MonitorEvent::CommandSent {
                machine,
                kind,
                resend,
            } => {
                info!(
                    "CMD   | {} {:?}{}",
                    machine,
                    kind,
                    if *resend { " (resend)" } else { "" }
                );
            }
            MonitorEvent::DispatchFailed {
                machine,
                kind,
                error,
            } => {
                warn!("TXERR | {} {:?}: {}", machine, kind, error);
            }
            MonitorEvent::SampleFailed { error } => {
                warn!("INERR | {}", error);
            }
        }
    }
}
