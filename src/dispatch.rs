//! Command dispatcher: Wire encoding and transmission.
//!
//! Wire format: one JSON object with exactly one entry per message.
//!
//! ```text
//! {"<command_id>":null}        no-argument command
//! {"<command_id>":<integer>}   command with a numeric argument
//! ```
//!
//! The encoded message goes to the transport in a single `write` call.
//! Nothing is read back; a failed write is reported to the caller and
//! never retried here.

use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::DispatchError;
use crate::transport::Transport;

/// Single-entry `{command_id: argument}` mapping.
#[derive(Debug, Clone, Copy)]
pub struct WireMessage<'a> {
    pub command_id: &'a str,
    pub argument: Option<i64>,
}

impl Serialize for WireMessage<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.command_id, &self.argument)?;
        map.end()
    }
}

impl WireMessage<'_> {
    /// Serialise to wire bytes.
    pub fn encode(&self, append_newline: bool) -> Result<Vec<u8>, DispatchError> {
        let mut bytes = serde_json::to_vec(self).map_err(|_| DispatchError::Encode)?;
        if append_newline {
            bytes.push(b'\n');
        }
        Ok(bytes)
    }
}

/// Encodes commands and writes them to a [`Transport`].
pub struct CommandDispatcher<T: Transport> {
    transport: T,
    append_newline: bool,
}

impl<T: Transport> CommandDispatcher<T> {
    pub fn new(transport: T, append_newline: bool) -> Self {
        Self {
            transport,
            append_newline,
        }
    }

    /// Encode `{command_id: argument}`, write it in one transport call and
    /// flush the link.
    pub fn dispatch(
        &mut self,
        command_id: &str,
        argument: Option<i64>,
    ) -> Result<(), DispatchError> {
        let msg = WireMessage {
            command_id,
            argument,
        };
        let bytes = msg.encode(self.append_newline)?;

        match self.transport.write(&bytes) {
            Ok(n) if n == bytes.len() => {
                debug!("dispatch: {} ({} bytes)", command_id, n);
                self.transport.flush().map_err(|e| {
                    warn!("dispatch: flush failed for {}: {:?}", command_id, e);
                    DispatchError::Transport
                })
            }
            Ok(n) => {
                warn!("dispatch: short write for {} ({}/{})", command_id, n, bytes.len());
                Err(DispatchError::Transport)
            }
            Err(e) => {
                warn!("dispatch: write failed for {}: {:?}", command_id, e);
                Err(DispatchError::Transport)
            }
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
