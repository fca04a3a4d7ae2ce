//! Adapters: Concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                  |
//! |-------------|--------------|------------------------------|
//! | `hardware`  | SamplePort   | ESP32 GPIO / embedded-hal    |
//! | `log_sink`  | EventSink    | Serial log output            |
//! | `time`      | ClockPort    | ESP32 system timer           |
//! | `uart`      | Transport    | UART link to the host        |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod uart;
