//! Machine monitor firmware: Main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioSampler    Esp32Clock    UartTransport   LogEventSink   │
//! │  (SamplePort)   (ClockPort)   (Transport)     (EventSink)    │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            MonitorService (pure logic)                 │  │
//! │  │  Debounce · Resend · Availability · Completion         │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use mouldmon::adapters::hardware::GpioSampler;
use mouldmon::adapters::log_sink::LogEventSink;
use mouldmon::adapters::time::Esp32Clock;
use mouldmon::adapters::uart::UartTransport;
use mouldmon::app::ports::ClockPort;
use mouldmon::app::service::MonitorService;
use mouldmon::config::MonitorConfig;
use mouldmon::drivers::hw_init;
use mouldmon::pins;
use mouldmon::timing::elapsed_ms;

/// Optional JSON override baked in at build time.
const CONFIG_OVERRIDE: Option<&str> = option_env!("MONITOR_CONFIG_JSON");

fn load_config() -> MonitorConfig {
    match CONFIG_OVERRIDE.map(MonitorConfig::from_json) {
        Some(Ok(cfg)) => {
            info!("Config loaded from MONITOR_CONFIG_JSON");
            cfg
        }
        Some(Err(e)) => {
            warn!("Config override rejected ({}), using defaults", e);
            MonitorConfig::default()
        }
        None => MonitorConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("mouldmon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config + inputs ────────────────────────────────────
    let config = load_config();
    hw_init::init_inputs(&config).context("GPIO input init")?;

    // ── 3. Adapters ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    // gpio17 / gpio18 are pins::UART_TX_GPIO / pins::UART_RX_GPIO.
    let uart = UartTransport::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        pins::UART_BAUD,
    )
    .context("host UART init")?;

    let clock = Esp32Clock::new();
    let mut sampler = GpioSampler::new();
    let mut sink = LogEventSink::new();

    // ── 4. Service ────────────────────────────────────────────
    let mut service = MonitorService::new(&config, uart, clock.now_ms())
        .map_err(|e| anyhow!("monitor init: {e}"))?;
    service.start(&mut sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let stats_interval_ms = config.stats_interval_secs.saturating_mul(1000);
    let mut last_stats_ms = clock.now_ms();

    loop {
        service.tick(&mut sampler, &clock, &mut sink);

        let now = clock.now_ms();
        if stats_interval_ms > 0 && elapsed_ms(now, last_stats_ms) >= stats_interval_ms {
            let s = service.stats();
            info!(
                "STATS | polls={} on={} off={} good={} reject={} resends={} txerr={} inerr={}",
                s.poll_cycles,
                s.on_sent,
                s.off_sent,
                s.good_parts,
                s.reject_parts,
                s.resends,
                s.dispatch_failures,
                s.sample_failures,
            );
            last_stats_ms = now;
        }

        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
