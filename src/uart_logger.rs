//! Log output over the console transport.
//!
//! Drains a [`LogStream`] into any [`Transmit`] sink. Logs never share the
//! console UART: on ESP-IDF the sink is a TX-only UART1, on a host it is
//! stderr.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 UART0 TX ──────▶ USB-UART RX ─┐
//! ESP32 UART0 RX ◀────── USB-UART TX ─┴─▶ console (115200 8N1)
//! ESP32 GPIO6 (UART1 TX) ──▶ second USB-UART RX ──▶ log viewer
//! ```

use crate::console::Transmit;
use crate::logging::{format_to_buffer, LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartDriver, UartTxDriver};

/// UART configuration for the console.
pub struct UartConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
    pub rx_pin: u8,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 43, // UART0 TX on ESP32-S3
            rx_pin: 44, // UART0 RX on ESP32-S3
        }
    }
}

/// UART configuration for the log output (TX only).
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 6,
        }
    }
}

/// Format log entry to text.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    format_to_buffer(
        buf,
        format_args!(
            "[{:10}] {}: {}\r\n",
            entry.timestamp_us,
            entry.level.as_str(),
            core::str::from_utf8(entry.message()).unwrap_or("<invalid utf8>")
        ),
    )
}

/// Write every queued entry to `out`.
///
/// Returns the number of entries written.
pub fn drain_log_stream<const N: usize>(stream: &LogStream<N>, out: &mut dyn Transmit) -> usize {
    let mut format_buf = [0u8; 160];
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        out.send(&format_buf[..len]);
        count += 1;
    }
    count
}

/// Report and reset the dropped-message counter.
///
/// Returns `true` if anything was reported.
pub fn report_dropped<const N: usize>(stream: &LogStream<N>, out: &mut dyn Transmit) -> bool {
    let dropped = stream.dropped();
    if dropped == 0 {
        return false;
    }
    out.send_fmt(format_args!("[WARN] Dropped: {}\r\n", dropped));
    stream.reset_dropped();
    true
}

/// Initialize the console UART (TX + RX, no flow control).
#[cfg(target_os = "espidf")]
pub fn init_console_uart<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    rx_pin: impl Peripheral<P = impl gpio::InputPin> + 'd,
    config: &UartConfig,
) -> Result<UartDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartDriver::new(
        uart,
        tx_pin,
        rx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Initialize UART1 TX-only for log output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}
