//! RustTermSrv - Main entry point
//!
//! On ESP-IDF: serial console on UART0, polled from the main task.
//! On a host: the same console on stdin/stdout (put the terminal in raw mode,
//! e.g. `stty raw -echo`, to see the line editing).

use rust_term_srv::commands::{cmd_echo, cmd_repeat, cmd_version};
use rust_term_srv::console::{command_names, CommandDescriptor, ParsedCommand, Transmit};
use rust_term_srv::{ConsoleError, LogLevel};

/// Commands registered with the console
static COMMANDS: &[CommandDescriptor<'static>] = &[
    CommandDescriptor::new("help", cmd_help),
    CommandDescriptor::new("version", cmd_version),
    CommandDescriptor::new("echo", cmd_echo),
    CommandDescriptor::new("repeat", cmd_repeat),
    CommandDescriptor::new("reboot", cmd_reboot),
];

/// Per-keystroke Debug/Trace entries stay out of the log output
const LOG_MAX_LEVEL: LogLevel = LogLevel::Info;

// --- Command Implementations ---

fn cmd_help(_cmd: &ParsedCommand<'_>, out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    for (i, name) in command_names(COMMANDS).enumerate() {
        if i > 0 {
            out.send_str(" ");
        }
        out.send_str(name);
    }
    Ok(())
}

fn cmd_reboot(cmd: &ParsedCommand<'_>, _out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    if cmd.arg(0) != Some("confirm") {
        return Err(ConsoleError::MissingArg);
    }

    #[cfg(target_os = "espidf")]
    esp_idf_svc::hal::reset::restart();

    #[cfg(not(target_os = "espidf"))]
    std::process::exit(0);
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::delay::TickType;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use rust_term_srv::console::{FnSink, Terminal};
    use rust_term_srv::uart_logger::{
        drain_log_stream, init_console_uart, init_uart_logger, report_dropped, UartConfig,
        UartLoggerConfig,
    };
    use rust_term_srv::{LogTarget, CONSOLE_LOG_STREAM};

    fn timestamp_us() -> i64 {
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let mut log_tx = init_uart_logger(
        peripherals.uart1,
        peripherals.pins.gpio6,
        &UartLoggerConfig::default(),
    )?;
    let mut log_sink = FnSink(|bytes: &[u8]| {
        let _ = log_tx.write(bytes);
    });

    let uart = init_console_uart(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        &UartConfig::default(),
    )?;
    let (mut tx, rx) = uart.into_split();
    let sink = FnSink(|bytes: &[u8]| {
        let _ = tx.write(bytes);
    });

    let log = LogTarget::new(&CONSOLE_LOG_STREAM, timestamp_us).with_max_level(LOG_MAX_LEVEL);
    let mut terminal: Terminal<'_, _> = Terminal::new(sink, COMMANDS).with_log(log);
    terminal.attach();

    // Short read timeout so queued log entries go out while the console is idle
    let poll = TickType::new_millis(10).ticks();
    let mut byte = [0u8; 1];
    loop {
        if rx.read(&mut byte, poll)? == 1 {
            terminal.process_byte(byte[0]);
        }
        drain_log_stream(&CONSOLE_LOG_STREAM, &mut log_sink);
        report_dropped(&CONSOLE_LOG_STREAM, &mut log_sink);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> std::io::Result<()> {
    use rust_term_srv::console::{FnSink, Terminal};
    use rust_term_srv::uart_logger::{drain_log_stream, report_dropped};
    use rust_term_srv::{LogTarget, CONSOLE_LOG_STREAM};
    use std::io::{Read, Write};
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();

    fn timestamp_us() -> i64 {
        START.get_or_init(Instant::now).elapsed().as_micros() as i64
    }

    let sink = FnSink(|bytes: &[u8]| {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    });
    let mut stderr = FnSink(|bytes: &[u8]| {
        let _ = std::io::stderr().write_all(bytes);
    });

    let log = LogTarget::new(&CONSOLE_LOG_STREAM, timestamp_us).with_max_level(LOG_MAX_LEVEL);
    let mut terminal: Terminal<'_, _> = Terminal::new(sink, COMMANDS).with_log(log);
    terminal.attach();

    for byte in std::io::stdin().lock().bytes() {
        terminal.process_byte(byte?);
        drain_log_stream(&CONSOLE_LOG_STREAM, &mut stderr);
        report_dropped(&CONSOLE_LOG_STREAM, &mut stderr);
    }

    terminal.detach();
    drain_log_stream(&CONSOLE_LOG_STREAM, &mut stderr);
    Ok(())
}
