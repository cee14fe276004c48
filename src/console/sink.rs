//! Transmit capability
//!
//! The console never touches the transport. Every byte it produces goes
//! through a [`Transmit`] implementation injected at init.

use core::fmt;

/// Synchronous byte sink (UART TX, stdout, test recorder, ...)
///
/// `send` must deliver every byte, in order, before returning.
pub trait Transmit {
    /// Send raw bytes
    fn send(&mut self, bytes: &[u8]);

    /// Send a string slice
    fn send_str(&mut self, s: &str) {
        self.send(s.as_bytes());
    }

    /// Send formatted text without allocating
    fn send_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::write(&mut SinkWriter(self), args);
    }
}

impl<T: Transmit + ?Sized> Transmit for &mut T {
    fn send(&mut self, bytes: &[u8]) {
        (**self).send(bytes);
    }
}

/// Adapts a closure into a [`Transmit`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&[u8])> Transmit for FnSink<F> {
    fn send(&mut self, bytes: &[u8]) {
        (self.0)(bytes);
    }
}

/// `core::fmt::Write` view over a sink
pub struct SinkWriter<'s, S: Transmit + ?Sized>(pub &'s mut S);

impl<S: Transmit + ?Sized> fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.send(s.as_bytes());
        Ok(())
    }
}
