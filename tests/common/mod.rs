//! Shared test helpers

#![allow(dead_code)]

use rust_term_srv::console::Transmit;

/// Records everything the console sends
#[derive(Default)]
pub struct TestOutput {
    pub buf: Vec<u8>,
}

impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &[u8]) -> bool {
        needle.is_empty() || self.buf.windows(needle.len()).any(|w| w == needle)
    }

    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

impl Transmit for TestOutput {
    fn send(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
