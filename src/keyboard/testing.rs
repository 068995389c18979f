//! Scripted bus and clock for unit tests.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::device::ps2::{Clock, Transport};
use super::command::{CMD_RESEND_LAST_BYTE, REPLY_ACK};

#[derive(Default)]
struct Bus {
    incoming: VecDeque<u8>,
    sent: Vec<u8>,
    pins: Option<(u8, u8)>,
    last_timeout: Option<u32>,
    auto_ack: bool,
    // Device answers sent whenever the command byte is written
    responses: Vec<(u8, Vec<u8>)>,
}

/// Transport replaying scripted device bytes. Clones share the same bus, so a
/// test can keep a handle after moving the transport into the driver.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    bus: Arc<Mutex<Bus>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledge every command byte (except resend requests) immediately.
    pub fn with_auto_ack() -> Self {
        let transport = Self::new();
        transport.bus.lock().auto_ack = true;
        transport
    }

    /// Answer every write of `command` with `replies`, like a device would.
    pub fn respond(&self, command: u8, replies: &[u8]) {
        self.bus.lock().responses.push((command, Vec::from(replies)));
    }

    pub fn push_incoming(&self, bytes: &[u8]) {
        self.bus.lock().incoming.extend(bytes.iter().copied());
    }

    pub fn sent(&self) -> Vec<u8> {
        self.bus.lock().sent.clone()
    }

    /// Scripted bytes not read yet.
    pub fn pending(&self) -> usize {
        self.bus.lock().incoming.len()
    }

    pub fn pins(&self) -> Option<(u8, u8)> {
        self.bus.lock().pins
    }

    pub fn last_timeout(&self) -> Option<u32> {
        self.bus.lock().last_timeout
    }
}

impl Transport for ScriptedTransport {
    fn begin(&mut self, clock_line: u8, data_line: u8) {
        self.bus.lock().pins = Some((clock_line, data_line));
    }

    fn send_byte(&mut self, byte: u8) {
        let mut bus = self.bus.lock();
        bus.sent.push(byte);

        let replies = bus.responses.iter()
            .find(|(command, _)| *command == byte)
            .map(|(_, replies)| replies.clone());

        match replies {
            Some(replies) => {
                for &reply in replies.iter().rev() {
                    bus.incoming.push_front(reply);
                }
            }
            None if bus.auto_ack && byte != CMD_RESEND_LAST_BYTE => bus.incoming.push_front(REPLY_ACK),
            None => {}
        }
    }

    fn receive_byte(&mut self, timeout_ms: u32) -> Option<u8> {
        let byte = {
            let mut bus = self.bus.lock();
            bus.last_timeout = Some(timeout_ms);
            bus.incoming.pop_front()
        };

        // Let threads of the test run while the bus is idle
        if byte.is_none() {
            std::thread::yield_now();
        }
        byte
    }
}

/// Clock advancing 1 ms per query and by the full amount per delay.
#[derive(Default)]
pub struct TestClock {
    now: AtomicU64,
    delayed: AtomicU64,
}

impl TestClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested delays.
    pub fn delayed_ms(&self) -> u64 {
        self.delayed.load(Ordering::Relaxed)
    }
}

impl Clock for TestClock {
    fn systime_ms(&self) -> u64 {
        self.now.fetch_add(1, Ordering::Relaxed)
    }

    fn delay_ms(&self, ms: u32) {
        self.now.fetch_add(ms as u64, Ordering::Relaxed);
        self.delayed.fetch_add(ms as u64, Ordering::Relaxed);
        std::thread::yield_now();
    }
}
