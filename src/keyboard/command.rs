/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: command                                                         ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Command / reply protocol of PS/2 keyboards.                             ║
   ║                                                                         ║
   ║ Every command byte is sent up to COMMAND_RETRY_COUNT times until the    ║
   ║ expected reply arrives. Failures are returned to the caller, which      ║
   ║ decides whether they matter.                                            ║
   ║                                                                         ║
   ║ Public functions                                                        ║
   ║   - send                      send a byte, wait for the expected reply  ║
   ║   - reset                     reset + self test                         ║
   ║   - set_scancode_set          select scancode set 1, 2 or 3             ║
   ║   - scancode_set              query the active scancode set             ║
   ║   - set_leds                  set num / caps / scroll lock LEDs         ║
   ║   - identify                  classify the attached device              ║
   ║   - set_typematic_rate_and_delay                                        ║
   ║   - echo, set_defaults, enable_scanning, disable_scanning               ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};
use bitflags::bitflags;
use log::{debug, info, warn};
use spin::Mutex;

use crate::consts::{COMMAND_RETRY_COUNT, COMMAND_TIMEOUT_MS, RESET_SELF_TEST_TIMEOUT_MS};
use crate::device::ps2::{Clock, Transport};

pub const CMD_SET_LEDS: u8 = 0xED;
pub const CMD_ECHO: u8 = 0xEE;
pub const CMD_SCANCODE_SET: u8 = 0xF0;
pub const CMD_IDENTIFY: u8 = 0xF2;
pub const CMD_SET_TYPEMATIC_RATE_AND_DELAY: u8 = 0xF3;
pub const CMD_ENABLE_SCANNING: u8 = 0xF4;
pub const CMD_DISABLE_SCANNING: u8 = 0xF5;
pub const CMD_SET_DEFAULT_PARAMS: u8 = 0xF6;
pub const CMD_RESEND_LAST_BYTE: u8 = 0xFE;
pub const CMD_RESET: u8 = 0xFF;

pub const REPLY_ERROR1: u8 = 0x00;
pub const REPLY_ERROR2: u8 = 0xFF;
pub const REPLY_SELF_TEST_OK: u8 = 0xAA;
pub const REPLY_ECHO: u8 = 0xEE;
pub const REPLY_ACK: u8 = 0xFA;
pub const REPLY_SELF_TEST_FAILED1: u8 = 0xFC;
pub const REPLY_SELF_TEST_FAILED2: u8 = 0xFD;
pub const REPLY_RESEND: u8 = 0xFE;

/// Repeat periods (ms) selectable by the typematic command, indexed by rate code.
pub const REPEAT_RATES: [u16; 32] = [
    33, 37, 41, 45, 50, 54, 58, 62, 66, 75, 83, 91,
    100, 108, 125, 125, 133, 149, 166, 181, 200, 217, 232, 250,
    270, 303, 333, 370, 400, 434, 476, 500,
];

// 10.9 characters per second (91 ms)
const DEFAULT_RATE_CODE: u8 = 0b01011;

bitflags! {
    /// Keyboard LEDs, encoded as expected by the set LEDs command.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Leds: u8 {
        const SCROLL_LOCK = 0x01;
        const NUM_LOCK = 0x02;
        const CAPS_LOCK = 0x04;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The device never answered `command` with the expected reply.
    /// `reply` is the last byte received, if any.
    NoAck { command: u8, reply: Option<u8> },
    SelfTestFailed(Option<u8>),
    InvalidScancodeSet(u8),
    NoReply,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NoAck { command, reply: Some(reply) } => write!(f, "command {command:#04x} answered with {reply:#04x}"),
            CommandError::NoAck { command, reply: None } => write!(f, "command {command:#04x} not answered"),
            CommandError::SelfTestFailed(Some(reply)) => write!(f, "self test failed ({reply:#04x})"),
            CommandError::SelfTestFailed(None) => write!(f, "self test timed out"),
            CommandError::InvalidScancodeSet(set) => write!(f, "invalid scancode set {set}"),
            CommandError::NoReply => write!(f, "no reply"),
        }
    }
}

/// Device types reported by the identify command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps2Device {
    Unknown,
    OldAtKeyboard,
    MouseStandard,
    MouseWithScrollWheel,
    Mouse5Buttons,
    Mf2KeyboardWithTranslation,
    M2Keyboard,
}

impl Ps2Device {
    /// Classify the (up to two) bytes following the identify acknowledge.
    pub fn classify(first: Option<u8>, second: Option<u8>) -> Self {
        match (first, second) {
            (None, None) => Ps2Device::OldAtKeyboard,
            (Some(0x00), None) => Ps2Device::MouseStandard,
            (Some(0x03), None) => Ps2Device::MouseWithScrollWheel,
            (Some(0x04), None) => Ps2Device::Mouse5Buttons,
            (Some(0xAB), Some(0x41 | 0xC1)) => Ps2Device::Mf2KeyboardWithTranslation,
            (Some(0xAB), Some(0x83)) => Ps2Device::M2Keyboard,
            _ => Ps2Device::Unknown,
        }
    }
}

/// Rate code of the shortest repeat period not below `rate_ms`.
pub fn typematic_rate_code(rate_ms: u16) -> u8 {
    REPEAT_RATES.iter()
        .position(|&rate| rate >= rate_ms)
        .map_or(DEFAULT_RATE_CODE, |index| index as u8)
}

/// Delay code for `delay_ms` (250 ms steps starting at 250 ms).
pub fn typematic_delay_code(delay_ms: u16) -> u8 {
    (delay_ms / 250).saturating_sub(1).min(3) as u8
}

/// Command side of the keyboard port. Owns the transport.
pub struct CommandPort<T: Transport, C: Clock> {
    transport: Mutex<T>,
    clock: C,
    leds: AtomicU8,
}

impl<T: Transport, C: Clock> CommandPort<T, C> {
    pub fn new(transport: T, clock: C) -> Self {
        Self { transport: Mutex::new(transport), clock, leds: AtomicU8::new(0) }
    }

    pub fn begin(&self, clock_line: u8, data_line: u8) {
        self.transport.lock().begin(clock_line, data_line);
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Send `command` until the device answers with `expected_reply`.
    pub fn send(&self, command: u8, expected_reply: u8) -> Result<(), CommandError> {
        send_on(&mut *self.transport.lock(), command, expected_reply)
    }

    /// Read a reply byte that is not preceded by a command byte.
    pub fn reply(&self, timeout_ms: u32) -> Option<u8> {
        self.transport.lock().receive_byte(timeout_ms)
    }

    /// Next byte of the scancode stream. On timeout the device may be asked
    /// to resend its last byte, at most `max_resends` times.
    pub fn next_scancode(&self, timeout_ms: u32, max_resends: usize) -> Option<u8> {
        let mut transport = self.transport.lock();
        let mut resends = 0;

        loop {
            if let Some(byte) = transport.receive_byte(timeout_ms) {
                return Some(byte);
            }
            if resends == max_resends {
                return None;
            }

            debug!("Scancode timeout, requesting resend");
            transport.send_byte(CMD_RESEND_LAST_BYTE);
            resends += 1;
        }
    }

    // Commands below hold the transport from their first byte to their last
    // reply, so concurrent scancode reads cannot take reply bytes.

    pub fn reset(&self) -> Result<(), CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_RESET, REPLY_ACK)?;

        match transport.receive_byte(RESET_SELF_TEST_TIMEOUT_MS) {
            Some(REPLY_SELF_TEST_OK) => Ok(()),
            reply => Err(CommandError::SelfTestFailed(reply)),
        }
    }

    pub fn set_scancode_set(&self, set: u8) -> Result<(), CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_SCANCODE_SET, REPLY_ACK)?;
        send_on(&mut *transport, set, REPLY_ACK)
    }

    pub fn scancode_set(&self) -> Result<u8, CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_SCANCODE_SET, REPLY_ACK)?;
        send_on(&mut *transport, 0, REPLY_ACK)?;

        match transport.receive_byte(COMMAND_TIMEOUT_MS) {
            Some(set @ 1..=3) => Ok(set),
            Some(set) => Err(CommandError::InvalidScancodeSet(set)),
            None => Err(CommandError::NoReply),
        }
    }

    /// The LED mirror is updated whenever the LED byte has been sent, even
    /// if the device did not acknowledge it, so the next sync resends it.
    pub fn set_leds(&self, leds: Leds) -> Result<(), CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_SET_LEDS, REPLY_ACK)?;
        let result = send_on(&mut *transport, leds.bits(), REPLY_ACK);
        self.leds.store(leds.bits(), Ordering::Release);
        result
    }

    /// LEDs as last requested from the device.
    pub fn leds(&self) -> Leds {
        Leds::from_bits_truncate(self.leds.load(Ordering::Acquire))
    }

    pub fn echo(&self) -> Result<(), CommandError> {
        self.send(CMD_ECHO, REPLY_ECHO)
    }

    pub fn set_defaults(&self) -> Result<(), CommandError> {
        self.send(CMD_SET_DEFAULT_PARAMS, REPLY_ACK)
    }

    pub fn enable_scanning(&self) -> Result<(), CommandError> {
        self.send(CMD_ENABLE_SCANNING, REPLY_ACK)
    }

    pub fn disable_scanning(&self) -> Result<(), CommandError> {
        self.send(CMD_DISABLE_SCANNING, REPLY_ACK)
    }

    /// Scanning is disabled while identifying and re-enabled afterwards in
    /// any case. An inconclusive identification is `Ps2Device::Unknown`;
    /// only a failure to re-enable scanning is an error once scanning was
    /// disabled.
    pub fn identify(&self) -> Result<Ps2Device, CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_DISABLE_SCANNING, REPLY_ACK)?;

        let device = match send_on(&mut *transport, CMD_IDENTIFY, REPLY_ACK) {
            Ok(()) => {
                let first = transport.receive_byte(COMMAND_TIMEOUT_MS);
                let second = transport.receive_byte(COMMAND_TIMEOUT_MS);
                Ps2Device::classify(first, second)
            }
            Err(error) => {
                warn!("Identify command failed [{error}]");
                Ps2Device::Unknown
            }
        };
        info!("Detected device type [{device:?}]");

        send_on(&mut *transport, CMD_ENABLE_SCANNING, REPLY_ACK)?;
        Ok(device)
    }

    /// `rate_ms`: 33 ms ... 500 ms, `delay_ms`: 250 ms ... 1000 ms.
    pub fn set_typematic_rate_and_delay(&self, rate_ms: u16, delay_ms: u16) -> Result<(), CommandError> {
        let mut transport = self.transport.lock();
        send_on(&mut *transport, CMD_SET_TYPEMATIC_RATE_AND_DELAY, REPLY_ACK)?;
        let value = typematic_rate_code(rate_ms) | typematic_delay_code(delay_ms) << 5;
        send_on(&mut *transport, value, REPLY_ACK)
    }
}

fn send_on<T: Transport>(transport: &mut T, command: u8, expected_reply: u8) -> Result<(), CommandError> {
    let mut reply = None;

    for _ in 0..COMMAND_RETRY_COUNT {
        transport.send_byte(command);
        reply = transport.receive_byte(COMMAND_TIMEOUT_MS);
        if reply == Some(expected_reply) {
            return Ok(());
        }
    }

    debug!("Command [{command:#04x}] failed, last reply [{reply:?}]");
    Err(CommandError::NoAck { command, reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::testing::{ScriptedTransport, TestClock};

    fn command_port(replies: &[u8]) -> (CommandPort<ScriptedTransport, TestClock>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        transport.push_incoming(replies);
        (CommandPort::new(transport.clone(), TestClock::new()), transport)
    }

    #[test]
    fn send_succeeds_on_expected_reply() {
        let (port, bus) = command_port(&[REPLY_ACK]);
        assert_eq!(port.send(CMD_ENABLE_SCANNING, REPLY_ACK), Ok(()));
        assert_eq!(bus.sent(), [CMD_ENABLE_SCANNING]);
    }

    #[test]
    fn send_retries_up_to_three_times() {
        let (port, bus) = command_port(&[REPLY_RESEND, REPLY_RESEND, REPLY_ACK]);
        assert_eq!(port.send(CMD_ECHO, REPLY_ACK), Ok(()));
        assert_eq!(bus.sent(), [CMD_ECHO; 3]);

        let (port, bus) = command_port(&[REPLY_RESEND, REPLY_ERROR1, REPLY_ERROR2, REPLY_ACK]);
        assert_eq!(port.send(CMD_ECHO, REPLY_ACK), Err(CommandError::NoAck { command: CMD_ECHO, reply: Some(REPLY_ERROR2) }));
        assert_eq!(bus.sent().len(), COMMAND_RETRY_COUNT);
    }

    #[test]
    fn send_reports_timeout() {
        let (port, _bus) = command_port(&[]);
        assert_eq!(port.send(CMD_RESET, REPLY_ACK), Err(CommandError::NoAck { command: CMD_RESET, reply: None }));
    }

    #[test]
    fn reset_waits_for_self_test() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_SELF_TEST_OK]);
        assert_eq!(port.reset(), Ok(()));
        assert_eq!(bus.sent(), [CMD_RESET]);
        assert_eq!(bus.last_timeout(), Some(RESET_SELF_TEST_TIMEOUT_MS));

        let (port, _bus) = command_port(&[REPLY_ACK, REPLY_SELF_TEST_FAILED1]);
        assert_eq!(port.reset(), Err(CommandError::SelfTestFailed(Some(REPLY_SELF_TEST_FAILED1))));

        let (port, _bus) = command_port(&[REPLY_ACK]);
        assert_eq!(port.reset(), Err(CommandError::SelfTestFailed(None)));
    }

    #[test]
    fn scancode_set_selection() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK]);
        assert_eq!(port.set_scancode_set(2), Ok(()));
        assert_eq!(bus.sent(), [CMD_SCANCODE_SET, 2]);
    }

    #[test]
    fn scancode_set_query_validates_reply() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK, 2]);
        assert_eq!(port.scancode_set(), Ok(2));
        assert_eq!(bus.sent(), [CMD_SCANCODE_SET, 0]);

        let (port, _bus) = command_port(&[REPLY_ACK, REPLY_ACK, 0x41]);
        assert_eq!(port.scancode_set(), Err(CommandError::InvalidScancodeSet(0x41)));

        let (port, _bus) = command_port(&[REPLY_ACK, REPLY_ACK]);
        assert_eq!(port.scancode_set(), Err(CommandError::NoReply));
    }

    #[test]
    fn leds_are_encoded_and_mirrored() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK]);
        assert_eq!(port.set_leds(Leds::CAPS_LOCK | Leds::SCROLL_LOCK), Ok(()));
        assert_eq!(bus.sent(), [CMD_SET_LEDS, 0x05]);
        assert_eq!(port.leds(), Leds::CAPS_LOCK | Leds::SCROLL_LOCK);
    }

    #[test]
    fn led_mirror_follows_request_even_without_ack() {
        let (port, _bus) = command_port(&[REPLY_ACK]);
        assert!(port.set_leds(Leds::NUM_LOCK).is_err());
        assert_eq!(port.leds(), Leds::NUM_LOCK);

        // Without an acknowledged command byte nothing was requested
        let (port, _bus) = command_port(&[]);
        assert!(port.set_leds(Leds::NUM_LOCK).is_err());
        assert_eq!(port.leds(), Leds::empty());
    }

    #[test]
    fn identify_classifies_and_reenables_scanning() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK, 0xAB, 0x83, REPLY_ACK]);
        assert_eq!(port.identify(), Ok(Ps2Device::M2Keyboard));
        assert_eq!(bus.sent(), [CMD_DISABLE_SCANNING, CMD_IDENTIFY, CMD_ENABLE_SCANNING]);
    }

    #[test]
    fn identify_reports_failed_reenable() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK, 0x00]);
        assert_eq!(port.identify(), Err(CommandError::NoAck { command: CMD_ENABLE_SCANNING, reply: None }));
        assert_eq!(bus.sent().last(), Some(&CMD_ENABLE_SCANNING));
    }

    #[test]
    fn identify_decision_table() {
        assert_eq!(Ps2Device::classify(None, None), Ps2Device::OldAtKeyboard);
        assert_eq!(Ps2Device::classify(Some(0x00), None), Ps2Device::MouseStandard);
        assert_eq!(Ps2Device::classify(Some(0x03), None), Ps2Device::MouseWithScrollWheel);
        assert_eq!(Ps2Device::classify(Some(0x04), None), Ps2Device::Mouse5Buttons);
        assert_eq!(Ps2Device::classify(Some(0xAB), Some(0x41)), Ps2Device::Mf2KeyboardWithTranslation);
        assert_eq!(Ps2Device::classify(Some(0xAB), Some(0xC1)), Ps2Device::Mf2KeyboardWithTranslation);
        assert_eq!(Ps2Device::classify(Some(0xAB), Some(0x83)), Ps2Device::M2Keyboard);
        assert_eq!(Ps2Device::classify(Some(0xAB), None), Ps2Device::Unknown);
        assert_eq!(Ps2Device::classify(Some(0x00), Some(0x00)), Ps2Device::Unknown);
    }

    #[test]
    fn typematic_rate_picks_next_step() {
        assert_eq!(typematic_rate_code(95), 12);
        assert_eq!(typematic_rate_code(91), 11);
        assert_eq!(typematic_rate_code(0), 0);
        assert_eq!(typematic_rate_code(501), DEFAULT_RATE_CODE);
    }

    #[test]
    fn typematic_delay_codes() {
        assert_eq!(typematic_delay_code(250), 0);
        assert_eq!(typematic_delay_code(500), 1);
        assert_eq!(typematic_delay_code(1000), 3);
        assert_eq!(typematic_delay_code(100), 0);
        assert_eq!(typematic_delay_code(5000), 3);
    }

    #[test]
    fn typematic_command() {
        let (port, bus) = command_port(&[REPLY_ACK, REPLY_ACK]);
        assert_eq!(port.set_typematic_rate_and_delay(95, 500), Ok(()));
        assert_eq!(bus.sent(), [CMD_SET_TYPEMATIC_RATE_AND_DELAY, 12 | 1 << 5]);
    }

    #[test]
    fn next_scancode_requests_resends() {
        let (port, bus) = command_port(&[]);
        assert_eq!(port.next_scancode(100, 2), None);
        assert_eq!(bus.sent(), [CMD_RESEND_LAST_BYTE; 2]);

        let (port, bus) = command_port(&[0x1C]);
        assert_eq!(port.next_scancode(100, 2), Some(0x1C));
        assert!(bus.sent().is_empty());
    }

    #[test]
    fn echo_expects_echo() {
        let (port, _bus) = command_port(&[REPLY_ECHO]);
        assert_eq!(port.echo(), Ok(()));
    }
}
