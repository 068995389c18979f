/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: decoder                                                         ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Scancode set 2 framing. Assembles raw bus bytes into make / break codes ║
   ║ of single byte and extended (0xE0) keys, plus the fixed 8 byte Pause    ║
   ║ sequence (0xE1 ...). Bytes are fed in one at a time.                    ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

pub const EXTENDED_PREFIX: u8 = 0xE0;
pub const BREAK_PREFIX: u8 = 0xF0;
pub const PAUSE_PREFIX: u8 = 0xE1;

/// Bytes following `PAUSE_PREFIX` when Pause is pressed (there is no break code).
pub const PAUSE_SEQUENCE: [u8; 7] = [0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scancode {
    Make { code: u8, extended: bool },
    Break { code: u8, extended: bool },
    Pause,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Extended,
    KeyUp { extended: bool },
    Pause { matched: usize },
}

#[derive(Debug, Default)]
pub struct ScancodeDecoder {
    state: State,
}

impl ScancodeDecoder {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// `true` between scancodes, i.e. no sequence is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Drop a partially received sequence.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feed the next byte. Returns a scancode once a sequence is complete.
    ///
    /// A byte breaking the Pause sequence aborts it: nothing is reported, the
    /// byte is consumed and the decoder returns to idle.
    pub fn advance(&mut self, byte: u8) -> Option<Scancode> {
        let (next, scancode) = match (self.state, byte) {
            (State::Idle, EXTENDED_PREFIX) => (State::Extended, None),
            (State::Idle, BREAK_PREFIX) => (State::KeyUp { extended: false }, None),
            (State::Idle, PAUSE_PREFIX) => (State::Pause { matched: 0 }, None),
            (State::Idle, code) => (State::Idle, Some(Scancode::Make { code, extended: false })),

            (State::Extended, BREAK_PREFIX) => (State::KeyUp { extended: true }, None),
            (State::Extended, code) => (State::Idle, Some(Scancode::Make { code, extended: true })),

            (State::KeyUp { extended }, code) => (State::Idle, Some(Scancode::Break { code, extended })),

            (State::Pause { matched }, byte) if PAUSE_SEQUENCE[matched] == byte => {
                if matched + 1 == PAUSE_SEQUENCE.len() {
                    (State::Idle, Some(Scancode::Pause))
                } else {
                    (State::Pause { matched: matched + 1 }, None)
                }
            }
            (State::Pause { .. }, _) => (State::Idle, None),
        };

        self.state = next;
        scancode
    }
}
