use crate::keyboard::layout::{AlternateKeyRule as Alt, Layout, ScancodeMapping as Map};
use crate::keyboard::modifiers::Modifiers;
use crate::keyboard::virtual_key::VirtualKey::*;

const SHIFT: Modifiers = Modifiers::SHIFT;
const NUM: Modifiers = Modifiers::NUM_LOCK;
const LETTER: Modifiers = Modifiers::SHIFT.union(Modifiers::CAPS_LOCK);

/// US layout, root of all other layouts.
pub static US: Layout = Layout {
    name: "US",
    parent: Option::None,
    scancodes: &[
        Map::new(0x76, Escape),
        Map::new(0x05, F1),
        Map::new(0x06, F2),
        Map::new(0x04, F3),
        Map::new(0x0C, F4),
        Map::new(0x03, F5),
        Map::new(0x0B, F6),
        Map::new(0x83, F7),
        Map::new(0x0A, F8),
        Map::new(0x01, F9),
        Map::new(0x09, F10),
        Map::new(0x78, F11),
        Map::new(0x07, F12),
        Map::new(0x16, Key1),
        Map::new(0x1E, Key2),
        Map::new(0x26, Key3),
        Map::new(0x25, Key4),
        Map::new(0x2E, Key5),
        Map::new(0x36, Key6),
        Map::new(0x3D, Key7),
        Map::new(0x3E, Key8),
        Map::new(0x46, Key9),
        Map::new(0x45, Key0),
        Map::new(0x15, LowerQ),
        Map::new(0x1D, LowerW),
        Map::new(0x24, LowerE),
        Map::new(0x2D, LowerR),
        Map::new(0x2C, LowerT),
        Map::new(0x35, LowerY),
        Map::new(0x3C, LowerU),
        Map::new(0x43, LowerI),
        Map::new(0x44, LowerO),
        Map::new(0x4D, LowerP),
        Map::new(0x1C, LowerA),
        Map::new(0x1B, LowerS),
        Map::new(0x23, LowerD),
        Map::new(0x2B, LowerF),
        Map::new(0x34, LowerG),
        Map::new(0x33, LowerH),
        Map::new(0x3B, LowerJ),
        Map::new(0x42, LowerK),
        Map::new(0x4B, LowerL),
        Map::new(0x1A, LowerZ),
        Map::new(0x22, LowerX),
        Map::new(0x21, LowerC),
        Map::new(0x2A, LowerV),
        Map::new(0x32, LowerB),
        Map::new(0x31, LowerN),
        Map::new(0x3A, LowerM),
        Map::new(0x0E, GraveAccent),
        Map::new(0x4E, Minus),
        Map::new(0x55, Equals),
        Map::new(0x54, LeftBracket),
        Map::new(0x5B, RightBracket),
        Map::new(0x5D, Backslash),
        Map::new(0x4C, Semicolon),
        Map::new(0x52, Quote),
        Map::new(0x41, Comma),
        Map::new(0x49, Period),
        Map::new(0x4A, Slash),
        Map::new(0x70, KpInsert),
        Map::new(0x69, KpEnd),
        Map::new(0x72, KpDown),
        Map::new(0x7A, KpPageDown),
        Map::new(0x6B, KpLeft),
        Map::new(0x73, KpCenter), // "5" on the keypad
        Map::new(0x74, KpRight),
        Map::new(0x6C, KpHome),
        Map::new(0x75, KpUp),
        Map::new(0x7D, KpPageUp),
        Map::new(0x71, KpDelete),
        Map::new(0x7C, KpMultiply),
        Map::new(0x79, KpPlus),
        Map::new(0x7B, KpMinus),
        Map::new(0x66, Backspace),
        Map::new(0x0D, Tab),
        Map::new(0x5A, Return),
        Map::new(0x77, NumLock),
        Map::new(0x7E, ScrollLock),
        Map::new(0x58, CapsLock),
        Map::new(0x12, LShift),
        Map::new(0x59, RShift),
        Map::new(0x14, LCtrl),
        Map::new(0x11, LAlt),
        Map::new(0x29, Space),
        Map::new(0x84, SysReq), // ALT + PRINTSCREEN, translated by the keyboard
    ],
    extended_scancodes: &[
        Map::new(0x14, RCtrl),
        Map::new(0x11, RAlt),
        Map::new(0x1F, LGui),
        Map::new(0x27, RGui),
        Map::new(0x2F, Application),
        Map::new(0x70, Insert),
        Map::new(0x71, Delete),
        Map::new(0x4A, KpDivide),
        Map::new(0x5A, KpEnter),
        Map::new(0x7D, PageUp),
        Map::new(0x7A, PageDown),
        Map::new(0x6C, Home),
        Map::new(0x69, End),
        Map::new(0x75, Up),
        Map::new(0x72, Down),
        Map::new(0x6B, Left),
        Map::new(0x74, Right),
        // PRINTSCREEN sends "E0 12 E0 7C". With CTRL or SHIFT held only "E0 7C" is sent.
        Map::new(0x12, PrintScreen1),
        Map::new(0x7C, PrintScreen2),
        // CTRL + PAUSE sends "E0 7E" instead of the pause sequence
        Map::new(0x7E, Break),
    ],
    alternates: &[
        Alt::new(Key1, SHIFT, Exclaim),
        Alt::new(Key2, SHIFT, At),
        Alt::new(Key3, SHIFT, Hash),
        Alt::new(Key4, SHIFT, Dollar),
        Alt::new(Key5, SHIFT, Percent),
        Alt::new(Key6, SHIFT, Caret),
        Alt::new(Key7, SHIFT, Ampersand),
        Alt::new(Key8, SHIFT, Asterisk),
        Alt::new(Key9, SHIFT, LeftParen),
        Alt::new(Key0, SHIFT, RightParen),

        Alt::new(GraveAccent, SHIFT, Tilde),
        Alt::new(Minus, SHIFT, Underscore),
        Alt::new(Equals, SHIFT, Plus),
        Alt::new(LeftBracket, SHIFT, LeftBrace),
        Alt::new(RightBracket, SHIFT, RightBrace),
        Alt::new(Backslash, SHIFT, VerticalBar),
        Alt::new(Semicolon, SHIFT, Colon),
        Alt::new(Quote, SHIFT, QuoteDbl),
        Alt::new(Comma, SHIFT, Less),
        Alt::new(Period, SHIFT, Greater),
        Alt::new(Slash, SHIFT, Question),

        // Keypad with NUMLOCK on
        Alt::new(KpInsert, NUM, Kp0),
        Alt::new(KpEnd, NUM, Kp1),
        Alt::new(KpDown, NUM, Kp2),
        Alt::new(KpPageDown, NUM, Kp3),
        Alt::new(KpLeft, NUM, Kp4),
        Alt::new(KpCenter, NUM, Kp5),
        Alt::new(KpRight, NUM, Kp6),
        Alt::new(KpHome, NUM, Kp7),
        Alt::new(KpUp, NUM, Kp8),
        Alt::new(KpPageUp, NUM, Kp9),
        Alt::new(KpDelete, NUM, KpPeriod),

        // SHIFT or CAPSLOCK
        Alt::new(LowerA, LETTER, UpperA),
        Alt::new(LowerB, LETTER, UpperB),
        Alt::new(LowerC, LETTER, UpperC),
        Alt::new(LowerD, LETTER, UpperD),
        Alt::new(LowerE, LETTER, UpperE),
        Alt::new(LowerF, LETTER, UpperF),
        Alt::new(LowerG, LETTER, UpperG),
        Alt::new(LowerH, LETTER, UpperH),
        Alt::new(LowerI, LETTER, UpperI),
        Alt::new(LowerJ, LETTER, UpperJ),
        Alt::new(LowerK, LETTER, UpperK),
        Alt::new(LowerL, LETTER, UpperL),
        Alt::new(LowerM, LETTER, UpperM),
        Alt::new(LowerN, LETTER, UpperN),
        Alt::new(LowerO, LETTER, UpperO),
        Alt::new(LowerP, LETTER, UpperP),
        Alt::new(LowerQ, LETTER, UpperQ),
        Alt::new(LowerR, LETTER, UpperR),
        Alt::new(LowerS, LETTER, UpperS),
        Alt::new(LowerT, LETTER, UpperT),
        Alt::new(LowerU, LETTER, UpperU),
        Alt::new(LowerV, LETTER, UpperV),
        Alt::new(LowerW, LETTER, UpperW),
        Alt::new(LowerX, LETTER, UpperX),
        Alt::new(LowerY, LETTER, UpperY),
        Alt::new(LowerZ, LETTER, UpperZ),
    ],
};
