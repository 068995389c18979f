use crate::keyboard::layout::{AlternateKeyRule as Alt, Layout, ScancodeMapping as Map};
use crate::keyboard::modifiers::Modifiers;
use crate::keyboard::virtual_key::VirtualKey::*;

use super::US;

const SHIFT: Modifiers = Modifiers::SHIFT;
const ALT: Modifiers = Modifiers::ALT;
const SHIFT_ALT: Modifiers = Modifiers::SHIFT.union(Modifiers::ALT);

pub static ITALIAN: Layout = Layout {
    name: "Italian",
    parent: Some(&US),
    scancodes: &[
        Map::new(0x0E, Backslash),
        Map::new(0x4E, Quote),
        Map::new(0x55, GraveI),
        Map::new(0x54, GraveE),
        Map::new(0x5B, Plus),
        Map::new(0x4C, GraveO),
        Map::new(0x52, GraveA),
        Map::new(0x5D, GraveU),
        Map::new(0x61, Less),
        Map::new(0x4A, Minus),
    ],
    extended_scancodes: &[],
    alternates: &[
        Alt::new(Backslash, SHIFT, VerticalBar),
        Alt::new(Key2, SHIFT, QuoteDbl),
        Alt::new(Key3, SHIFT, Pound),
        Alt::new(Key6, SHIFT, Ampersand),
        Alt::new(Key7, SHIFT, Slash),
        Alt::new(Key8, SHIFT, LeftParen),
        Alt::new(Key9, SHIFT, RightParen),
        Alt::new(Key0, SHIFT, Equals),
        Alt::new(Quote, SHIFT, Question),
        Alt::new(GraveI, SHIFT, Caret),
        Alt::new(GraveE, SHIFT, AcuteE),
        Alt::new(Plus, SHIFT, Asterisk),
        Alt::new(GraveO, SHIFT, CedillaC),
        Alt::new(GraveA, SHIFT, Degree),
        Alt::new(GraveU, SHIFT, Section),
        Alt::new(Less, SHIFT, Greater),
        Alt::new(Comma, SHIFT, Semicolon),
        Alt::new(Period, SHIFT, Colon),
        Alt::new(Minus, SHIFT, Underscore),

        Alt::new(Backslash, ALT, GraveAccent),
        Alt::new(Key5, ALT, Tilde),
        Alt::new(LowerE, ALT, Euro),
        Alt::new(GraveE, ALT, LeftBracket),
        Alt::new(Plus, ALT, RightBracket),
        Alt::new(GraveO, ALT, At),
        Alt::new(GraveA, ALT, Hash),

        Alt::new(GraveE, SHIFT_ALT, LeftBrace),
        Alt::new(Plus, SHIFT_ALT, RightBrace),
    ],
};
