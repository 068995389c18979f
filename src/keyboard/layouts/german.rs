use crate::keyboard::layout::{AlternateKeyRule as Alt, Layout, ScancodeMapping as Map};
use crate::keyboard::modifiers::Modifiers;
use crate::keyboard::virtual_key::VirtualKey::*;

use super::US;

const SHIFT: Modifiers = Modifiers::SHIFT;
// AltGr reports as right ALT
const ALT: Modifiers = Modifiers::ALT;

pub static GERMAN: Layout = Layout {
    name: "German",
    parent: Some(&US),
    scancodes: &[
        Map::new(0x0E, Caret),
        Map::new(0x4E, Eszett),
        Map::new(0x55, AcuteAccent),
        Map::new(0x54, UmlautU),
        Map::new(0x5B, Plus),
        Map::new(0x4C, UmlautO),
        Map::new(0x52, UmlautA),
        Map::new(0x5D, Hash),
        Map::new(0x61, Less),
        Map::new(0x4A, Minus),
        Map::new(0x35, LowerZ),
        Map::new(0x1A, LowerY),
    ],
    extended_scancodes: &[],
    alternates: &[
        Alt::new(Caret, SHIFT, Degree),
        Alt::new(Key2, SHIFT, QuoteDbl),
        Alt::new(Key3, SHIFT, Section),
        Alt::new(Key6, SHIFT, Ampersand),
        Alt::new(Key7, SHIFT, Slash),
        Alt::new(Key8, SHIFT, LeftParen),
        Alt::new(Key9, SHIFT, RightParen),
        Alt::new(Key0, SHIFT, Equals),
        Alt::new(Eszett, SHIFT, Question),
        Alt::new(AcuteAccent, SHIFT, GraveAccent),
        Alt::new(Plus, SHIFT, Asterisk),
        Alt::new(Hash, SHIFT, Quote),
        Alt::new(Less, SHIFT, Greater),
        Alt::new(Comma, SHIFT, Semicolon),
        Alt::new(Period, SHIFT, Colon),
        Alt::new(Minus, SHIFT, Underscore),

        Alt::new(Key7, ALT, LeftBrace),
        Alt::new(Key8, ALT, LeftBracket),
        Alt::new(Key9, ALT, RightBracket),
        Alt::new(Key0, ALT, RightBrace),
        Alt::new(Eszett, ALT, Backslash),
        Alt::new(LowerQ, ALT, At),
        Alt::new(LowerE, ALT, Euro),
        Alt::new(Plus, ALT, Tilde),
        Alt::new(Less, ALT, VerticalBar),
    ],
};
