use crate::keyboard::layout::{AlternateKeyRule as Alt, Layout, ScancodeMapping as Map};
use crate::keyboard::modifiers::Modifiers;
use crate::keyboard::virtual_key::VirtualKey::*;

use super::US;

const SHIFT: Modifiers = Modifiers::SHIFT;

pub static UK: Layout = Layout {
    name: "UK",
    parent: Some(&US),
    scancodes: &[
        Map::new(0x5D, Hash),
        Map::new(0x61, Backslash),
    ],
    extended_scancodes: &[],
    alternates: &[
        Alt::new(GraveAccent, SHIFT, Negation),
        Alt::new(Key2, SHIFT, QuoteDbl),
        Alt::new(Key3, SHIFT, Pound),
        Alt::new(Quote, SHIFT, At),
        Alt::new(Hash, SHIFT, Tilde),
        Alt::new(Backslash, SHIFT, VerticalBar),
    ],
};
