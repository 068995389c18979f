use strum::EnumCount;
use strum_macros::{EnumCount, FromRepr, IntoStaticStr};

/// Locale independent identifier of a logical key.
///
/// The declaration order is significant: it defines the bit index in the
/// key state map and the code used in queued events, and the ASCII
/// projection relies on the contiguous digit and letter ranges.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, FromRepr, IntoStaticStr)]
pub enum VirtualKey {
    #[default]
    None,

    Space,

    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,

    LowerA,
    LowerB,
    LowerC,
    LowerD,
    LowerE,
    LowerF,
    LowerG,
    LowerH,
    LowerI,
    LowerJ,
    LowerK,
    LowerL,
    LowerM,
    LowerN,
    LowerO,
    LowerP,
    LowerQ,
    LowerR,
    LowerS,
    LowerT,
    LowerU,
    LowerV,
    LowerW,
    LowerX,
    LowerY,
    LowerZ,

    UpperA,
    UpperB,
    UpperC,
    UpperD,
    UpperE,
    UpperF,
    UpperG,
    UpperH,
    UpperI,
    UpperJ,
    UpperK,
    UpperL,
    UpperM,
    UpperN,
    UpperO,
    UpperP,
    UpperQ,
    UpperR,
    UpperS,
    UpperT,
    UpperU,
    UpperV,
    UpperW,
    UpperX,
    UpperY,
    UpperZ,

    GraveAccent,
    AcuteAccent,
    Quote,
    QuoteDbl,
    Equals,
    Minus,
    KpMinus,
    Plus,
    KpPlus,
    KpMultiply,
    Asterisk,
    Backslash,
    KpDivide,
    Slash,
    KpPeriod,
    Period,
    Colon,
    Comma,
    Semicolon,
    Ampersand,
    VerticalBar,
    Hash,
    At,
    Caret,
    Dollar,
    Pound,
    Euro,
    Percent,
    Exclaim,
    Question,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Less,
    Greater,
    Underscore,
    Degree,
    Section,
    Tilde,
    Negation,

    LShift,
    RShift,
    LAlt,
    RAlt,
    LCtrl,
    RCtrl,
    LGui,
    RGui,

    Escape,
    PrintScreen1,
    PrintScreen2,
    SysReq,
    Insert,
    KpInsert,
    Delete,
    KpDelete,
    Backspace,
    Home,
    KpHome,
    End,
    KpEnd,
    Pause,
    Break,
    ScrollLock,
    NumLock,
    CapsLock,
    Tab,
    Return,
    KpEnter,
    Application,
    PageUp,
    KpPageUp,
    PageDown,
    KpPageDown,
    Up,
    KpUp,
    Down,
    KpDown,
    Left,
    KpLeft,
    Right,
    KpRight,
    KpCenter,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    GraveA,
    GraveE,
    AcuteE,
    GraveI,
    GraveO,
    GraveU,
    CedillaC,
    Eszett,
    UmlautU,
    UmlautO,
    UmlautA,
}

impl VirtualKey {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset of `self` inside the inclusive range `first..=last`.
    pub(crate) fn offset_in(self, first: VirtualKey, last: VirtualKey) -> Option<u8> {
        let (value, first, last) = (self as u8, first as u8, last as u8);
        (first..=last).contains(&value).then(|| value - first)
    }
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualKeyEvent {
    pub key: VirtualKey,
    pub pressed: bool,
}

impl VirtualKeyEvent {
    const PRESSED_BIT: u16 = 0x8000;

    pub const fn new(key: VirtualKey, pressed: bool) -> Self {
        Self { key, pressed }
    }

    /// Compact encoding used by the event queue.
    pub fn to_raw(self) -> u16 {
        let mut raw = self.key as u16;
        if self.pressed {
            raw |= Self::PRESSED_BIT;
        }
        raw
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        let code = u8::try_from(raw & !Self::PRESSED_BIT).ok()?;
        let key = VirtualKey::from_repr(code)?;
        Some(Self::new(key, raw & Self::PRESSED_BIT != 0))
    }
}

/// Number of 32 bit words needed for one bit per virtual key.
pub const KEY_MAP_WORDS: usize = VirtualKey::COUNT.div_ceil(32);
