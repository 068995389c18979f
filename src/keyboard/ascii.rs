/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: ascii                                                           ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Projection of virtual keys onto 8 bit character codes. Accented         ║
   ║ letters and a few symbols use their Latin-1 codes. CTRL turns letters   ║
   ║ and some symbols into control characters.                               ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

use super::modifiers::Modifiers;
use super::virtual_key::VirtualKey;

pub const NUL: u8 = 0x00;
pub const SOH: u8 = 0x01;
pub const BS: u8 = 0x08;
pub const HT: u8 = 0x09;
pub const CR: u8 = 0x0D;
pub const XON: u8 = 0x11;
pub const XOFF: u8 = 0x13;
pub const ESC: u8 = 0x1B;
pub const FS: u8 = 0x1C;
pub const GS: u8 = 0x1D;
pub const RS: u8 = 0x1E;
pub const US: u8 = 0x1F;
pub const DEL: u8 = 0x7F;

/// Character code of `key` under `modifiers`, or `None` for keys without one
/// (modifiers, function and cursor keys).
pub fn to_ascii(key: VirtualKey, modifiers: Modifiers) -> Option<u8> {
    let ctrl = modifiers.contains(Modifiers::CTRL);
    let with_ctrl = |plain: u8, control: u8| if ctrl { control } else { plain };

    if let Some(offset) = key.offset_in(VirtualKey::Key0, VirtualKey::Key9) {
        return Some(b'0' + offset);
    }
    if let Some(offset) = key.offset_in(VirtualKey::Kp0, VirtualKey::Kp9) {
        return Some(b'0' + offset);
    }
    // CTRL + letter = SOH (a) ... SUB (z)
    if let Some(offset) = key.offset_in(VirtualKey::LowerA, VirtualKey::LowerZ) {
        return Some(with_ctrl(b'a', SOH) + offset);
    }
    if let Some(offset) = key.offset_in(VirtualKey::UpperA, VirtualKey::UpperZ) {
        return Some(with_ctrl(b'A', SOH) + offset);
    }

    let code = match key {
        VirtualKey::Space => with_ctrl(b' ', NUL),

        VirtualKey::GraveA => 0xE0,
        VirtualKey::GraveE => 0xE8,
        VirtualKey::AcuteE => 0xE9,
        VirtualKey::GraveI => 0xEC,
        VirtualKey::GraveO => 0xF2,
        VirtualKey::GraveU => 0xF9,
        VirtualKey::CedillaC => 0xE7,
        VirtualKey::Eszett => 0xDF,
        VirtualKey::UmlautU => 0xFC,
        VirtualKey::UmlautO => 0xF6,
        VirtualKey::UmlautA => 0xE4,

        VirtualKey::GraveAccent => b'`',
        VirtualKey::AcuteAccent => 0xB4,
        VirtualKey::Quote => b'\'',
        VirtualKey::QuoteDbl => b'"',
        VirtualKey::Equals => b'=',
        VirtualKey::Minus | VirtualKey::KpMinus => b'-',
        VirtualKey::Plus | VirtualKey::KpPlus => b'+',
        VirtualKey::Asterisk | VirtualKey::KpMultiply => b'*',
        VirtualKey::Backslash => with_ctrl(b'\\', FS),
        VirtualKey::Slash | VirtualKey::KpDivide => b'/',
        VirtualKey::Period | VirtualKey::KpPeriod => b'.',
        VirtualKey::Colon => b':',
        VirtualKey::Comma => b',',
        VirtualKey::Semicolon => b';',
        VirtualKey::Ampersand => b'&',
        VirtualKey::VerticalBar => b'|',
        VirtualKey::Hash => b'#',
        VirtualKey::At => b'@',
        VirtualKey::Caret => b'^',
        VirtualKey::Dollar => b'$',
        VirtualKey::Pound => 0xA3,
        // Not part of Latin-1
        VirtualKey::Euro => 0xEE,
        VirtualKey::Percent => b'%',
        VirtualKey::Exclaim => b'!',
        VirtualKey::Question => with_ctrl(b'?', US),
        VirtualKey::LeftBrace => b'{',
        VirtualKey::RightBrace => b'}',
        VirtualKey::LeftBracket => with_ctrl(b'[', ESC),
        VirtualKey::RightBracket => with_ctrl(b']', GS),
        VirtualKey::LeftParen => b'(',
        VirtualKey::RightParen => b')',
        VirtualKey::Less => b'<',
        VirtualKey::Greater => b'>',
        VirtualKey::Underscore => b'_',
        VirtualKey::Degree => 0xB0,
        VirtualKey::Section => 0xA7,
        VirtualKey::Tilde => with_ctrl(b'~', RS),
        VirtualKey::Negation => 0xAC,

        VirtualKey::Backspace => BS,
        VirtualKey::Delete | VirtualKey::KpDelete => DEL,
        VirtualKey::Return | VirtualKey::KpEnter => CR,
        VirtualKey::Tab => HT,
        VirtualKey::Escape => ESC,
        VirtualKey::ScrollLock => if modifiers.contains(Modifiers::SCROLL_LOCK) { XOFF } else { XON },

        _ => return None,
    };

    Some(code)
}
