use bitflags::bitflags;

use super::command::Leds;
use super::virtual_key::{VirtualKey, VirtualKeyEvent};

bitflags! {
    /// Live modifier keys and toggled lock states.
    ///
    /// Also used by alternate key rules to describe the state they require.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 0x01;
        const ALT = 0x02;
        const SHIFT = 0x04;
        const CAPS_LOCK = 0x08;
        const NUM_LOCK = 0x10;
        const SCROLL_LOCK = 0x20;
    }
}

impl Modifiers {
    /// Track `event`. Returns `true` if a lock state has toggled and the
    /// keyboard LEDs need to be synchronized.
    ///
    /// Locks toggle on release, like the LEDs of a physical keyboard.
    pub fn apply(&mut self, event: VirtualKeyEvent) -> bool {
        match event.key {
            VirtualKey::LCtrl | VirtualKey::RCtrl => self.set(Modifiers::CTRL, event.pressed),
            VirtualKey::LAlt | VirtualKey::RAlt => self.set(Modifiers::ALT, event.pressed),
            VirtualKey::LShift | VirtualKey::RShift => self.set(Modifiers::SHIFT, event.pressed),
            VirtualKey::CapsLock | VirtualKey::NumLock | VirtualKey::ScrollLock => {
                if !event.pressed {
                    self.toggle(Self::lock_of(event.key));
                    return true;
                }
            }
            _ => {}
        }

        false
    }

    fn lock_of(key: VirtualKey) -> Modifiers {
        match key {
            VirtualKey::CapsLock => Modifiers::CAPS_LOCK,
            VirtualKey::NumLock => Modifiers::NUM_LOCK,
            _ => Modifiers::SCROLL_LOCK,
        }
    }

    /// LED pattern matching the current lock states.
    pub fn leds(self) -> Leds {
        let mut leds = Leds::empty();
        leds.set(Leds::NUM_LOCK, self.contains(Modifiers::NUM_LOCK));
        leds.set(Leds::CAPS_LOCK, self.contains(Modifiers::CAPS_LOCK));
        leds.set(Leds::SCROLL_LOCK, self.contains(Modifiers::SCROLL_LOCK));
        leds
    }
}
