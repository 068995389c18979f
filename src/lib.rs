/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: lib                                                             ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Descr.: Logical driver for PS/2 keyboards. Turns the raw scancode byte  ║
   ║         stream of a PS/2 bus into virtual key events, keeps track of    ║
   ║         modifier and lock state and drives the keyboard's command       ║
   ║         protocol (reset, LEDs, typematic rate, identification).         ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod consts;
pub mod device;
pub mod keyboard;
pub mod stream;

pub use device::ps2::{Clock, Transport};
pub use keyboard::command::{CommandError, CommandPort, Leds, Ps2Device};
pub use keyboard::layout::{AlternateKeyRule, Layout, ScancodeMapping};
pub use keyboard::modifiers::Modifiers;
pub use keyboard::virtual_key::{VirtualKey, VirtualKeyEvent};
pub use keyboard::{Keyboard, KeyboardConfig};
