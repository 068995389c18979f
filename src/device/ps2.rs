/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: ps2                                                             ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Byte level access to the PS/2 bus the keyboard is attached to.          ║
   ║                                                                         ║
   ║ Public items                                                            ║
   ║   - Transport    raw byte transfer on the bus (send / receive)          ║
   ║   - Clock        time source for timeouts and backoff delays            ║
   ║   - I8042Port    transport for the PC i8042 controller (x86_64)         ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

/// Physical layer of a PS/2 port.
///
/// The keyboard driver only ever writes single bytes and reads single bytes
/// with a timeout. Replies to commands and scancodes arrive on the same
/// stream.
pub trait Transport: Send {
    /// Initialize the bus using the given clock and data lines.
    fn begin(&mut self, clock_line: u8, data_line: u8);

    fn send_byte(&mut self, byte: u8);

    /// Wait up to `timeout_ms` for the next byte. `None` means timeout.
    fn receive_byte(&mut self, timeout_ms: u32) -> Option<u8>;
}

pub trait Clock: Send + Sync {
    /// Milliseconds since some fixed point in the past.
    fn systime_ms(&self) -> u64;

    fn delay_ms(&self, ms: u32);
}

#[cfg(target_arch = "x86_64")]
pub use i8042::I8042Port;

#[cfg(target_arch = "x86_64")]
mod i8042 {
    use core::hint::spin_loop;
    use log::{info, warn};
    use ps2::Controller;
    use ps2::error::ControllerError;
    use ps2::flags::ControllerConfigFlags;

    use super::{Clock, Transport};

    /// Keyboard port of a PC i8042 controller, operated in polling mode.
    ///
    /// Clock and data lines are hard wired on this controller, so the line
    /// identifiers passed to `begin` are ignored.
    pub struct I8042Port<C: Clock> {
        controller: Controller,
        clock: C,
    }

    impl<C: Clock> I8042Port<C> {
        /// # Safety
        /// The caller must own the i8042 I/O ports (0x60 and 0x64) exclusively.
        pub const unsafe fn new(clock: C) -> Self {
            Self { controller: unsafe { Controller::new() }, clock }
        }

        fn init_controller(&mut self) -> Result<(), ControllerError> {
            info!("Initializing controller");
            let controller = &mut self.controller;

            // Disable ports
            controller.disable_keyboard()?;
            controller.disable_mouse()?;

            // Flush output buffer
            let _ = controller.read_data();

            // The driver polls and wants untranslated scancode set 2
            let mut config = controller.read_config()?;
            config.set(ControllerConfigFlags::ENABLE_KEYBOARD_INTERRUPT | ControllerConfigFlags::ENABLE_MOUSE_INTERRUPT | ControllerConfigFlags::ENABLE_TRANSLATE, false);
            controller.write_config(config)?;

            controller.test_controller()?;
            info!("Self test result is OK");

            // Check if the controller has reset itself during the self test and if so, write the configuration byte again
            if controller.read_config()? != config {
                controller.write_config(config)?;
            }

            // Check if keyboard is present
            if controller.test_keyboard().is_err() {
                warn!("First port test failed");
                return Ok(());
            }

            controller.enable_keyboard()?;
            config.set(ControllerConfigFlags::DISABLE_KEYBOARD, false);
            controller.write_config(config)?;
            info!("First port enabled");

            Ok(())
        }
    }

    impl<C: Clock> Transport for I8042Port<C> {
        fn begin(&mut self, _clock_line: u8, _data_line: u8) {
            if let Err(error) = self.init_controller() {
                warn!("Controller initialization failed [{error:?}]");
            }
        }

        fn send_byte(&mut self, byte: u8) {
            if let Err(error) = self.controller.write_data(byte) {
                warn!("Failed to send [{byte:#04x}] to keyboard [{error:?}]");
            }
        }

        fn receive_byte(&mut self, timeout_ms: u32) -> Option<u8> {
            let deadline = self.clock.systime_ms() + timeout_ms as u64;
            loop {
                if let Ok(data) = self.controller.read_data() {
                    return Some(data);
                }
                if self.clock.systime_ms() >= deadline {
                    return None;
                }
                spin_loop();
            }
        }
    }
}
