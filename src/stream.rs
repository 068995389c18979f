use crate::device::ps2::{Clock, Transport};
use crate::keyboard::Keyboard;
use crate::keyboard::virtual_key::VirtualKeyEvent;

pub trait RawInputStream {
    /// Read a single event, blocking.
    fn read_event(&self) -> VirtualKeyEvent;
    /// Read a single event, non-blocking.
    fn read_event_nb(&self) -> Option<VirtualKeyEvent>;
}

pub trait DecodedInputStream {
    /// Read the next character, blocking. -1 if there is nothing to read from.
    fn decoded_read_byte(&self) -> i16;
    fn decoded_try_read_byte(&self) -> Option<i16>;
}

impl<T: Transport, C: Clock> RawInputStream for Keyboard<T, C> {
    fn read_event(&self) -> VirtualKeyEvent {
        // Without a queue nobody else consumes the bus
        match self.next_virtual_key(None) {
            Some(event) => event,
            None => self.read_virtual_key(),
        }
    }

    fn read_event_nb(&self) -> Option<VirtualKeyEvent> {
        self.next_virtual_key(Some(0))
    }
}

impl<T: Transport, C: Clock> DecodedInputStream for Keyboard<T, C> {
    fn decoded_read_byte(&self) -> i16 {
        match self.read_ascii(None) {
            Some(code) => code as i16,
            None => -1,
        }
    }

    fn decoded_try_read_byte(&self) -> Option<i16> {
        self.read_ascii(Some(0)).map(i16::from)
    }
}
