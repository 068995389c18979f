/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: keyboard                                                        ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ PS/2 keyboard driver. Decodes scancodes into virtual key events using   ║
   ║ the active layout, tracks modifiers and locks, maintains a key state    ║
   ║ map and distributes events through a bounded queue.                     ║
   ║                                                                         ║
   ║ One task (`run`) produces events, any number of readers consume them.   ║
   ║                                                                         ║
   ║ Public functions                                                        ║
   ║   - begin, reset              bring the device into a known state       ║
   ║   - run, process_next_event   event pipeline                            ║
   ║   - next_virtual_key          read queued events                        ║
   ║   - is_virtual_key_down       query the key state map                   ║
   ║   - read_ascii                read queued events as characters          ║
   ║   - pause, resume             stop / restart the pipeline               ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

pub mod ascii;
pub mod command;
pub mod decoder;
pub mod layout;
pub mod layouts;
pub mod modifiers;
pub mod virtual_key;

#[cfg(test)]
pub(crate) mod testing;

use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, AtomicIsize, AtomicU8, AtomicU32, AtomicUsize, Ordering};
use log::{debug, error, info, warn};
use nolock::queues::{DequeueError, mpmc};
use spin::{Mutex, RwLock};

use crate::consts::{DEFAULT_EVENT_QUEUE_CAPACITY, DEFAULT_SCANCODE_SET, IDLE_POLL_MS, MAX_SCANCODE_RESENDS, RESET_ATTEMPTS, RESET_BACKOFF_MS, SEQUENCE_BYTE_TIMEOUT_MS};
use crate::device::ps2::{Clock, Transport};
use command::{CommandError, CommandPort, Ps2Device};
use decoder::{Scancode, ScancodeDecoder};
use layout::Layout;
use modifiers::Modifiers;
use virtual_key::{KEY_MAP_WORDS, VirtualKey, VirtualKeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Clock and data line handed to `Transport::begin`. `None` means the
    /// transport is already set up.
    pub pins: Option<(u8, u8)>,
    /// Without an event queue only `read_virtual_key` and the key state map
    /// are usable.
    pub create_event_queue: bool,
    /// A capacity of 0 disables the event queue.
    pub queue_capacity: usize,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self { pins: None, create_event_queue: true, queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY }
    }
}

struct DecoderState {
    decoder: ScancodeDecoder,
    modifiers: Modifiers,
}

type EventQueue = (mpmc::bounded::scq::Receiver<u16>, mpmc::bounded::scq::Sender<u16>);

pub struct Keyboard<T: Transport, C: Clock> {
    port: CommandPort<T, C>,
    config: KeyboardConfig,
    decoder: Mutex<DecoderState>,
    // Published copy of the decoder's modifiers
    modifiers: AtomicU8,
    layout: RwLock<&'static Layout>,
    key_map: [AtomicU32; KEY_MAP_WORDS],
    queue: Option<EventQueue>,
    // Enqueued minus dequeued events, briefly negative when a reader is faster
    queued: AtomicIsize,
    available: AtomicBool,
    paused: AtomicBool,
    // Foreground commands currently keeping the pipeline off the bus
    held: AtomicUsize,
}

impl<T: Transport, C: Clock> Keyboard<T, C> {
    pub fn new(transport: T, clock: C, mut config: KeyboardConfig) -> Self {
        if config.create_event_queue && config.queue_capacity == 0 {
            warn!("Event queue capacity is 0, running without event queue");
            config.create_event_queue = false;
        }
        let queue = config.create_event_queue.then(|| mpmc::bounded::scq::queue(config.queue_capacity));

        Self {
            port: CommandPort::new(transport, clock),
            config,
            decoder: Mutex::new(DecoderState { decoder: ScancodeDecoder::new(), modifiers: Modifiers::empty() }),
            modifiers: AtomicU8::new(0),
            layout: RwLock::new(&layouts::US),
            key_map: [const { AtomicU32::new(0) }; KEY_MAP_WORDS],
            queue,
            queued: AtomicIsize::new(0),
            available: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            held: AtomicUsize::new(0),
        }
    }

    /// Initialize the bus (if pins are configured) and reset the keyboard.
    /// Returns whether a keyboard has been detected.
    pub fn begin(&self) -> bool {
        if let Some((clock_line, data_line)) = self.config.pins {
            self.port.begin(clock_line, data_line);
        }

        self.reset()
    }

    /// Reset the keyboard, select scancode set 2 and the US layout.
    ///
    /// A keyboard that does not pass the reset is marked unavailable; the
    /// driver keeps working without it. The pipeline is held off until the
    /// reset has completed.
    pub fn reset(&self) -> bool {
        self.with_pipeline_held(|state| {
            self.set_layout(&layouts::US);
            state.decoder.reset();
            self.reset_device()
        })
    }

    fn reset_device(&self) -> bool {
        for attempt in 1..=RESET_ATTEMPTS {
            let result = self.port.reset()
                .and_then(|()| self.port.set_scancode_set(DEFAULT_SCANCODE_SET));

            match result {
                Ok(()) => {
                    info!("Keyboard reset, using scancode set [{DEFAULT_SCANCODE_SET}]");
                    self.available.store(true, Ordering::Release);
                    return true;
                }
                Err(error) => warn!("Keyboard reset attempt [{attempt}/{RESET_ATTEMPTS}] failed [{error}]"),
            }

            if attempt < RESET_ATTEMPTS {
                self.port.clock().delay_ms(RESET_BACKOFF_MS);
            }
        }

        error!("No keyboard detected");
        self.available.store(false, Ordering::Release);
        false
    }

    /// Identify the attached device with the pipeline held off, so the
    /// identification bytes are not taken for scancodes.
    pub fn identify(&self) -> Result<Ps2Device, CommandError> {
        self.with_pipeline_held(|_| self.port.identify())
    }

    /// Run `command` between two events. The pipeline backs off until it
    /// is done.
    fn with_pipeline_held<R>(&self, command: impl FnOnce(&mut DecoderState) -> R) -> R {
        self.held.fetch_add(1, Ordering::AcqRel);
        let result = command(&mut self.decoder.lock());
        self.held.fetch_sub(1, Ordering::AcqRel);
        result
    }

    fn is_held(&self) -> bool {
        self.is_paused() || self.held.load(Ordering::Acquire) > 0
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Access to the command protocol, e.g. for typematic rate or identify.
    pub fn commands(&self) -> &CommandPort<T, C> {
        &self.port
    }

    pub fn set_layout(&self, layout: &'static Layout) {
        *self.layout.write() = layout;
        info!("Using keyboard layout [{}]", layout.name);
    }

    /// Select one of the shipped layouts by name. Unknown names leave the
    /// active layout unchanged.
    pub fn set_layout_by_name(&self, name: &str) -> bool {
        match layouts::by_name(name) {
            Some(layout) => {
                self.set_layout(layout);
                true
            }
            None => {
                warn!("Unknown keyboard layout [{name}]");
                false
            }
        }
    }

    pub fn layout(&self) -> &'static Layout {
        *self.layout.read()
    }

    pub fn leds(&self) -> command::Leds {
        self.port.leds()
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_bits_truncate(self.modifiers.load(Ordering::Acquire))
    }

    /// Decode the next event straight from the bus, bypassing the key state
    /// map and the event queue. Blocks until an event arrives.
    pub fn read_virtual_key(&self) -> VirtualKeyEvent {
        loop {
            if let Some(event) = self.decode_event() {
                return event;
            }
        }
    }

    fn decode_event(&self) -> Option<VirtualKeyEvent> {
        self.decode(&mut self.decoder.lock())
    }

    /// Read and decode one complete scancode sequence.
    ///
    /// Returns `None` if no byte arrived within `IDLE_POLL_MS`, the scancode is
    /// not mapped by the active layout or the sequence was broken.
    fn decode(&self, state: &mut DecoderState) -> Option<VirtualKeyEvent> {
        let mut byte = self.port.reply(IDLE_POLL_MS)?;

        let scancode = loop {
            if let Some(scancode) = state.decoder.advance(byte) {
                break scancode;
            }
            if state.decoder.is_idle() {
                warn!("Discarding broken Pause sequence at [{byte:#04x}]");
                return None;
            }

            match self.port.next_scancode(SEQUENCE_BYTE_TIMEOUT_MS, MAX_SCANCODE_RESENDS) {
                Some(next) => byte = next,
                None => {
                    warn!("Scancode sequence stalled, discarding it");
                    state.decoder.reset();
                    return None;
                }
            }
        };

        let layout = self.layout();
        let (key, pressed) = match scancode {
            Scancode::Pause => (VirtualKey::Pause, true),
            Scancode::Make { code, extended } => (layout.resolve_scancode(code, extended), true),
            Scancode::Break { code, extended } => (layout.resolve_scancode(code, extended), false),
        };

        if key == VirtualKey::None {
            debug!("Ignoring unmapped scancode [{scancode:?}]");
            return None;
        }

        let event = VirtualKeyEvent::new(layout.resolve_alternate(key, state.modifiers), pressed);
        if state.modifiers.apply(event) {
            if let Err(error) = self.port.set_leds(state.modifiers.leds()) {
                warn!("Failed to update keyboard LEDs [{error}]");
            }
        }
        self.modifiers.store(state.modifiers.bits(), Ordering::Release);

        Some(event)
    }

    /// One pipeline step: decode an event, update the key state map and
    /// queue the event. Blocks while the queue is full.
    ///
    /// Does nothing while paused or while `reset` or `identify` hold the bus.
    pub fn process_next_event(&self) -> Option<VirtualKeyEvent> {
        let event = {
            // Checked under the decoder lock, so nothing is read once `pause` returned
            let mut state = self.decoder.lock();
            if self.is_held() {
                return None;
            }
            self.decode(&mut state)?
        };
        self.update_key_map(event);

        if let Some((_, sender)) = &self.queue {
            let raw = event.to_raw();
            while sender.try_enqueue(raw).is_err() {
                spin_loop();
            }
            self.queued.fetch_add(1, Ordering::AcqRel);
        }

        Some(event)
    }

    /// Event pipeline, meant to be run by a dedicated task.
    pub fn run(&self) -> ! {
        info!("Keyboard event pipeline started");
        loop {
            if self.is_held() {
                self.port.clock().delay_ms(IDLE_POLL_MS);
                continue;
            }

            self.process_next_event();
        }
    }

    fn update_key_map(&self, event: VirtualKeyEvent) {
        let index = event.key.index();
        let (word, bit) = (&self.key_map[index / 32], 1u32 << (index % 32));

        if event.pressed {
            word.fetch_or(bit, Ordering::AcqRel);
        } else {
            word.fetch_and(!bit, Ordering::AcqRel);
        }
    }

    pub fn is_virtual_key_down(&self, key: VirtualKey) -> bool {
        let index = key.index();
        self.key_map[index / 32].load(Ordering::Acquire) & (1 << (index % 32)) != 0
    }

    pub fn has_event_queue(&self) -> bool {
        self.queue.is_some()
    }

    /// Number of queued events.
    pub fn virtual_key_available(&self) -> usize {
        if self.queue.is_none() {
            return 0;
        }

        (self.queued.load(Ordering::Acquire).max(0) as usize).min(self.config.queue_capacity)
    }

    /// Take the next event from the queue, waiting up to `timeout_ms`
    /// (`None` waits forever). Always `None` without an event queue.
    pub fn next_virtual_key(&self, timeout_ms: Option<u32>) -> Option<VirtualKeyEvent> {
        let (receiver, _) = self.queue.as_ref()?;
        let clock = self.port.clock();
        let deadline = timeout_ms.map(|ms| clock.systime_ms() + ms as u64);

        loop {
            match receiver.try_dequeue() {
                Ok(raw) => {
                    self.queued.fetch_sub(1, Ordering::AcqRel);
                    return VirtualKeyEvent::from_raw(raw);
                }
                Err(DequeueError::Closed) => return None,
                Err(DequeueError::Empty) => {}
            }

            if deadline.is_some_and(|deadline| clock.systime_ms() >= deadline) {
                return None;
            }
            spin_loop();
        }
    }

    /// Stop the pipeline after the event being decoded. Queued events are kept.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
        // Wait for a sequence in progress to complete
        drop(self.decoder.lock());
        info!("Keyboard event pipeline paused");
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        info!("Keyboard event pipeline resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Character code of `key` under the current modifiers.
    pub fn virtual_key_to_ascii(&self, key: VirtualKey) -> Option<u8> {
        ascii::to_ascii(key, self.modifiers())
    }

    /// Take queued events until a key press with a character code shows up.
    /// Releases and keys without a character are consumed and skipped.
    pub fn read_ascii(&self, timeout_ms: Option<u32>) -> Option<u8> {
        let clock = self.port.clock();
        let deadline = timeout_ms.map(|ms| clock.systime_ms() + ms as u64);

        loop {
            let remaining = deadline.map(|deadline| deadline.saturating_sub(clock.systime_ms()) as u32);
            let event = self.next_virtual_key(remaining)?;

            if event.pressed {
                if let Some(code) = self.virtual_key_to_ascii(event.key) {
                    return Some(code);
                }
            }
        }
    }
}
