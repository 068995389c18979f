// Command protocol: attempts per command and reply timeout (ms)
pub const COMMAND_RETRY_COUNT: usize = 3;
pub const COMMAND_TIMEOUT_MS: u32 = 10;

// Reset and self test can take a while on real hardware
pub const RESET_SELF_TEST_TIMEOUT_MS: u32 = 500;
pub const RESET_ATTEMPTS: usize = 6;
pub const RESET_BACKOFF_MS: u32 = 500;

// Scancode set forced at startup
pub const DEFAULT_SCANCODE_SET: u8 = 2;

// Timeout for the remaining bytes of a multi byte scancode sequence (ms)
pub const SEQUENCE_BYTE_TIMEOUT_MS: u32 = 100;
// Resend requests before a stalled sequence is abandoned
pub const MAX_SCANCODE_RESENDS: usize = 5;

// The pipeline waits at most this long for the first byte of an event,
// so pause requests and foreground commands get a chance in between.
pub const IDLE_POLL_MS: u32 = 200;

pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 32;

// Upper bound for walking layout inheritance chains
pub const MAX_LAYOUT_DEPTH: usize = 8;
