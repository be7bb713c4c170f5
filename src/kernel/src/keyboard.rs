//! Polled PS/2 keyboard input.
//!
//! No interrupts are configured anywhere in this kernel, so every byte is
//! fetched by spinning on the controller status port. Scancode set 1,
//! press events only; releases and unmapped keys are dropped in [`decode`].

use runko_hal::PortIo;

/// Keyboard controller data port.
pub const DATA_PORT: u16 = 0x60;

/// Keyboard controller status port.
pub const STATUS_PORT: u16 = 0x64;

/// Status bit: the output buffer holds a byte.
const OUTPUT_FULL: u8 = 0x01;

/// Bit 7 of a scancode marks a key release.
const RELEASE_BIT: u8 = 0x80;

/// Decodes a raw set-1 scancode to a character.
///
/// Returns `None` for release events (bit 7 set) and for keys with no
/// printable mapping (modifiers, function keys, anything past the known
/// set); both are dropped silently.
pub fn decode(scancode: u8) -> Option<u8> {
    if scancode & RELEASE_BIT != 0 {
        return None;
    }
    let c = match scancode {
        0x02..=0x0B => b"1234567890"[scancode as usize - 0x02],
        0x0C => b'-',
        0x0D => b'=',
        0x0E => 0x08, // backspace
        0x10..=0x19 => b"qwertyuiop"[scancode as usize - 0x10],
        0x1A => b'[',
        0x1B => b']',
        0x1C => b'\n',
        0x1E..=0x26 => b"asdfghjkl"[scancode as usize - 0x1E],
        0x27 => b';',
        0x28 => b'\'',
        0x29 => b'`',
        0x2B => b'\\',
        0x2C..=0x32 => b"zxcvbnm"[scancode as usize - 0x2C],
        0x33 => b',',
        0x34 => b'.',
        0x35 => b'/',
        0x37 => b'*',
        0x39 => b' ',
        _ => return None,
    };
    Some(c)
}

/// A blocking source of decoded characters.
///
/// [`Keyboard`] implements it over the real controller;
/// [`crate::testutil::ScriptedKeys`] substitutes a script in tests.
pub trait KeySource {
    /// Waits for and returns the next character.
    fn next_char(&mut self) -> u8;
}

/// The PS/2 controller, polled.
///
/// Owns the port handle; constructed once at startup.
pub struct Keyboard<P: PortIo> {
    ports: P,
}

impl<P: PortIo> Keyboard<P> {
    /// Wraps the controller ports.
    pub fn new(ports: P) -> Keyboard<P> {
        Keyboard { ports }
    }

    /// Reads and discards whatever the controller buffered before the
    /// kernel was ready. Called once at startup.
    ///
    /// Returns the number of bytes discarded.
    pub fn drain_pending(&mut self) -> usize {
        let mut discarded = 0;
        while self.ports.read_port(STATUS_PORT) & OUTPUT_FULL != 0 {
            let _ = self.ports.read_port(DATA_PORT);
            discarded += 1;
        }
        discarded
    }

    /// Blocks until the controller reports a byte, then reads it.
    ///
    /// The only suspension point in the system: no timeout, no
    /// cancellation. Execution parks here until a key transition arrives.
    pub fn poll_scancode(&mut self) -> u8 {
        while self.ports.read_port(STATUS_PORT) & OUTPUT_FULL == 0 {}
        self.ports.read_port(DATA_PORT)
    }

    /// Discards controller bytes until the status port reports idle.
    ///
    /// Runs after every accepted press; a controller that reports "data
    /// available" across both the press and release transitions would
    /// otherwise register one physical keystroke repeatedly.
    fn wait_idle(&mut self) {
        while self.ports.read_port(STATUS_PORT) & OUTPUT_FULL != 0 {
            let _ = self.ports.read_port(DATA_PORT);
        }
    }
}

impl<P: PortIo> KeySource for Keyboard<P> {
    fn next_char(&mut self) -> u8 {
        loop {
            let scancode = self.poll_scancode();
            if let Some(c) = decode(scancode) {
                self.wait_idle();
                return c;
            }
        }
    }
}
