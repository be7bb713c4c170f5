//! Serial port driver for the COM1 debug channel.
//!
//! 16550 programming over raw port I/O. Carries the logger and panic
//! output; the VGA terminal stays the user-facing surface. Under QEMU,
//! pass `-serial stdio` to see it.

use super::{inb, outb};
use core::fmt::{self, Write};
use spin::Mutex;

/// COM1 I/O port address.
const COM1_PORT: u16 = 0x3F8;

/// Global serial port instance, lazily initialized.
pub static SERIAL: spin::Once<Mutex<SerialPort>> = spin::Once::new();

/// A 16550 UART on a fixed port base.
pub struct SerialPort {
    base: u16,
}

impl SerialPort {
    /// Programs the UART: 115200 baud, 8 data bits, no parity, one stop
    /// bit, FIFOs on, interrupts off (this kernel only ever polls).
    fn new(base: u16) -> SerialPort {
        // SAFETY: `base` is a UART register block; programming it has no
        // effect beyond the device itself.
        unsafe {
            outb(base + 1, 0x00); // interrupts off
            outb(base + 3, 0x80); // DLAB on
            outb(base, 0x01); // divisor 1 -> 115200 baud
            outb(base + 1, 0x00);
            outb(base + 3, 0x03); // 8 bits, no parity, one stop bit
            outb(base + 2, 0xC7); // FIFO enabled, cleared, 14-byte threshold
            outb(base + 4, 0x0B); // RTS/DSR set
        }
        SerialPort { base }
    }

    /// Sends one byte, waiting for the transmit holding register first.
    pub fn send(&mut self, byte: u8) {
        // SAFETY: the port base was validated at construction; bit 5 of
        // the line status register gates the transmit hold register.
        unsafe {
            while inb(self.base + 5) & 0x20 == 0 {}
            outb(self.base, byte);
        }
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.send(b'\r');
            }
            self.send(byte);
        }
        Ok(())
    }
}

/// Initializes the global serial port.
///
/// Idempotent - calling it again after the first successful
/// initialization has no effect.
pub fn init() {
    SERIAL.call_once(|| Mutex::new(SerialPort::new(COM1_PORT)));
}

/// Returns a reference to the serial port, initializing if necessary.
fn get_serial() -> &'static Mutex<SerialPort> {
    init();
    SERIAL.get().expect("serial port not initialized")
}

/// Prints to the serial port without a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::arch::x86::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    get_serial().lock().write_fmt(args).expect("serial write failed");
}
