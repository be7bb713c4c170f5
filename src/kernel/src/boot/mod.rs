//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets,
//! written through the owned terminal handle.

pub mod banner;

use crate::arch::x86::vga::Color;
use crate::terminal::Writer;
use runko_hal::TextGrid;

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log<G: TextGrid>(term: &mut Writer<G>, status: Status, message: &str) {
    print_status(term, status);
    term.put_char(b' ');
    term.write(message);
    term.put_char(b'\n');
}

/// Log an indented detail line (for sub-items).
///
/// Format: `       Detail text` (aligned with message after status)
pub fn log_detail<G: TextGrid>(term: &mut Writer<G>, message: &str) {
    term.write("       ");
    term.write(message);
    term.put_char(b'\n');
}

fn print_status<G: TextGrid>(term: &mut Writer<G>, status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Warn => ("[WARN]", Color::Yellow),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    term.set_color(color, Color::Black);
    term.write(text);
    term.set_color(Color::White, Color::Black);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SimGrid;

    #[test]
    fn status_lines_carry_the_bracket_and_message() {
        let mut term = Writer::new(SimGrid::new());
        term.initialize();
        log(&mut term, Status::Ok, "GDT loaded");
        log_detail(&mut term, "seven descriptors");

        assert_eq!(&term.grid().row_chars(0)[..17], b"[ OK ] GDT loaded");
        assert_eq!(&term.grid().row_chars(1)[..24], b"       seven descriptors");
    }
}
