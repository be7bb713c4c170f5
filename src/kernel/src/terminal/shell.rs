//! Command-line shell with line editing.
//!
//! Synchronous read-eval-print loop: one decoded character at a time from
//! the keyboard, echo and editing on the terminal, then dispatch. There is
//! no error path anywhere in here; every input falls into some branch.

use super::commands::Command;
use super::writer::Writer;
use crate::arch::x86::vga::Color;
use crate::keyboard::KeySource;
use runko_hal::TextGrid;

/// Maximum input line length, end marker included.
const MAX_LINE_LENGTH: usize = 256;

/// Backspace as delivered by the scancode table.
const BACKSPACE: u8 = 0x08;

/// One line of input under edit. Fresh per prompt iteration.
///
/// Fixed capacity with the last slot reserved for the end marker, so at
/// most `MAX_LINE_LENGTH - 1` characters are stored.
pub struct LineBuffer {
    bytes: [u8; MAX_LINE_LENGTH],
    len: usize,
}

impl LineBuffer {
    /// An empty line.
    pub fn new() -> LineBuffer {
        LineBuffer {
            bytes: [0; MAX_LINE_LENGTH],
            len: 0,
        }
    }

    /// Appends a character if there is spare capacity.
    ///
    /// Overflow is dropped silently; the caller has already echoed the
    /// character either way.
    pub fn push(&mut self, c: u8) {
        if self.len < MAX_LINE_LENGTH - 1 {
            self.bytes[self.len] = c;
            self.len += 1;
        }
    }

    /// Drops the last character. Returns whether one was stored to drop.
    pub fn pop(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Number of stored characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The stored line as text. The scancode table only produces ASCII.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the read-eval-print loop until `exit`.
///
/// Unbounded: `exit` is the only way out, and the per-character reads
/// inside park indefinitely until keys arrive.
pub fn run<G: TextGrid, K: KeySource>(term: &mut Writer<G>, keys: &mut K) {
    loop {
        prompt(term);
        let mut line = LineBuffer::new();
        read_line(term, keys, &mut line);
        let command = Command::parse(line.as_str());
        if !command.execute(term) {
            break;
        }
    }
}

/// Displays the shell prompt.
fn prompt<G: TextGrid>(term: &mut Writer<G>) {
    term.set_color(Color::LightGreen, Color::Black);
    term.write("runko");
    term.set_color(Color::White, Color::Black);
    term.write("> ");
}

/// Line-edit loop: one polled character at a time until newline.
fn read_line<G: TextGrid, K: KeySource>(term: &mut Writer<G>, keys: &mut K, line: &mut LineBuffer) {
    loop {
        let c = keys.next_char();
        match c {
            BACKSPACE => {
                // Three-step erase: the grid has no delete primitive.
                if line.pop() {
                    term.cursor_left();
                    term.put_char(b' ');
                    term.cursor_left();
                }
            }
            b'\n' => {
                term.put_char(b'\n');
                return;
            }
            c => {
                // Echo is unconditional; the buffer stores what fits.
                line.push(c);
                term.put_char(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ScriptedKeys, SimGrid};

    fn fresh_term() -> Writer<SimGrid> {
        let mut term = Writer::new(SimGrid::new());
        term.initialize();
        term
    }

    fn row_starts_with(term: &Writer<SimGrid>, row: usize, expected: &[u8]) -> bool {
        let chars = term.grid().row_chars(row);
        &chars[..expected.len()] == expected
    }

    #[test]
    fn line_buffer_stores_at_most_255_characters() {
        let mut line = LineBuffer::new();
        for _ in 0..300 {
            line.push(b'a');
        }
        assert_eq!(line.len(), 255);
        assert_eq!(line.as_str().len(), 255);
    }

    #[test]
    fn overflowing_input_is_echoed_but_not_stored() {
        let mut term = fresh_term();
        let mut script = [b'a'; 301];
        script[300] = b'\n';
        let mut keys = ScriptedKeys::new(&script);
        let mut line = LineBuffer::new();

        read_line(&mut term, &mut keys, &mut line);

        assert_eq!(line.len(), 255);
        assert_eq!(term.grid().count_char(b'a'), 300);
    }

    #[test]
    fn backspace_erases_the_echo_and_the_buffer() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"ab\x08c\n");
        let mut line = LineBuffer::new();

        read_line(&mut term, &mut keys, &mut line);

        assert_eq!(line.as_str(), "ac");
        assert!(row_starts_with(&term, 0, b"ac "));
    }

    #[test]
    fn backspace_on_an_empty_line_does_nothing() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"\x08\x08a\n");
        let mut line = LineBuffer::new();

        read_line(&mut term, &mut keys, &mut line);

        assert_eq!(line.as_str(), "a");
        assert!(row_starts_with(&term, 0, b"a "));
    }

    #[test]
    fn help_then_exit_prints_summary_and_farewell() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"help\nexit\n");

        run(&mut term, &mut keys);

        assert!(row_starts_with(&term, 0, b"runko> help"));
        assert!(row_starts_with(&term, 1, b"Built-in commands:"));
        assert!(row_starts_with(&term, 7, b"runko> exit"));
        assert!(row_starts_with(&term, 8, b"Exiting shell..."));
    }

    #[test]
    fn echo_strips_the_verb_and_keeps_the_rest_verbatim() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"echo hello world\nexit\n");

        run(&mut term, &mut keys);

        assert!(row_starts_with(&term, 1, b"hello world "));
    }

    #[test]
    fn unknown_input_reports_command_not_found() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"frobnicate\nexit\n");

        run(&mut term, &mut keys);

        assert!(row_starts_with(&term, 1, b"Command not found"));
    }

    #[test]
    fn empty_input_just_prompts_again() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"\nexit\n");

        run(&mut term, &mut keys);

        assert!(row_starts_with(&term, 0, b"runko> "));
        assert!(row_starts_with(&term, 1, b"runko> exit"));
    }

    #[test]
    fn clear_reinitializes_the_live_terminal() {
        let mut term = fresh_term();
        let mut keys = ScriptedKeys::new(b"clear\nexit\n");

        run(&mut term, &mut keys);

        // the clear wiped its own prompt; the next one starts at the top
        assert!(row_starts_with(&term, 0, b"runko> exit"));
        assert!(row_starts_with(&term, 1, b"Exiting shell..."));
    }
}
