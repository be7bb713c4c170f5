//! Terminal engine: cursor, attribute, and layout over a text grid.
//!
//! Owns the cursor and the current color; everything the kernel shows the
//! user goes through here. Rows never scroll: past the bottom the cursor
//! wraps back to row 0 and overwrites in place.

use crate::arch::x86::vga::{cell, Color, ColorCode};
use core::fmt;
use runko_hal::{Console, TextGrid, GRID_HEIGHT, GRID_WIDTH};

/// Default attribute for fresh output.
const DEFAULT_COLOR: ColorCode = ColorCode::new(Color::White, Color::Black);

/// Rotation palette for centered banner text.
const CENTERED_COLORS: [ColorCode; 4] = [
    ColorCode::new(Color::LightBlue, Color::Black),
    ColorCode::new(Color::LightCyan, Color::Black),
    ColorCode::new(Color::Cyan, Color::Black),
    ColorCode::new(Color::Blue, Color::Black),
];

/// Terminal writer owning cursor position and color state.
///
/// Generic over the grid so the shell and its tests run against the
/// simulated surface exactly as they run against VGA.
pub struct Writer<G: TextGrid> {
    row: usize,
    column: usize,
    color: ColorCode,
    grid: G,
}

impl<G: TextGrid> Writer<G> {
    /// Wraps a grid. Call [`initialize`](Self::initialize) before writing.
    pub fn new(grid: G) -> Writer<G> {
        Writer {
            row: 0,
            column: 0,
            color: DEFAULT_COLOR,
            grid,
        }
    }

    /// Resets the cursor and attribute and blanks every cell.
    ///
    /// Re-entrant: the shell's `clear` command re-invokes it on a live
    /// terminal.
    pub fn initialize(&mut self) {
        self.row = 0;
        self.column = 0;
        self.color = DEFAULT_COLOR;
        let blank = cell(b' ', self.color);
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                self.grid.write_cell(x, y, blank);
            }
        }
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color = ColorCode::new(foreground, background);
    }

    /// Current cursor position as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Places the cursor, clamped to the grid.
    pub fn set_cursor(&mut self, row: usize, column: usize) {
        self.row = row.min(GRID_HEIGHT - 1);
        self.column = column.min(GRID_WIDTH - 1);
    }

    /// Moves the cursor one column left if it is not at the row start.
    pub fn cursor_left(&mut self) {
        if self.column > 0 {
            self.column -= 1;
        }
    }

    /// Writes one character at the cursor and advances it.
    ///
    /// Newline moves to the start of the next row. At the bottom of the
    /// grid the cursor wraps back to row 0 and content is overwritten in
    /// place, never scrolled.
    pub fn put_char(&mut self, c: u8) {
        if c == b'\n' {
            self.column = 0;
            self.advance_row();
            return;
        }
        self.grid.write_cell(self.column, self.row, cell(c, self.color));
        self.column += 1;
        if self.column == GRID_WIDTH {
            self.column = 0;
            self.advance_row();
        }
    }

    fn advance_row(&mut self) {
        self.row += 1;
        if self.row == GRID_HEIGHT {
            self.row = 0;
        }
    }

    /// Writes one cell directly, bypassing cursor and attribute state.
    ///
    /// Banner rendering only; out-of-grid coordinates are dropped.
    pub fn put_char_at(&mut self, c: u8, color: ColorCode, x: usize, y: usize) {
        if x >= GRID_WIDTH || y >= GRID_HEIGHT {
            return;
        }
        self.grid.write_cell(x, y, cell(c, color));
    }

    /// Writes a string through [`put_char`](Self::put_char).
    pub fn write(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Writes `s` centered on `row`, each character colored from the
    /// rotating banner palette by `(index + row) % 4`.
    ///
    /// Cosmetic path: direct cell writes, the cursor does not move.
    pub fn write_centered(&mut self, s: &str, row: usize) {
        let column = GRID_WIDTH.saturating_sub(s.len()) / 2;
        for (i, byte) in s.bytes().enumerate() {
            let color = CENTERED_COLORS[(i + row) % CENTERED_COLORS.len()];
            self.put_char_at(byte, color, column + i, row);
        }
    }

    /// Shared access to the underlying grid.
    pub fn grid(&self) -> &G {
        &self.grid
    }
}

impl<G: TextGrid> fmt::Write for Writer<G> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => self.put_char(byte),
                // Non-printable: show placeholder
                _ => self.put_char(0xfe),
            }
        }
        Ok(())
    }
}

impl<G: TextGrid> Console for Writer<G> {
    fn write_str(&mut self, s: &str) {
        self.write(s);
    }

    fn clear(&mut self) {
        self.initialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::x86::vga::{cell_char, cell_color};
    use crate::testutil::SimGrid;

    fn fresh_term() -> Writer<SimGrid> {
        let mut term = Writer::new(SimGrid::new());
        term.initialize();
        term
    }

    #[test]
    fn initialize_blanks_the_grid_and_is_idempotent() {
        let mut term = fresh_term();
        term.write("some output\nmore output");
        term.set_color(Color::Yellow, Color::Blue);

        term.initialize();
        let first: [u16; GRID_WIDTH] = core::array::from_fn(|x| term.grid().read_cell(x, 0));
        term.initialize();
        let second: [u16; GRID_WIDTH] = core::array::from_fn(|x| term.grid().read_cell(x, 0));

        assert_eq!(first, second);
        assert_eq!(term.cursor(), (0, 0));
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                assert_eq!(term.grid().read_cell(x, y), 0x0F20, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn put_char_advances_and_wraps_the_column() {
        let mut term = fresh_term();
        for _ in 0..GRID_WIDTH {
            term.put_char(b'x');
        }
        assert_eq!(term.cursor(), (1, 0));
    }

    #[test]
    fn filling_the_grid_wraps_back_to_origin_without_scrolling() {
        let mut term = fresh_term();
        term.put_char(b'#');
        for _ in 1..GRID_WIDTH * GRID_HEIGHT {
            term.put_char(b'x');
        }
        assert_eq!(term.cursor(), (0, 0));
        // the first cell still holds the first character: nothing moved
        assert_eq!(cell_char(term.grid().read_cell(0, 0)), b'#');
    }

    #[test]
    fn newline_on_the_last_row_wraps_to_the_top() {
        let mut term = fresh_term();
        term.set_cursor(GRID_HEIGHT - 1, 5);
        term.put_char(b'\n');
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn centered_write_starts_at_truncated_half_gap() {
        let mut term = fresh_term();
        let bytes = [b'x'; 59];
        let text = core::str::from_utf8(&bytes).unwrap();
        term.write_centered(text, 4);

        // (80 - 59) / 2 = 10, truncating
        assert_eq!(cell_char(term.grid().read_cell(9, 4)), b' ');
        assert_eq!(cell_char(term.grid().read_cell(10, 4)), b'x');
        assert_eq!(cell_char(term.grid().read_cell(68, 4)), b'x');
        assert_eq!(cell_char(term.grid().read_cell(69, 4)), b' ');
    }

    #[test]
    fn centered_write_rotates_colors_and_keeps_the_cursor() {
        let mut term = fresh_term();
        term.write("ab");
        let before = term.cursor();
        term.write_centered("banner", 3);
        assert_eq!(term.cursor(), before);

        let column = (GRID_WIDTH - 6) / 2;
        for i in 0..6 {
            let expected = CENTERED_COLORS[(i + 3) % 4].bits();
            assert_eq!(cell_color(term.grid().read_cell(column + i, 3)), expected);
        }
    }

    #[test]
    fn cursor_left_stops_at_the_row_start() {
        let mut term = fresh_term();
        term.put_char(b'a');
        term.cursor_left();
        assert_eq!(term.cursor(), (0, 0));
        term.cursor_left();
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn console_trait_routes_to_write_and_initialize() {
        let mut term = fresh_term();
        let console: &mut dyn Console = &mut term;
        console.write_str("abc");
        console.clear();
        assert_eq!(term.cursor(), (0, 0));
        assert_eq!(term.grid().read_cell(0, 0), 0x0F20);
    }

    #[test]
    fn put_char_at_bypasses_cursor_and_color_state() {
        let mut term = fresh_term();
        term.set_color(Color::Yellow, Color::Black);
        let red = ColorCode::new(Color::LightRed, Color::Black);
        term.put_char_at(b'Q', red, 12, 7);

        assert_eq!(term.cursor(), (0, 0));
        let cell = term.grid().read_cell(12, 7);
        assert_eq!(cell_char(cell), b'Q');
        assert_eq!(cell_color(cell), red.bits());
    }
}
