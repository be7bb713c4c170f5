//! Boot banner and branding.

use crate::terminal::Writer;
use runko_hal::TextGrid;

/// Banner lines, rendered centered with the rotating palette.
const HEADER: [&str; 8] = [
    r" ____                 _             ___   ____  ",
    r"|  _ \  _   _  _ __  | | __  ___   / _ \ / ___| ",
    r"| |_) || | | || '_ \ | |/ / / _ \ | | | |\___ \ ",
    r"|  _ < | |_| || | | ||   < | (_) || |_| | ___) |",
    r"|_| \_\ \__,_||_| |_||_|\_\ \___/  \___/ |____/ ",
    "",
    "RunkoOS v0.1.0",
    "",
];

/// Renders the banner centered at the top of the screen and parks the
/// cursor on the first free row below it.
pub fn print_banner<G: TextGrid>(term: &mut Writer<G>) {
    for (row, line) in HEADER.iter().enumerate() {
        term.write_centered(line, row);
    }
    term.set_cursor(HEADER.len() + 1, 0);
}
