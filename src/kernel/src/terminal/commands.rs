//! Built-in shell commands.
//!
//! A closed set: every input line parses to exactly one variant, so
//! dispatch is exhaustive and nothing aborts the shell loop.

use super::writer::Writer;
use crate::arch::x86::vga::Color;
use runko_hal::TextGrid;

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Display the command summary.
    Help,
    /// Print the argument text verbatim.
    Echo(&'a str),
    /// Clear the screen and reset the cursor.
    Clear,
    /// List the fixed directory names.
    Ls,
    /// Leave the shell.
    Exit,
    /// Blank line; nothing to do.
    Empty,
    /// Anything unrecognized.
    Unknown,
}

impl<'a> Command<'a> {
    /// Parses one input line.
    ///
    /// Zero-argument verbs match exactly. `echo` matches on its
    /// `"echo "` prefix and the remainder passes through verbatim,
    /// spaces included; no trimming anywhere.
    pub fn parse(line: &'a str) -> Command<'a> {
        match line {
            "" => Command::Empty,
            "help" => Command::Help,
            "clear" => Command::Clear,
            "ls" => Command::Ls,
            "exit" => Command::Exit,
            _ => match line.strip_prefix("echo ") {
                Some(text) => Command::Echo(text),
                None => Command::Unknown,
            },
        }
    }

    /// Executes the command against the terminal.
    ///
    /// Returns `false` when the shell should stop; `exit` is the only
    /// command that does.
    pub fn execute<G: TextGrid>(self, term: &mut Writer<G>) -> bool {
        log::debug!("shell dispatch: {self:?}");
        match self {
            Command::Help => cmd_help(term),
            Command::Echo(text) => {
                term.write(text);
                term.put_char(b'\n');
            }
            Command::Clear => term.initialize(),
            Command::Ls => cmd_ls(term),
            Command::Exit => {
                term.write("Exiting shell...\n");
                return false;
            }
            Command::Empty => {}
            Command::Unknown => {
                term.set_color(Color::LightRed, Color::Black);
                term.write("Command not found\n");
                term.set_color(Color::White, Color::Black);
            }
        }
        true
    }
}

/// Fixed command summary.
fn cmd_help<G: TextGrid>(term: &mut Writer<G>) {
    term.write("Built-in commands:\n");
    term.write("  help      - Show this help message\n");
    term.write("  echo TEXT - Print TEXT\n");
    term.write("  clear     - Clear the screen\n");
    term.write("  ls        - List directory names\n");
    term.write("  exit      - Exit the shell\n");
}

/// Fixed name list; there is no filesystem behind it.
fn cmd_ls<G: TextGrid>(term: &mut Writer<G>) {
    term.write("bin  dev  etc  home  srv  tmp\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SimGrid;

    #[test]
    fn exact_verbs_parse() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("ls"), Command::Ls);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse(""), Command::Empty);
    }

    #[test]
    fn echo_takes_the_remainder_verbatim() {
        assert_eq!(Command::parse("echo hello world"), Command::Echo("hello world"));
        assert_eq!(Command::parse("echo  two  spaces "), Command::Echo(" two  spaces "));
        assert_eq!(Command::parse("echo "), Command::Echo(""));
    }

    #[test]
    fn near_misses_are_unknown() {
        // no trimming: a stray space defeats the exact match
        assert_eq!(Command::parse(" help"), Command::Unknown);
        assert_eq!(Command::parse("help "), Command::Unknown);
        // bare echo has no prefix match either
        assert_eq!(Command::parse("echo"), Command::Unknown);
        assert_eq!(Command::parse("HELP"), Command::Unknown);
        assert_eq!(Command::parse("frobnicate"), Command::Unknown);
    }

    #[test]
    fn only_exit_stops_the_loop() {
        let mut term = Writer::new(SimGrid::new());
        term.initialize();

        assert!(Command::Help.execute(&mut term));
        assert!(Command::Echo("x").execute(&mut term));
        assert!(Command::Clear.execute(&mut term));
        assert!(Command::Ls.execute(&mut term));
        assert!(Command::Empty.execute(&mut term));
        assert!(Command::Unknown.execute(&mut term));
        assert!(!Command::Exit.execute(&mut term));
    }

    #[test]
    fn ls_lists_the_fixed_names() {
        let mut term = Writer::new(SimGrid::new());
        term.initialize();
        Command::Ls.execute(&mut term);

        let row = term.grid().row_chars(0);
        assert_eq!(&row[..29], b"bin  dev  etc  home  srv  tmp");
    }
}
