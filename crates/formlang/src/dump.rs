//! Canonical plain-text dump of an automaton.
//!
//! ```text
//! <accepting count>
//! <accepting states, each followed by a space>
//! <start>
//! <state count>
//! <edge count>
//! <from> <to> <symbol>     one line per edge
//! ```
//!
//! Edges are listed in ascending `(from, symbol)` order with destinations
//! ascending; epsilon is written as `$`.

use crate::automaton::Automaton;
use crate::symbol::symbol_to_char;
use std::fmt;
use std::io;

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.accepting().len())?;
        for state in self.accepting().iter() {
            write!(f, "{state} ")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.start())?;
        writeln!(f, "{}", self.num_states())?;
        writeln!(f, "{}", self.num_edges())?;
        for (from, symbol, to) in self.edges() {
            writeln!(f, "{from} {to} {}", symbol_to_char(symbol))?;
        }
        Ok(())
    }
}

impl Automaton {
    /// Write the canonical text dump to `out`.
    pub fn write_text<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}
