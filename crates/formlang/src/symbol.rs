//! Symbol types for automata transitions.

use crate::error::{Error, Result};

/// A symbol identifier, stored as the ASCII byte of its character.
/// Ordering of symbol ids is therefore the ordering of their characters.
pub type SymbolId = u8;

/// Special symbol ID representing epsilon (empty) transitions.
/// `$` sorts before every letter, so epsilon edges come first in dumps.
pub const EPSILON: SymbolId = b'$';

/// Character used for the epsilon marker in edge lists and text dumps.
pub const EPSILON_CHAR: char = EPSILON as char;

/// Number of non-epsilon symbols.
pub const ALPHABET_SIZE: usize = 26;

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Check if a symbol is one of the letters `a..=z`.
#[inline]
pub fn is_letter(symbol: SymbolId) -> bool {
    symbol.is_ascii_lowercase()
}

/// Iterate over the fixed alphabet in ascending order (epsilon excluded).
pub fn alphabet() -> impl Iterator<Item = SymbolId> + Clone {
    b'a'..=b'z'
}

/// Convert a character into a symbol id. Accepts `a..=z` and the epsilon marker.
pub fn symbol_from_char(ch: char) -> Result<SymbolId> {
    if ch.is_ascii_lowercase() || ch == EPSILON_CHAR {
        Ok(ch as SymbolId)
    } else {
        Err(Error::UnknownSymbol {
            symbol: ch,
            position: None,
        })
    }
}

/// Character rendering of a symbol id.
#[inline]
pub fn symbol_to_char(symbol: SymbolId) -> char {
    symbol as char
}
