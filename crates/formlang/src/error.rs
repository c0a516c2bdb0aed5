//! Error types for automaton construction and regex compilation.

use crate::state::StateId;
use thiserror::Error;

/// Errors raised on malformed input. None of them are transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A state id referenced by the start state, an edge, or the accepting
    /// set is outside `0..num_states`.
    #[error("state {state} is out of range for an automaton with {num_states} states")]
    InvalidAutomaton { state: StateId, num_states: StateId },

    /// The postfix expression does not reduce to exactly one fragment.
    ///
    /// `position` is the byte offset of the operator that ran out of operands,
    /// or `None` when the scan finished with `fragments` left on the stack.
    #[error("malformed postfix regex: {}", describe_malformed(.position, .fragments))]
    MalformedRegex {
        position: Option<usize>,
        fragments: usize,
    },

    /// A character that is neither a supported literal nor an operator.
    #[error("unknown symbol {symbol:?}{}", describe_position(.position))]
    UnknownSymbol {
        symbol: char,
        position: Option<usize>,
    },
}

fn describe_malformed(position: &Option<usize>, fragments: &usize) -> String {
    match position {
        Some(pos) => format!("operator at offset {pos} is missing an operand"),
        None => format!("expected exactly one fragment after the scan, found {fragments}"),
    }
}

fn describe_position(position: &Option<usize>) -> String {
    position.map_or_else(String::new, |pos| format!(" at offset {pos}"))
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, Error>;
