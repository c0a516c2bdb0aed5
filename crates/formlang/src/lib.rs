//! Finite automata over the letters `a..=z`.
//!
//! This crate provides:
//! - An automaton model with epsilon transitions ([`Automaton`])
//! - Epsilon closure and epsilon elimination
//! - Subset construction (NFA to DFA conversion)
//! - Completion with a sink state
//! - Partition-refinement (Hopcroft/Moore) DFA minimization
//! - A postfix regex compiler and longest-accepting-prefix queries
//!
//! ```
//! let dfa = formlang::regex::compile("aab+*a..")?;
//! assert_eq!(dfa.prefix_match("ababab"), 5);
//! # Ok::<(), formlang::Error>(())
//! ```

pub mod automaton;
pub mod completion;
mod dump;
pub mod epsilon;
pub mod error;
mod matcher;
pub mod minimize;
pub mod pipeline;
pub mod regex;
pub mod state;
pub mod subset_construction;
pub mod symbol;

pub use automaton::{Automaton, Edge};
pub use error::{Error, Result};
pub use pipeline::CompileOptions;
pub use state::{StateId, StateSet};
pub use symbol::{EPSILON, SymbolId};
