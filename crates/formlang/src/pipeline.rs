//! Configuration of the optional stages after regex compilation.

use crate::automaton::Automaton;
use crate::error::Result;
use crate::regex;
use log::debug;

/// Which optional stages run after epsilon elimination and subset construction.
///
/// The default runs neither, giving the partial DFA that [`regex::compile`]
/// returns.
///
/// # Example
///
/// ```
/// use formlang::CompileOptions;
///
/// let dfa = CompileOptions::new().complete(true).minimize(true).compile("ab+*a.")?;
/// assert!(dfa.is_total());
/// assert_eq!(dfa.prefix_match("abba"), 4);
/// # Ok::<(), formlang::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    complete: bool,
    minimize: bool,
}

impl CompileOptions {
    /// Options running no optional stage; same as `default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options producing the canonical minimal total DFA.
    pub fn minimal() -> Self {
        Self {
            complete: true,
            minimize: true,
        }
    }

    /// Add a sink state so the result is total.
    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    /// Run partition refinement on the result.
    ///
    /// Minimizing without completing treats missing transitions as a separate
    /// dead move; combine with [`complete`](Self::complete) for the canonical
    /// minimal automaton.
    pub fn minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    /// Run the configured stages on an automaton, determinizing it first.
    pub fn apply(&self, automaton: Automaton) -> Automaton {
        let mut dfa = automaton.to_dfa();
        if self.complete {
            dfa = dfa.complete();
        }
        if self.minimize {
            dfa = dfa.minimize();
        }
        debug!("pipeline {self:?} produced {} states", dfa.num_states());
        dfa
    }

    /// Compile a postfix expression and run the configured stages.
    pub fn compile(&self, postfix: &str) -> Result<Automaton> {
        Ok(self.apply(regex::compile_nfa(postfix)?))
    }
}
