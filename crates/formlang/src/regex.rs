//! Compilation of postfix regular expressions into deterministic automata.
//!
//! The expression is written in postfix form over these tokens:
//!
//! | token    | meaning                      |
//! |----------|------------------------------|
//! | `a`..`z` | literal letter               |
//! | `1`      | the empty string             |
//! | `.`      | concatenation (binary)       |
//! | `+`      | alternation (binary)         |
//! | `*`      | Kleene star (unary)          |
//!
//! For example `ab+*a.` is `(a|b)*a`. A single left-to-right scan keeps a
//! stack of partial automata ([`Fragment`]s); the surviving fragment is
//! turned into an epsilon-NFA, which then goes through epsilon elimination
//! and subset construction.

use crate::automaton::{Automaton, Edge};
use crate::error::{Error, Result};
use crate::state::StateId;
use crate::symbol::{EPSILON, SymbolId};
use log::{debug, trace};

pub const CONCAT: char = '.';
pub const ALTERNATION: char = '+';
pub const STAR: char = '*';
pub const EMPTY_STRING: char = '1';

/// Mints fresh, dense state ids for one compilation.
#[derive(Debug, Default)]
struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    fn count(&self) -> StateId {
        self.next
    }
}

/// A partial automaton on the evaluation stack.
///
/// A fragment is entered by an edge labeled `entry_symbol` leading into
/// `entry`; whoever connects to the fragment supplies that edge. Every edge
/// into `entry` carries `entry_symbol`, which lets a literal be a single
/// state. A word belongs to the fragment's language iff it labels a path
/// that starts with that entering edge and ends in `exit`.
#[derive(Debug, Clone)]
struct Fragment {
    entry: StateId,
    entry_symbol: SymbolId,
    exit: StateId,
    edges: Vec<Edge>,
}

impl Fragment {
    fn literal(states: &mut StateAllocator, symbol: SymbolId) -> Self {
        let state = states.fresh();
        Self {
            entry: state,
            entry_symbol: symbol,
            exit: state,
            edges: Vec::new(),
        }
    }

    /// Edge from `from` into this fragment.
    fn enter_from(&self, from: StateId) -> Edge {
        Edge {
            from,
            to: self.entry,
            symbol: self.entry_symbol,
        }
    }

    fn concat(mut left: Fragment, right: Fragment) -> Self {
        left.edges.reserve(right.edges.len() + 1);
        left.edges.push(right.enter_from(left.exit));
        left.edges.extend(right.edges);
        Self {
            entry: left.entry,
            entry_symbol: left.entry_symbol,
            exit: right.exit,
            edges: left.edges,
        }
    }

    fn alternation(states: &mut StateAllocator, mut left: Fragment, right: Fragment) -> Self {
        let fork = states.fresh();
        let join = states.fresh();

        left.edges.reserve(right.edges.len() + 4);
        left.edges.push(left.enter_from(fork));
        left.edges.push(right.enter_from(fork));
        left.edges.push(epsilon(left.exit, join));
        left.edges.push(epsilon(right.exit, join));
        left.edges.extend(right.edges);

        Self {
            entry: fork,
            entry_symbol: EPSILON,
            exit: join,
            edges: left.edges,
        }
    }

    /// The star fragment is a fresh hub that is both entry and exit, so zero
    /// repetitions are accepted at the hub itself.
    fn star(states: &mut StateAllocator, mut operand: Fragment) -> Self {
        let hub = states.fresh();

        operand.edges.push(operand.enter_from(hub));
        operand.edges.push(epsilon(operand.exit, hub));

        Self {
            entry: hub,
            entry_symbol: EPSILON,
            exit: hub,
            edges: operand.edges,
        }
    }
}

fn epsilon(from: StateId, to: StateId) -> Edge {
    Edge {
        from,
        to,
        symbol: EPSILON,
    }
}

fn pop_operand(stack: &mut Vec<Fragment>, position: usize) -> Result<Fragment> {
    stack.pop().ok_or(Error::MalformedRegex {
        position: Some(position),
        fragments: 0,
    })
}

/// Build the epsilon-NFA of a postfix expression without determinizing it.
///
/// The result has a fresh start state with one edge into the expression's
/// fragment, and the fragment's exit as its only accepting state.
pub fn compile_nfa(postfix: &str) -> Result<Automaton> {
    let mut states = StateAllocator::default();
    let mut stack: Vec<Fragment> = Vec::new();

    for (position, token) in postfix.char_indices() {
        trace!("token {token:?} at {position}, stack depth {}", stack.len());
        let fragment = match token {
            'a'..='z' => Fragment::literal(&mut states, token as SymbolId),
            EMPTY_STRING => Fragment::literal(&mut states, EPSILON),
            CONCAT => {
                let right = pop_operand(&mut stack, position)?;
                let left = pop_operand(&mut stack, position)?;
                Fragment::concat(left, right)
            }
            ALTERNATION => {
                let right = pop_operand(&mut stack, position)?;
                let left = pop_operand(&mut stack, position)?;
                Fragment::alternation(&mut states, left, right)
            }
            STAR => {
                let operand = pop_operand(&mut stack, position)?;
                Fragment::star(&mut states, operand)
            }
            _ => {
                return Err(Error::UnknownSymbol {
                    symbol: token,
                    position: Some(position),
                });
            }
        };
        stack.push(fragment);
    }

    let mut fragment = match (stack.pop(), stack.is_empty()) {
        (Some(fragment), true) => fragment,
        (top, _) => {
            return Err(Error::MalformedRegex {
                position: None,
                fragments: stack.len() + usize::from(top.is_some()),
            });
        }
    };

    let start = states.fresh();
    fragment.edges.push(fragment.enter_from(start));

    debug!(
        "postfix {postfix:?}: {} nfa states, {} edges",
        states.count(),
        fragment.edges.len()
    );
    Automaton::new(states.count(), start, fragment.edges, [fragment.exit])
}

/// Compile a postfix expression into a deterministic (possibly partial) automaton.
pub fn compile(postfix: &str) -> Result<Automaton> {
    Ok(compile_nfa(postfix)?.to_dfa())
}
