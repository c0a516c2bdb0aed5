//! DFA minimization by partition refinement.
//!
//! Hopcroft's algorithm: a queue of `(splitter block, symbol)` pairs drives the
//! refinement. Popping `(C, a)` marks the `a`-predecessors of `C` and splits
//! every block holding both marked and unmarked states. Only the blocks that
//! hold a predecessor are touched. When a split block already waits in the
//! queue, the new half is queued too; otherwise the smaller half is enough.
//! When the queue runs dry the partition is the coarsest one that is stable
//! under all transitions, i.e. the Myhill–Nerode classes of the input.

use crate::automaton::{Automaton, Transitions};
use crate::state::{StateId, StateSet};
use crate::symbol::{ALPHABET_SIZE, SymbolId, alphabet};
use log::{debug, trace};
use std::collections::VecDeque;

/// Index of `(item, symbol)` in a flat per-letter table.
#[inline]
fn slot(item: usize, symbol: SymbolId) -> usize {
    item * ALPHABET_SIZE + usize::from(symbol - b'a')
}

/// Inverse transition table: `reverse[slot(t, a)]` lists the states moving to
/// `t` on `a`. Missing transitions have no entry, so those states never land
/// inside a splitter.
fn reverse_transitions(dfa: &Automaton) -> Vec<Vec<StateId>> {
    let mut reverse = vec![Vec::new(); dfa.num_states() as usize * ALPHABET_SIZE];
    for state in 0..dfa.num_states() {
        for symbol in alphabet() {
            if let Some(next) = dfa.transition(state, symbol) {
                reverse[slot(next as usize, symbol)].push(state);
            }
        }
    }
    reverse
}

/// Refinable partition of `0..n`.
///
/// Each block is a contiguous run of `elems`. Marked members of a block are
/// swapped to the front of its run, `first[b]..mid[b]`.
struct Partition {
    elems: Vec<StateId>,
    loc: Vec<usize>,
    block_of: Vec<usize>,
    first: Vec<usize>,
    mid: Vec<usize>,
    end: Vec<usize>,
}

impl Partition {
    fn new(num_states: usize, blocks: &[Vec<StateId>]) -> Self {
        let mut partition = Self {
            elems: Vec::with_capacity(num_states),
            loc: vec![0; num_states],
            block_of: vec![0; num_states],
            first: Vec::with_capacity(blocks.len()),
            mid: Vec::with_capacity(blocks.len()),
            end: Vec::with_capacity(blocks.len()),
        };
        for (idx, block) in blocks.iter().enumerate() {
            let start = partition.elems.len();
            for &state in block {
                partition.loc[state as usize] = partition.elems.len();
                partition.block_of[state as usize] = idx;
                partition.elems.push(state);
            }
            partition.first.push(start);
            partition.mid.push(start);
            partition.end.push(partition.elems.len());
        }
        partition
    }

    fn num_blocks(&self) -> usize {
        self.first.len()
    }

    fn members(&self, block: usize) -> &[StateId] {
        &self.elems[self.first[block]..self.end[block]]
    }

    fn size(&self, block: usize) -> usize {
        self.end[block] - self.first[block]
    }

    /// Mark `state`. Returns true if it is the first marked member of its block.
    fn mark(&mut self, state: StateId) -> bool {
        let block = self.block_of[state as usize];
        let pos = self.loc[state as usize];
        let mid = self.mid[block];
        if pos < mid {
            return false;
        }

        let other = self.elems[mid];
        self.elems.swap(pos, mid);
        self.loc[other as usize] = pos;
        self.loc[state as usize] = mid;
        self.mid[block] = mid + 1;
        mid == self.first[block]
    }

    /// Move the marked members of `block` into a new block and return its
    /// index. A block whose members are all marked stays whole. Clears marks.
    fn split(&mut self, block: usize) -> Option<usize> {
        let (first, mid) = (self.first[block], self.mid[block]);
        if mid == self.end[block] {
            self.mid[block] = first;
            return None;
        }

        let new = self.num_blocks();
        self.first.push(first);
        self.mid.push(first);
        self.end.push(mid);
        self.first[block] = mid;
        self.mid[block] = mid;
        for &state in &self.elems[first..mid] {
            self.block_of[state as usize] = new;
        }
        Some(new)
    }

    fn into_blocks(self) -> Vec<StateSet> {
        let num_states = self.elems.len();
        (0..self.num_blocks())
            .map(|block| {
                let mut set = StateSet::with_capacity(num_states);
                for &state in self.members(block) {
                    set.insert(state);
                }
                set
            })
            .collect()
    }
}

/// Queue of pending splitters with membership flags.
struct Worklist {
    queue: VecDeque<(usize, SymbolId)>,
    queued: Vec<bool>,
}

impl Worklist {
    fn new(max_blocks: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: vec![false; max_blocks * ALPHABET_SIZE],
        }
    }

    fn push(&mut self, block: usize, symbol: SymbolId) {
        let idx = slot(block, symbol);
        if !self.queued[idx] {
            self.queued[idx] = true;
            self.queue.push_back((block, symbol));
        }
    }

    fn contains(&self, block: usize, symbol: SymbolId) -> bool {
        self.queued[slot(block, symbol)]
    }

    fn pop(&mut self) -> Option<(usize, SymbolId)> {
        let (block, symbol) = self.queue.pop_front()?;
        self.queued[slot(block, symbol)] = false;
        Some((block, symbol))
    }
}

/// Compute the coarsest stable partition of the states of a deterministic automaton.
///
/// Blocks are returned in ascending order of their smallest member.
pub fn refine_partition(dfa: &Automaton) -> Vec<StateSet> {
    let num_states = dfa.num_states() as usize;
    let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) =
        (0..dfa.num_states()).partition(|&state| dfa.is_accepting(state));

    // Initial partition: final states and non-final states
    let initial: Vec<Vec<StateId>> = [accepting, rejecting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();

    let reverse = reverse_transitions(dfa);
    let mut partition = Partition::new(num_states, &initial);

    // A missing transition leaves every block, so neither initial block stands
    // in for its complement: both are queued.
    let mut worklist = Worklist::new(num_states);
    for block in 0..partition.num_blocks() {
        for symbol in alphabet() {
            worklist.push(block, symbol);
        }
    }

    let mut predecessors = Vec::new();
    let mut touched = Vec::new();
    while let Some((splitter, symbol)) = worklist.pop() {
        predecessors.clear();
        for &target in partition.members(splitter) {
            predecessors.extend_from_slice(&reverse[slot(target as usize, symbol)]);
        }
        if predecessors.is_empty() {
            continue;
        }

        touched.clear();
        for &state in &predecessors {
            if partition.mark(state) {
                touched.push(partition.block_of[state as usize]);
            }
        }

        for &block in &touched {
            let Some(new) = partition.split(block) else {
                continue;
            };
            trace!(
                "split block {block} on ({splitter}, {}): {} + {} states",
                symbol as char,
                partition.size(block),
                partition.size(new)
            );
            for sym in alphabet() {
                if worklist.contains(block, sym) || partition.size(new) <= partition.size(block) {
                    worklist.push(new, sym);
                } else {
                    worklist.push(block, sym);
                }
            }
        }
    }

    let mut blocks = partition.into_blocks();
    blocks.sort_by_key(StateSet::first);
    blocks
}

/// Check that every block agrees, per symbol, on the block its members move to.
///
/// This holds for the output of [`refine_partition`]; a partition failing it
/// is not yet fully refined.
pub fn partition_is_stable(dfa: &Automaton, partition: &[StateSet]) -> bool {
    let block_of = block_index(dfa.num_states(), partition);

    partition.iter().all(|block| {
        alphabet().all(|symbol| {
            let mut targets = block
                .iter()
                .map(|state| dfa.transition(state, symbol).map(|next| block_of[next as usize]));
            match targets.next() {
                Some(first) => targets.all(|target| target == first),
                None => true,
            }
        })
    })
}

fn block_index(num_states: StateId, partition: &[StateSet]) -> Vec<StateId> {
    let mut block_of = vec![0; num_states as usize];
    for (idx, block) in partition.iter().enumerate() {
        for state in block.iter() {
            block_of[state as usize] = idx as StateId;
        }
    }
    block_of
}

/// Minimize a deterministic automaton.
///
/// The input should be total (see [`complete`](crate::completion::complete));
/// on a partial input a missing transition is treated as a distinct dead
/// move and stays missing in the output. Every input state takes part, so
/// unreachable states are merged into whichever class they belong to rather
/// than dropped.
///
/// Output states are the blocks of [`refine_partition`] in order. Each block
/// takes its transitions and acceptance from its smallest member.
pub fn minimize(dfa: &Automaton) -> Automaton {
    debug_assert!(dfa.is_deterministic(), "minimization needs a deterministic automaton");

    let partition = refine_partition(dfa);
    debug_assert!(partition_is_stable(dfa, &partition));

    let num_states = partition.len() as StateId;
    let block_of = block_index(dfa.num_states(), &partition);
    let mut transitions = Transitions::new();
    let mut accepting = StateSet::with_capacity(partition.len());

    for (idx, block) in partition.iter().enumerate() {
        let idx = idx as StateId;
        let Some(representative) = block.first() else {
            continue;
        };

        for symbol in alphabet() {
            if let Some(dest) = dfa.transition(representative, symbol) {
                transitions.insert(
                    (idx, symbol),
                    StateSet::singleton(block_of[dest as usize], partition.len()),
                );
            }
        }

        if dfa.is_accepting(representative) {
            accepting.insert(idx);
        }
    }

    let start = block_of[dfa.start() as usize];
    debug!("minimized automaton: {} -> {} states", dfa.num_states(), num_states);
    Automaton::from_parts(num_states, start, transitions, accepting)
}

impl Automaton {
    /// Minimization stage. See [`minimize`].
    pub fn minimize(self) -> Automaton {
        minimize(&self)
    }
}
