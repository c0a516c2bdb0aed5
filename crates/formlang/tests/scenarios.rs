//! End-to-end scenarios for the regex compiler and the transformation pipeline.

use formlang::regex::compile;
use formlang::{Automaton, CompileOptions, Edge, Error, StateId};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn check_prefix(postfix: &str, input: &str, expected: usize) {
    init_logging();
    let dfa = compile(postfix).unwrap();
    assert_eq!(dfa.prefix_match(input), expected, "{postfix} on {input}");

    // Completion and minimization do not change the answer.
    let minimal = CompileOptions::minimal().compile(postfix).unwrap();
    assert_eq!(minimal.prefix_match(input), expected, "{postfix} on {input}");
}

fn automaton(
    num_states: StateId,
    start: StateId,
    edges: &[(StateId, StateId, char)],
    accepting: &[StateId],
) -> Automaton {
    let edges = edges
        .iter()
        .map(|&(from, to, ch)| Edge::new(from, to, ch).unwrap());
    Automaton::new(num_states, start, edges, accepting.iter().copied()).unwrap()
}

#[test]
fn test_alternation_under_star() {
    // a(a|b)*a
    check_prefix("aab+*a..", "ababab", 5);
}

#[test]
fn test_optional_middle() {
    // a(ε|b)c
    check_prefix("a1b+c..", "ac", 2);
}

#[test]
fn test_single_char_closure() {
    check_prefix("x*", "xxxxxxxd", 7);
}

#[test]
fn test_no_matching_prefix() {
    check_prefix("acb..bab.c.*.ab.ba.+.+*a.", "cb", 0);
}

#[test]
fn test_whole_input_matches() {
    let pattern = "ratatatatatatatatatatata";
    check_prefix("rat+*.a.", pattern, pattern.len());
}

#[test]
fn test_leftover_operands_are_malformed() {
    for postfix in ["abc.", "aab+*a.", "a1b+c."] {
        assert!(
            matches!(
                compile(postfix),
                Err(Error::MalformedRegex {
                    position: None,
                    fragments: 2
                })
            ),
            "{postfix}"
        );
    }
}

#[test]
fn test_unknown_characters() {
    assert!(matches!(
        compile("fasjhfhjak....,897931<d"),
        Err(Error::UnknownSymbol { symbol: ',', .. })
    ));
}

#[test]
fn test_epsilon_nfa_pipeline_dump() {
    init_logging();
    // 0 -a-> 1, 0 -ε-> 2, 2 -b-> 3(final), 1 -ε-> 3
    let nfa = automaton(4, 0, &[(0, 1, 'a'), (0, 2, '$'), (2, 3, 'b'), (1, 3, '$')], &[3]);

    let epsilon_free = nfa.eliminate_epsilon();
    assert_eq!(
        epsilon_free.to_string(),
        "2\n1 3 \n0\n4\n3\n0 1 a\n0 3 b\n2 3 b\n"
    );

    let dfa = epsilon_free.determinize();
    // {0} = 0, {1} = 1, {3} = 2
    assert_eq!(dfa.to_string(), "2\n1 2 \n0\n3\n2\n0 1 a\n0 2 b\n");
}

#[test]
fn test_nonzero_start_state() {
    let nfa = automaton(3, 2, &[(2, 0, 'a'), (0, 1, 'b')], &[1]);
    let dfa = nfa.to_dfa();

    assert_eq!(dfa.start(), 0);
    assert_eq!(dfa.prefix_match("abz"), 2);
    assert!(dfa.accepts("ab"));
    assert!(!dfa.accepts("b"));
}

#[test]
fn test_full_pipeline_on_handwritten_nfa() {
    init_logging();
    // Words over {a, b} ending in "ab", written with redundant states.
    let nfa = automaton(
        5,
        0,
        &[
            (0, 0, 'a'),
            (0, 0, 'b'),
            (0, 1, 'a'),
            (1, 2, 'b'),
            (0, 3, '$'),
            (3, 4, 'a'),
            (4, 2, 'b'),
        ],
        &[2],
    );

    let minimal = nfa.clone().to_dfa().complete().minimize();
    assert!(minimal.is_total());
    // "", "…a", "…ab", and the sink for c..z
    assert_eq!(minimal.num_states(), 4);

    for word in ["ab", "aab", "bab", "abab"] {
        assert!(minimal.accepts(word), "{word}");
        assert!(nfa.accepts(word), "{word}");
    }
    for word in ["", "a", "ba", "abb", "abc"] {
        assert!(!minimal.accepts(word), "{word}");
        assert!(!nfa.accepts(word), "{word}");
    }
}
