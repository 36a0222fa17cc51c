//! Contract tests for the primitive combinators: backtracking purity,
//! lookahead width, repetition bounds and keyword gating.

use packrat::{NoMatch, ParseError, Parsed, Parser};

#[test]
fn one_of_consumes_a_member() {
    let mut p = Parser::new("ab");
    assert_eq!(p.one_of(|c| c == 'a'), Ok('a'));
    assert_eq!(p.position(), 1);
}

#[test]
fn one_of_rejects_a_nonmember_without_moving() {
    let mut p = Parser::new("ab");
    assert_eq!(p.one_of(|c| c == 'x'), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn failed_sequence_restores_the_entry_position() {
    let mut p = Parser::new("abcz");
    let out = p.attempt(|p| {
        p.literal_raw("ab")?;
        p.attempt(|p| {
            p.literal_raw("c")?;
            p.literal_raw("d")
        })
    });
    assert_eq!(out, Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn inner_failure_rolls_back_to_its_own_checkpoint_only() {
    let mut p = Parser::new("abz");
    let out: Parsed<()> = p.attempt(|p| {
        p.literal_raw("ab")?;
        let inner = p.attempt(|p| p.literal_raw("cd"));
        assert_eq!(inner, Err(NoMatch));
        // the inner rollback must not disturb our own progress
        assert_eq!(p.position(), 2);
        Ok(())
    });
    assert_eq!(out, Ok(()));
    assert_eq!(p.position(), 2);
}

#[test]
fn take_consumes_exactly_the_requested_count() {
    let mut p = Parser::new("abcd");
    assert_eq!(p.take(3), Ok("abc"));
    assert_eq!(p.position(), 3);
}

#[test]
fn take_accepts_the_final_characters_of_the_input() {
    let mut p = Parser::new("ab");
    assert_eq!(p.take(2), Ok("ab"));
    assert!(p.at_end());
}

#[test]
fn take_fails_when_fewer_characters_remain() {
    let mut p = Parser::new("ab");
    assert_eq!(p.take(3), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn literal_skips_trailing_whitespace() {
    let mut p = Parser::new("if  (");
    assert_eq!(p.literal("if"), Ok(()));
    assert_eq!(p.position(), 4);
}

#[test]
fn literal_raw_mismatch_is_atomic() {
    let mut p = Parser::new("abx");
    assert_eq!(p.literal_raw("aby"), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn literal_unfollowed_rejects_a_keyword_prefix() {
    let word_char = |c: char| c.is_ascii_alphanumeric();
    let mut p = Parser::new("ifx");
    assert_eq!(p.literal_unfollowed("if", word_char), Err(NoMatch));
    assert_eq!(p.position(), 0);

    let mut p = Parser::new("if (");
    assert_eq!(p.literal_unfollowed("if", word_char), Ok(()));
    assert_eq!(p.position(), 3);
}

#[test]
fn opt_never_fails() {
    let mut p = Parser::new("x");
    assert_eq!(p.opt(|p| p.literal_raw("y")), None);
    assert_eq!(p.position(), 0);
    assert_eq!(p.opt(|p| p.literal_raw("x")), Some(()));
    assert_eq!(p.position(), 1);
}

#[test]
fn repeat_fails_below_the_minimum_and_restores() {
    let mut p = Parser::new("aa");
    assert_eq!(p.repeat(|p| p.one_of(|c| c == 'a'), 3..), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn repeat_stops_at_the_maximum() {
    let mut p = Parser::new("aaaa");
    assert_eq!(p.repeat(|p| p.one_of(|c| c == 'a'), 0..=2), Ok(vec!['a', 'a']));
    assert_eq!(p.position(), 2);
}

#[test]
fn fold_repeat_folds_in_match_order() {
    let mut p = Parser::new("abc");
    let out = p.fold_repeat(
        |p| p.one_of(|c| c.is_ascii_alphabetic()),
        1..,
        String::new(),
        |mut s, c| {
            s.push(c);
            s
        },
    );
    assert_eq!(out, Ok("abc".to_string()));
    assert!(p.at_end());
}

#[test]
fn choose_takes_the_first_success_in_order() {
    let mut p = Parser::new("ab");
    let out = p.choose((
        |p: &mut Parser| p.literal_raw("a").map(|()| 1),
        |p: &mut Parser| p.literal_raw("ab").map(|()| 2),
    ));
    assert_eq!(out, Ok(1));
    assert_eq!(p.position(), 1);
}

#[test]
fn choose_fails_only_when_every_option_fails() {
    let mut p = Parser::new("z");
    let out = p.choose((
        |p: &mut Parser| p.literal_raw("a").map(|()| 1),
        |p: &mut Parser| p.literal_raw("b").map(|()| 2),
    ));
    assert_eq!(out, Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn separated_leaves_a_trailing_separator_unconsumed() {
    let mut p = Parser::new("1,2,3,");
    let out = p.separated(
        |p| p.one_of(|c| c.is_ascii_digit()),
        |p| p.literal(","),
        false,
    );
    assert_eq!(out, Ok(vec!['1', '2', '3']));
    assert_eq!(p.position(), 5);
}

#[test]
fn separated_empty_list_is_gated() {
    let mut p = Parser::new("]");
    let empty: Parsed<Vec<char>> = p.separated(
        |p| p.one_of(|c| c.is_ascii_digit()),
        |p| p.literal(","),
        true,
    );
    assert_eq!(empty, Ok(Vec::new()));
    assert_eq!(p.position(), 0);

    let refused: Parsed<Vec<char>> = p.separated(
        |p| p.one_of(|c| c.is_ascii_digit()),
        |p| p.literal(","),
        false,
    );
    assert_eq!(refused, Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn delimited_sequences_open_inner_close() {
    let mut p = Parser::new("( 42 )");
    let out = p.delimited(
        "(",
        |p| {
            let digits = p.span(|c| c.is_ascii_digit(), 1..)?;
            p.whitespace();
            Ok(digits)
        },
        ")",
    );
    assert_eq!(out, Ok("42"));
    assert!(p.at_end());
}

#[test]
fn delimited_missing_close_restores_everything() {
    let mut p = Parser::new("(42");
    let out = p.delimited("(", |p| p.span(|c| c.is_ascii_digit(), 1..), ")");
    assert_eq!(out, Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn span_respects_bounds() {
    let mut p = Parser::new("beef42");
    assert_eq!(p.span(|c| c.is_ascii_hexdigit(), 4..=4), Ok("beef"));
    assert_eq!(p.span(|c| c.is_ascii_alphabetic(), 1..), Err(NoMatch));
    assert_eq!(p.position(), 4);
    assert_eq!(p.span(|c| c.is_ascii_digit(), 0..), Ok("42"));
}

#[test]
fn lookahead_is_zero_width_in_both_outcomes() {
    let mut p = Parser::new("abc");
    assert_eq!(p.when(|p| p.literal_raw("ab")), Ok(()));
    assert_eq!(p.position(), 0);
    assert_eq!(p.when(|p| p.literal_raw("zz")), Err(NoMatch));
    assert_eq!(p.position(), 0);
    assert_eq!(p.unless(|p| p.literal_raw("zz")), Ok(()));
    assert_eq!(p.position(), 0);
    assert_eq!(p.unless(|p| p.literal_raw("ab")), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

const KEYWORDS: &[&str] = &["true", "false", "null"];

#[test]
fn word_accepts_an_exact_keyword() {
    let mut p = Parser::new("true").with_keywords(KEYWORDS);
    assert_eq!(p.word(&["true", "false"]), Ok("true"));
    assert!(p.at_end());
}

#[test]
fn word_rejects_an_identifier_with_a_keyword_prefix() {
    let mut p = Parser::new("truex").with_keywords(KEYWORDS);
    assert_eq!(p.word(&["true", "false"]), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

#[test]
fn word_rejects_a_keyword_outside_the_expected_set() {
    let mut p = Parser::new("null").with_keywords(KEYWORDS);
    assert_eq!(p.word(&["true", "false"]), Err(NoMatch));
    assert_eq!(p.position(), 0);
}

fn line_comment(p: &mut Parser) -> Parsed<()> {
    p.literal_raw("#")?;
    p.span(|c| c != '\n', 0..)?;
    Ok(())
}

#[test]
fn whitespace_interleaves_comment_runs() {
    let mut p = Parser::new(" # one\n # two\nx").with_comment(line_comment);
    p.whitespace();
    assert_eq!(p.position(), 14);
    assert_eq!(p.one_of(|c| c == 'x'), Ok('x'));
}

#[test]
fn whitespace_never_fails() {
    let mut p = Parser::new("x");
    p.whitespace();
    assert_eq!(p.position(), 0);
}

#[test]
fn eof_succeeds_only_at_the_end() {
    let mut p = Parser::new("a");
    assert_eq!(p.eof(), Err(NoMatch));
    assert_eq!(p.one_of(|c| c == 'a'), Ok('a'));
    assert_eq!(p.eof(), Ok(()));
}

#[test]
fn complete_rejects_leftover_input() {
    let mut p = Parser::new("ab rest");
    assert!(p.complete(|p| p.literal("ab")).is_err());
}

#[test]
fn complete_reports_the_furthest_offset_reached() {
    let mut p = Parser::new("ab!");
    let out = p.complete(|p| p.literal_raw("ab"));
    assert_eq!(out, Err(ParseError { offset: 2 }));
}

#[test]
fn complete_skips_surrounding_whitespace() {
    let mut p = Parser::new("  ab  ");
    assert_eq!(p.complete(|p| p.literal_raw("ab")), Ok(()));
}

#[test]
fn traced_preserves_match_semantics() {
    let mut p = Parser::new("ab");
    assert_eq!(p.traced("ab", |p| p.literal_raw("ab")), Ok(()));
    assert_eq!(p.position(), 2);

    let mut p = Parser::new("x");
    assert_eq!(p.traced("ab", |p| p.literal_raw("ab")), Err(NoMatch));
    assert_eq!(p.position(), 0);
}
