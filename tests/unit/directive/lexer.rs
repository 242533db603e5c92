use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex("x", src).unwrap().into_iter().map(|t| t.kind).collect()
}

fn word(s: &str) -> TokenKind {
    TokenKind::Word(s.to_owned())
}

#[test]
fn waypoints_with_curve() {
    assert_eq!(
        kinds("0 50 -20 | .25 0.1 0.25 1 |"),
        vec![
            TokenKind::Number(0.0),
            TokenKind::Number(50.0),
            TokenKind::Number(-20.0),
            TokenKind::Pipe,
            TokenKind::Number(0.25),
            TokenKind::Number(0.1),
            TokenKind::Number(0.25),
            TokenKind::Number(1.0),
            TokenKind::Pipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn glued_dash_is_a_range() {
    assert_eq!(
        kinds("50: 20-100"),
        vec![
            TokenKind::Number(50.0),
            TokenKind::Colon,
            TokenKind::Number(20.0),
            TokenKind::Dash,
            TokenKind::Number(100.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spaced_dash_and_leading_sign() {
    assert_eq!(
        kinds("-10 . +5: - -30"),
        vec![
            TokenKind::Number(-10.0),
            TokenKind::Dot,
            TokenKind::Plus,
            TokenKind::Number(5.0),
            TokenKind::Colon,
            TokenKind::Dash,
            TokenKind::Number(-30.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn words_keep_hyphens() {
    assert_eq!(
        kinds("with-exit hero-title: like a_1"),
        vec![
            word("with-exit"),
            word("hero-title"),
            TokenKind::Colon,
            word("like"),
            word("a_1"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn trailing_dot_after_number_is_separate() {
    assert_eq!(
        kinds("0."),
        vec![TokenKind::Number(0.0), TokenKind::Dot, TokenKind::Eof]
    );
}

#[test]
fn rejects_unknown_characters() {
    let err = lex("y", "0 @ 1").unwrap_err();
    assert!(err.to_string().contains("unexpected character '@'"));
}

#[test]
fn reference_ids_are_taken_verbatim() {
    assert_eq!(
        kinds("like 1a with-exit hero.title: like héro |"),
        vec![
            word("like"),
            word("1a"),
            word("with-exit"),
            word("hero.title"),
            TokenKind::Colon,
            word("like"),
            word("héro"),
            TokenKind::Pipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn reference_keyword_without_id() {
    assert_eq!(
        kinds("like |"),
        vec![word("like"), TokenKind::Pipe, TokenKind::Eof]
    );
}

#[test]
fn rejects_two_fraction_parts() {
    let err = lex("x", "1.5.3").unwrap_err();
    assert!(err.to_string().contains("invalid number '1.5.3'"), "{err}");
    assert!(lex("x", ".5.3").is_err());
}
