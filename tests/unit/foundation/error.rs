use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollcueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollcueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn cycle_lists_the_path() {
    let err = ScrollcueError::CyclicReference {
        cycle: vec!["a".to_owned(), "b".to_owned(), "a".to_owned()],
    };
    assert_eq!(err.to_string(), "cyclic reference: a -> b -> a");
}

#[test]
fn directive_names_the_element() {
    let err = ScrollcueError::Directive {
        id: "hero".to_owned(),
        source: DirectiveError::UnknownDirective {
            keyword: "spin".to_owned(),
        },
    };
    let s = err.to_string();
    assert!(s.contains("'hero'"));
    assert!(s.contains("unknown directive 'spin'"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollcueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
