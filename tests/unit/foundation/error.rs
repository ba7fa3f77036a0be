use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScriptError::tool("x")
            .to_string()
            .contains("image tool error:")
    );
    assert!(
        ScriptError::UndefinedVariable("X".to_string())
            .to_string()
            .contains("undefined variable 'X'")
    );
    assert!(
        ScriptError::UnknownImage("bg".to_string())
            .to_string()
            .contains("unknown img: 'bg'")
    );
    assert!(
        ScriptError::NotAnInteger("ten".to_string())
            .to_string()
            .contains("'ten'")
    );
}

#[test]
fn at_line_prefixes_and_unwraps() {
    let err = ScriptError::InvalidArgumentCount {
        command: "range",
        expected: 4,
        found: 3,
    }
    .at_line(7);

    assert_eq!(err.line(), Some(7));
    assert!(err.to_string().starts_with("line 7:"));
    assert!(matches!(
        err.root(),
        ScriptError::InvalidArgumentCount { found: 3, .. }
    ));
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn line_context_is_reported_once_in_an_error_chain() {
    let err = ScriptError::NotAnInteger("ten".to_string()).at_line(1);
    let chain = anyhow::Error::new(err).context("parse script");

    let messages: Vec<String> = chain.chain().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        ["parse script", "line 1: expected 'ten' to be an integer"]
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScriptError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.line(), None);
}
