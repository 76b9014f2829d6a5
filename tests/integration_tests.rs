use rpal_ast::cli::{self, CliError, Invocation, UsageError, execute_ast, parse_file};
use rpal_ast::{LineSource, ParseError, ReaderSource, output::to_json, parse_str};
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn source_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_args(args: &[&str]) -> Result<String, CliError> {
    let invocation = Invocation::from_args(args)?;
    let mut out = Vec::new();
    cli::run(&invocation, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// ============================================================================
// Argument shapes
// ============================================================================

#[test]
fn test_no_arguments_does_nothing() {
    let no_args: [&str; 0] = [];
    assert_eq!(Invocation::from_args(&no_args), Ok(Invocation::Nothing));
    assert_eq!(run_args(&[]).unwrap(), "");
}

#[test]
fn test_listing_switch_is_inert() {
    for switch in ["-l", "-L"] {
        assert_eq!(Invocation::from_args(&[switch]), Ok(Invocation::Listing));
        assert_eq!(run_args(&[switch]).unwrap(), "");
    }
}

#[test]
fn test_ast_without_file() {
    for switch in ["-ast", "-AST", "-Ast"] {
        assert_eq!(
            Invocation::from_args(&[switch]),
            Err(UsageError::MissingFileName)
        );
    }
}

#[test]
fn test_unknown_switch() {
    assert_eq!(
        Invocation::from_args(&["-x"]),
        Err(UsageError::UnidentifiedSwitch("-x".to_string()))
    );
}

#[test]
fn test_illegal_shapes() {
    let test_cases: Vec<Vec<&str>> = vec![
        vec!["-l", "file.rpal"],
        vec!["file.rpal", "-ast"],
        vec!["-ast", "a", "b"],
        vec!["-ast", "a", "b", "c"],
    ];

    for args in test_cases {
        assert_eq!(
            Invocation::from_args(args.as_slice()),
            Err(UsageError::IllegalParameters),
            "Failed for args: {:?}",
            args
        );
    }
}

#[test]
fn test_ast_with_file() {
    assert_eq!(
        Invocation::from_args(&["-AST", "prog.rpal"]),
        Ok(Invocation::Ast(PathBuf::from("prog.rpal")))
    );
}

#[test]
fn test_usage_messages() {
    let err: CliError = UsageError::MissingFileName.into();
    assert_eq!(err.to_string(), "Error: FILE_NAME expected");
    let err: CliError = UsageError::IllegalParameters.into();
    assert_eq!(err.to_string(), "Error: Illegal parameters");
}

// ============================================================================
// The -ast pipeline
// ============================================================================

#[test]
fn test_ast_pipeline_prints_preorder() {
    let file = source_file("let x = 1 in x\n");
    let path = file.path().to_str().unwrap();

    let output = run_args(&["-ast", path]).unwrap();
    assert_eq!(output, "let\n.=\n..<ID:x>\n..<INT:1>\n.<ID:x>\n");
}

#[test]
fn test_ast_pipeline_crlf_file() {
    let file = source_file("let f x =\r\n  x + 1\r\nin f 2\r\n");

    let mut out = Vec::new();
    execute_ast(file.path(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "let\n.function_form\n..<ID:f>\n..<ID:x>\n..+\n...<ID:x>\n...<INT:1>\n.gamma\n..<ID:f>\n..<INT:2>\n"
    );
}

#[test]
fn test_syntax_error_prints_nothing() {
    let file = source_file("let x = in x\n");

    let mut out = Vec::new();
    let err = execute_ast(file.path(), &mut out).unwrap_err();
    assert!(out.is_empty());
    match &err {
        CliError::Parse(ParseError::ExpectedOperand { found, .. }) => assert_eq!(found, "in"),
        other => panic!("Expected syntax error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Syntax error:"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.rpal");

    let mut out = Vec::new();
    match execute_ast(&path, &mut out) {
        Err(CliError::SourceUnavailable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected SourceUnavailable, got {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn test_unreadable_bytes_are_not_a_syntax_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"let x = 1 // caf\xe9\nin x\n").unwrap();
    file.flush().unwrap();

    let mut out = Vec::new();
    let err = execute_ast(file.path(), &mut out).unwrap_err();
    assert!(out.is_empty());
    match &err {
        CliError::SourceUnavailable { path, source } => {
            assert_eq!(path, file.path());
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("Expected SourceUnavailable, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Error: cannot read"), "{}", err);
}

#[test]
fn test_parse_file_matches_parse_str() {
    let text = "let rec fact n = n eq 0 -> 1 | n * fact (n - 1)\nin Print (fact 5)\n";
    let file = source_file(text);

    let from_file = parse_file(file.path()).unwrap();
    let from_str = parse_str(text).unwrap();
    assert_eq!(from_file, from_str);
}

#[test]
fn test_reader_source_released_at_end() {
    let file = source_file("x\n");
    let mut source = ReaderSource::open(file.path()).unwrap();
    assert_eq!(source.next_line().unwrap().as_deref(), Some("x"));
    assert!(source.is_open());
    assert_eq!(source.next_line().unwrap(), None);
    assert!(!source.is_open());
}

// ============================================================================
// JSON export
// ============================================================================

#[test]
fn test_json_export() {
    let node = parse_str("f 1").unwrap();
    assert_eq!(
        to_json(&node),
        serde_json::json!({
            "label": "gamma",
            "children": [
                { "label": "<ID:f>", "children": [] },
                { "label": "<INT:1>", "children": [] }
            ]
        })
    );
}

#[test]
fn test_json_pretty_parses_back() {
    let node = parse_str("a, b").unwrap();
    let pretty = rpal_ast::to_json_pretty(&node);
    assert!(pretty.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(value, to_json(&node));
}
