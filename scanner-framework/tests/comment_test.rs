use pretty_assertions::assert_eq;
use scanner_framework::{
    outcomes, BlockComment, Compile, ConfigError, Cursor, LineComment, Position, Scan,
    ScanError, ScanOutcome,
};

/// Runs both strategies and checks they agree.
fn scan_both<S: Scan + Compile>(scanner: &S, input: &str) -> ScanOutcome {
    let (interpreted, compiled) = outcomes(scanner, input);
    assert_eq!(interpreted, compiled, "strategies disagree on {input:?}");
    interpreted
}

fn matched(span: &str, line: usize, column: usize, offset: usize) -> ScanOutcome {
    ScanOutcome::Success {
        span: span.into(),
        end: Position::at(line, column, offset),
    }
}

fn missing_end(line: usize, column: usize, offset: usize) -> ScanOutcome {
    ScanOutcome::Malformed(ScanError::MissingEndComment {
        marker: "*/".to_string(),
        position: Position::at(line, column, offset),
    })
}

#[test]
fn test_line_comment_to_end_of_input() {
    let outcome = scan_both(&LineComment::sql(), "-- single line comment");
    assert_eq!(outcome, matched("-- single line comment", 1, 23, 22));
}

#[test]
fn test_line_comment_consumes_terminator() {
    let outcome = scan_both(&LineComment::sql(), "-- abc\nrest");
    assert_eq!(outcome, matched("-- abc\n", 2, 1, 7));
}

#[test]
fn test_line_comment_consumes_only_one_terminator_char() {
    let mut cursor = Cursor::new("-- abc\r\nrest");
    let comment = LineComment::sql().read(&mut cursor).unwrap();
    assert_eq!(comment, "-- abc\r");
    assert_eq!(cursor.peek(), Some('\n'));

    let outcome = scan_both(&LineComment::sql(), "-- abc\u{b}x");
    assert_eq!(outcome, matched("-- abc\u{b}", 1, 8, 7));
}

#[test]
fn test_line_comment_no_match() {
    assert_eq!(scan_both(&LineComment::sql(), "- abc"), ScanOutcome::NoMatch);
    assert_eq!(scan_both(&LineComment::sql(), ""), ScanOutcome::NoMatch);
    assert_eq!(scan_both(&LineComment::sql(), " -- abc"), ScanOutcome::NoMatch);
}

#[test]
fn test_line_comment_start_variants() {
    let hash = LineComment::with_char('#');
    assert_eq!(scan_both(&hash, "# note\nx"), matched("# note\n", 2, 1, 7));

    let slashes = LineComment::new("//");
    assert_eq!(scan_both(&slashes, "// a"), matched("// a", 1, 5, 4));
    assert_eq!(scan_both(&slashes, "/ a"), ScanOutcome::NoMatch);

    let rem = LineComment::with_predicate(|cursor: &Cursor| {
        cursor.peek_slice(3).eq_ignore_ascii_case("rem")
    });
    assert_eq!(scan_both(&rem, "REM old\nnew"), matched("REM old\n", 2, 1, 8));
    assert_eq!(scan_both(&rem, "remark"), matched("remark", 1, 7, 6));
    assert_eq!(scan_both(&rem, "re"), ScanOutcome::NoMatch);
}

#[test]
fn test_block_comment_simple() {
    let outcome = scan_both(&BlockComment::sql(), "/* abc */ rest");
    assert_eq!(outcome, matched("/* abc */", 1, 10, 9));

    let outcome = scan_both(&BlockComment::c_style(), "/* abc */ rest");
    assert_eq!(outcome, matched("/* abc */", 1, 10, 9));
}

#[test]
fn test_block_comment_multi_line() {
    let input = "/* multi\nline\ncomment */";
    let outcome = scan_both(&BlockComment::sql(), input);
    assert_eq!(outcome, matched(input, 3, 11, 24));
}

#[test]
fn test_nested_block_comment() {
    let input = "/* first \n comment /* nested\ncomment */ */";
    let outcome = scan_both(&BlockComment::sql(), input);
    assert_eq!(outcome, matched(input, 3, 14, input.len()));

    let outcome = scan_both(&BlockComment::sql(), "/*/**/*/ x");
    assert_eq!(outcome, matched("/*/**/*/", 1, 9, 8));

    let outcome = scan_both(&BlockComment::sql(), "/* abc /* nested */*/");
    assert_eq!(outcome, matched("/* abc /* nested */*/", 1, 22, 21));
}

#[test]
fn test_nested_block_comment_unbalanced() {
    assert_eq!(scan_both(&BlockComment::sql(), "/*/**/"), missing_end(1, 7, 6));
    assert_eq!(scan_both(&BlockComment::sql(), "/* abc"), missing_end(1, 7, 6));

    let input = "/* first multi line comment\n /* nested */";
    assert_eq!(scan_both(&BlockComment::sql(), input), missing_end(2, 14, 41));
}

#[test]
fn test_opener_at_end_of_input() {
    assert_eq!(scan_both(&BlockComment::sql(), "/*"), missing_end(1, 3, 2));
    assert_eq!(scan_both(&BlockComment::c_style(), "/*"), missing_end(1, 3, 2));
}

#[test]
fn test_flat_block_comment_rejects_second_opener() {
    let flat = BlockComment::c_style();

    assert_eq!(scan_both(&flat, "/* abc /* nested */*/"), missing_end(1, 8, 7));
    assert_eq!(scan_both(&flat, "/*/**/*/"), missing_end(1, 3, 2));

    let input = "/* first multi line comment\n /* nested */";
    assert_eq!(scan_both(&flat, input), missing_end(2, 2, 29));
}

#[test]
fn test_flat_block_comment_unterminated() {
    assert_eq!(
        scan_both(&BlockComment::c_style(), "/* abc\n"),
        missing_end(2, 1, 7)
    );
}

#[test]
fn test_block_comment_stray_marks() {
    let outcome = scan_both(&BlockComment::c_style(), "/* a * / b **/ x");
    assert_eq!(outcome, matched("/* a * / b **/", 1, 15, 14));

    assert_eq!(scan_both(&BlockComment::sql(), "*/"), ScanOutcome::NoMatch);
    assert_eq!(scan_both(&BlockComment::sql(), "/ *"), ScanOutcome::NoMatch);
}

#[test]
fn test_block_comment_custom_marks() {
    let pascal = BlockComment::new("(*", "*)", true).unwrap();
    let outcome = scan_both(&pascal, "(* a (* b *) *) x");
    assert_eq!(outcome, matched("(* a (* b *) *)", 1, 16, 15));

    let outcome = scan_both(&pascal, "(* a");
    assert_eq!(
        outcome,
        ScanOutcome::Malformed(ScanError::MissingEndComment {
            marker: "*)".to_string(),
            position: Position::at(1, 5, 4),
        })
    );
}

#[test]
fn test_block_comment_unicode_body() {
    let input = "/* 注释 😀 */";
    let outcome = scan_both(&BlockComment::sql(), input);
    assert_eq!(outcome, matched(input, 1, 11, input.len()));
}

#[test]
fn test_block_comment_rejects_empty_marks() {
    assert!(matches!(
        BlockComment::new("", "*/", true),
        Err(ConfigError::EmptyCommentMark)
    ));
    assert!(matches!(
        BlockComment::new("/*", "", false),
        Err(ConfigError::EmptyCommentMark)
    ));
}

#[test]
fn test_missing_end_message() {
    let mut cursor = Cursor::new("/* abc");
    let err = BlockComment::sql().read(&mut cursor).unwrap_err();
    assert_eq!(err.message(), "Missing end comment mark '*/'.");
    assert_eq!(err.position().offset, 6);
    assert_eq!(cursor.offset(), 6);
}

#[test]
fn test_skip_reports_match() {
    let mut cursor = Cursor::new("/**/x");
    assert!(BlockComment::sql().skip(&mut cursor).unwrap());
    assert_eq!(cursor.peek(), Some('x'));
    assert!(!BlockComment::sql().skip(&mut cursor).unwrap());
    assert_eq!(cursor.offset(), 4);

    assert!(!LineComment::sql().skip(&mut cursor));
}
