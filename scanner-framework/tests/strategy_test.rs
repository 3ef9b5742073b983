use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scanner_framework::{
    outcomes, run, BlockComment, Compile, Cursor, CustomIdentifier, ExtendedWhitespace,
    LineComment, PatternScanner, QuoteSpec, QuotedIdentifier, Scan, ScanOutcome, SkipThen,
    Strategy, Traced,
};

/// Mixed SQL-ish input exercising every scanner's corner cases.
const INPUT: &str = r#"[a-z0-9_ /*\-\n\r\t\[\]`"'«»é]{0,40}"#;

fn scanners() -> Vec<(&'static str, Box<dyn ScanBoth>)> {
    vec![
        entry("whitespace", ExtendedWhitespace::sql()),
        entry(
            "flat whitespace",
            ExtendedWhitespace::new()
                .with_whitespace()
                .with_line_comment(LineComment::sql())
                .with_block_comment(BlockComment::c_style()),
        ),
        entry("line comment", LineComment::sql()),
        entry("nested comment", BlockComment::sql()),
        entry("flat comment", BlockComment::c_style()),
        entry("quoted", QuotedIdentifier::sql_literal()),
        entry(
            "guillemets",
            QuotedIdentifier::with_spec(QuoteSpec::new('«', '»')),
        ),
        entry("identifier", CustomIdentifier::simple_sql()),
        entry(
            "unicode identifier",
            CustomIdentifier::new(char::is_alphabetic, char::is_alphanumeric),
        ),
        entry("pattern", pattern("[a-z]+[0-9]*")),
        entry(
            "skip then quoted",
            SkipThen::new(ExtendedWhitespace::sql(), QuotedIdentifier::sql()),
        ),
        entry(
            "traced",
            Traced::new("identifier", CustomIdentifier::simple_sql()),
        ),
    ]
}

fn entry<S>(name: &'static str, scanner: S) -> (&'static str, Box<dyn ScanBoth>)
where
    S: Scan + Compile + 'static,
{
    (name, Box::new(scanner))
}

fn pattern(source: &str) -> PatternScanner {
    PatternScanner::new(source).unwrap()
}

/// Object-safe view used to put different scanners in one list.
trait ScanBoth {
    fn both(&self, input: &str) -> (ScanOutcome, ScanOutcome);
}

impl<S: Scan + Compile> ScanBoth for S {
    fn both(&self, input: &str) -> (ScanOutcome, ScanOutcome) {
        outcomes(self, input)
    }
}

#[test]
fn test_strategy_from_str() {
    assert_eq!("interpreted".parse::<Strategy>(), Ok(Strategy::Interpreted));
    assert_eq!("compiled".parse::<Strategy>(), Ok(Strategy::Compiled));
    assert!("jit".parse::<Strategy>().is_err());
    assert_eq!(Strategy::default(), Strategy::Interpreted);
}

#[test]
fn test_run_with_each_strategy() {
    let scanner = QuotedIdentifier::sql();
    for strategy in [Strategy::Interpreted, Strategy::Compiled] {
        let mut cursor = Cursor::new("[a]]b] rest");
        let value = run(&scanner, strategy, &mut cursor).unwrap().unwrap();
        assert_eq!(value, "a]b");
        assert_eq!(cursor.offset(), 6);
    }
}

#[test]
fn test_compiled_scanner_is_reusable() {
    let compiled = BlockComment::sql().compile();
    let mut cursor = Cursor::new("/* a *//* b */x");

    assert_eq!(compiled.scan(&mut cursor).unwrap().unwrap(), "/* a */");
    assert_eq!(compiled.scan(&mut cursor).unwrap().unwrap(), "/* b */");
    assert_eq!(compiled.scan(&mut cursor).unwrap(), None);
    assert_eq!(cursor.peek(), Some('x'));
}

#[test]
fn test_compiled_scanner_keeps_expected_chars() {
    let scanner = CustomIdentifier::simple_sql();
    let compiled = scanner.compile();
    assert_eq!(compiled.expected_chars(), scanner.expected_chars());

    let traced = Traced::new("quoted", QuotedIdentifier::sql());
    assert_eq!(traced.name(), "quoted");
    assert_eq!(
        traced.compile().expected_chars(),
        QuotedIdentifier::sql().expected_chars()
    );
}

#[test]
fn test_strategies_agree_on_known_inputs() {
    let inputs = [
        "",
        "   ",
        "-- c\r\n",
        "/* a /* b */ c */ d",
        "/* a /* b */",
        "/*/**/*/",
        "/*",
        "[abc]]def]",
        "[[abc]]]]def]",
        "```abc````def```",
        "''",
        "[a",
        "'it''s' x",
        "«a»»b»",
        "_name1 rest",
        "été2 x",
        "test12345 dummy",
        "  [x] y",
        "  123",
    ];

    for (name, scanner) in scanners() {
        for input in inputs {
            let (interpreted, compiled) = scanner.both(input);
            assert_eq!(interpreted, compiled, "{name} on {input:?}");
        }
    }
}

proptest! {
    #[test]
    fn test_strategies_agree_on_arbitrary_input(input in INPUT) {
        for (name, scanner) in scanners() {
            let (interpreted, compiled) = scanner.both(&input);
            prop_assert_eq!(interpreted, compiled, "{} on {:?}", name, input);
        }
    }

    #[test]
    fn test_no_match_leaves_cursor_in_place(input in INPUT) {
        let scanner = SkipThen::new(ExtendedWhitespace::sql(), CustomIdentifier::simple_sql());
        let mut cursor = Cursor::new(input.as_str());
        if let Ok(None) = scanner.scan(&mut cursor) {
            prop_assert_eq!(cursor.offset(), 0);
        }
    }
}
