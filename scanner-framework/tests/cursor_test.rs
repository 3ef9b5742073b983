use pretty_assertions::assert_eq;
use scanner_framework::{Cursor, Position};

#[test]
fn test_cursor_new() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.position(), Position::new());
    assert!(!cursor.is_eof());
}

#[test]
fn test_cursor_peek() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.peek(), Some('h'));
    assert_eq!(cursor.peek_nth(1), Some('e'));
    assert_eq!(cursor.peek_nth(5), None);
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_cursor_advance() {
    let mut cursor = Cursor::new("hello");
    assert_eq!(cursor.advance(), Some('h'));
    assert_eq!(cursor.offset(), 1);
    assert_eq!(cursor.position().column, 2);
    assert_eq!(cursor.peek(), Some('e'));
}

#[test]
fn test_cursor_is_eof() {
    let mut cursor = Cursor::new("hi");
    assert!(!cursor.is_eof());
    cursor.advance();
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_cursor_empty_string() {
    let mut cursor = Cursor::new("");
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_cursor_position_tracking() {
    let mut cursor = Cursor::new("a\nb\nc");

    cursor.advance(); // 'a'
    assert_eq!(cursor.position(), Position::at(1, 2, 1));

    cursor.advance(); // '\n'
    assert_eq!(cursor.position(), Position::at(2, 1, 2));

    cursor.advance(); // 'b'
    assert_eq!(cursor.position(), Position::at(2, 2, 3));
}

#[test]
fn test_cursor_consume_while() {
    let mut cursor = Cursor::new("hello world");
    let result = cursor.consume_while(|c| c.is_alphabetic());
    assert_eq!(result, "hello");
    assert_eq!(cursor.peek(), Some(' '));
}

#[test]
fn test_cursor_consume_while_empty() {
    let mut cursor = Cursor::new("123");
    let result = cursor.consume_while(|c| c.is_alphabetic());
    assert!(result.is_empty());
    assert_eq!(cursor.peek(), Some('1'));
}

#[test]
fn test_cursor_starts_with() {
    let mut cursor = Cursor::new("/* x */");
    assert!(cursor.starts_with("/*"));
    assert!(!cursor.starts_with("*/"));
    cursor.advance_by(5);
    assert!(cursor.starts_with("*/"));
}

#[test]
fn test_cursor_peek_slice() {
    let cursor = Cursor::new("你好世界");
    assert_eq!(cursor.peek_slice(2), "你好");
    assert_eq!(cursor.peek_slice(10), "你好世界");
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_cursor_checkpoint_restore() {
    let mut cursor = Cursor::new("hello");
    cursor.advance_by(2);

    let checkpoint = cursor.checkpoint();
    assert_eq!(checkpoint.offset(), 2);

    cursor.advance_by(2);
    assert_eq!(cursor.offset(), 4);

    cursor.restore(checkpoint);
    assert_eq!(cursor.offset(), 2);
    assert_eq!(cursor.peek(), Some('l'));
}

#[test]
fn test_cursor_reset() {
    let mut cursor = Cursor::new("hello");
    cursor.advance_by(3);
    cursor.reset();

    assert_eq!(cursor.position(), Position::new());
    assert_eq!(cursor.peek(), Some('h'));
}

#[test]
fn test_cursor_remaining() {
    let mut cursor = Cursor::new("hello world");
    cursor.advance_by(6);
    assert_eq!(cursor.remaining(), "world");
}

#[test]
fn test_cursor_advance_by_beyond_eof() {
    let mut cursor = Cursor::new("hi");
    let count = cursor.advance_by(10);
    assert_eq!(count, 2);
    assert!(cursor.is_eof());
}

#[test]
fn test_cursor_seek_tracks_lines() {
    let mut cursor = Cursor::new("ab\ncd\nef");
    cursor.advance();
    cursor.seek(7);
    assert_eq!(cursor.position(), Position::at(3, 2, 7));
    assert_eq!(cursor.peek(), Some('f'));
}

#[test]
fn test_cursor_seek_matches_advance() {
    let input = "x\n你好\r\n😀 y";
    let mut stepped = Cursor::new(input);
    stepped.advance_by(input.chars().count());

    let mut sought = Cursor::new(input);
    sought.seek(input.len());

    assert_eq!(stepped.position(), sought.position());
}

#[test]
fn test_cursor_unicode_offsets_are_bytes() {
    let mut cursor = Cursor::new("你好");
    cursor.advance();
    assert_eq!(cursor.offset(), 3);
    assert_eq!(cursor.position().column, 2);
    assert_eq!(cursor.peek(), Some('好'));
}

#[test]
fn test_cursor_slices_share_buffer() {
    let mut cursor = Cursor::new("select name");
    let word = cursor.consume_while(|c| c.is_alphabetic());
    assert!(std::sync::Arc::ptr_eq(&word.buffer(), cursor.buffer()));
    assert_eq!((word.start(), word.end()), (0, 6));
}
