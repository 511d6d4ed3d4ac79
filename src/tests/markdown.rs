use crate::formats::markdown::{plain_text, strip_closing_sequence};

#[test]
fn test_plain_text_passthrough() {
    assert_eq!(plain_text("Hello, World! 2024").unwrap(), "Hello, World! 2024");
}

#[test]
fn test_plain_text_drops_emphasis() {
    assert_eq!(plain_text("**Bold** Section").unwrap(), "Bold Section");
}

#[test]
fn test_plain_text_keeps_link_text() {
    assert_eq!(
        plain_text("See [the guide](guide.md)").unwrap(),
        "See the guide"
    );
}

#[test]
fn test_plain_text_decodes_character_references() {
    assert_eq!(plain_text("AT&amp;T rules").unwrap(), "AT&T rules");
    assert_eq!(plain_text("AT&#38;T rules").unwrap(), "AT&T rules");
    assert_eq!(plain_text("Fish &#x26; Chips").unwrap(), "Fish & Chips");
}

#[test]
fn test_plain_text_unwraps_autolinks() {
    assert_eq!(
        plain_text("<http://a.b> link").unwrap(),
        "http://a.b link"
    );
    assert_eq!(
        plain_text("Mail <team@example.com>").unwrap(),
        "Mail team@example.com"
    );
}

#[test]
fn test_plain_text_keeps_escaped_characters() {
    assert_eq!(plain_text(r"1\. Not a list").unwrap(), "1. Not a list");
}

#[test]
fn test_strip_closing_sequence() {
    assert_eq!(strip_closing_sequence("Title ##"), "Title");
    assert_eq!(strip_closing_sequence("C#"), "C#");
    assert_eq!(strip_closing_sequence("Title"), "Title");
}
