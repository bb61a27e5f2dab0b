use proptest::prelude::*;
use sc::{Language, compact, strip, strip_with};

// Text without quotes or any character that can start a comment marker.
const PLAIN: &str = "[a-z0-9 \t\n=(){};.,+*]{0,200}";

fn any_language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

proptest! {
    #[test]
    fn plain_text_only_loses_blank_lines(src in PLAIN, lang in any_language()) {
        prop_assert_eq!(strip_with(&src, lang), compact(&src));
    }

    #[test]
    fn compact_is_idempotent(src in "[a-z \t\r\n]{0,200}") {
        let once = compact(&src);
        prop_assert_eq!(compact(&once), once.clone());
    }

    #[test]
    fn compact_output_has_no_blank_lines(src in "[a-z \t\n]{0,200}") {
        let out = compact(&src);
        prop_assert!(out.is_empty() || out.split('\n').all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn block_comment_bodies_never_survive(
        before in "[a-z ]{0,20}",
        body in "[a-z \n]{0,40}",
        after in "[a-z ]{0,20}",
    ) {
        let src = format!("{before}/*SECRET{body}*/{after}");
        prop_assert!(!strip(&src, Some("typescript")).contains("SECRET"));
        prop_assert!(!strip(&src, Some("css")).contains("SECRET"));
    }

    #[test]
    fn string_contents_survive_verbatim(body in "[a-z /*<!>-]{0,40}") {
        // No `"` or `\` in the body, so the string closes where it should.
        let src = format!("x = \"{body}\"");
        for lang in Language::ALL {
            prop_assert_eq!(strip_with(&src, lang), src.clone());
        }
    }

    #[test]
    fn scanning_never_panics(src in "\\PC{0,200}", lang in any_language()) {
        let _ = strip_with(&src, lang);
    }
}

#[test]
fn escaped_quote_keeps_string_open() {
    assert_eq!(strip(r#"x = "a\"b""#, Some("lua")), r#"x = "a\"b""#);
    assert_eq!(strip(r#"x = "a\"b -- c""#, Some("lua")), r#"x = "a\"b -- c""#);
}

#[test]
fn dash_comment_inside_string_is_kept() {
    assert_eq!(strip(r#"x = "a -- b""#, Some("lua")), r#"x = "a -- b""#);
}
