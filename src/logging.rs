//! Line-level removal of logging calls (`print(...)`, `console.log(...)`).
//!
//! This is a coarse filter: any line that mentions a known call name followed
//! by a parenthesised argument list on the same line is dropped in full. It
//! cannot tell a real call from one inside a string or comment, and a name
//! that merely ends in a call name (`myprint(x)`) matches as well.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::Language;

static LOG_PATTERNS: Lazy<HashMap<Language, Regex>> = Lazy::new(|| {
    Language::ALL
        .iter()
        .filter_map(|&lang| {
            let names = log_functions(lang);
            if names.is_empty() {
                return None;
            }
            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?m)^.*({alternation})\(.*\).*\n?");
            let regex = Regex::new(&pattern).expect("logging pattern is built from escaped names");
            Some((lang, regex))
        })
        .collect()
});

/// Known logging call names per language.
pub fn log_functions(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::Lua => &["print", "warn", "error"],
        Language::TypeScript => &["console.log", "console.warn", "console.error"],
        Language::Html | Language::Css => &[],
    }
}

/// Remove every line containing a logging call for the given language id.
///
/// A missing id means Lua. An unknown id, or a language without logging
/// calls, gets its input back as is.
pub fn remove_logging_statements(input: &str, id: Option<&str>) -> String {
    let lang = match id {
        None => Language::default(),
        Some(id) => match Language::from_id(id) {
            Some(lang) => lang,
            None => return input.to_string(),
        },
    };
    remove_logging_for(input, lang)
}

pub fn remove_logging_for(input: &str, lang: Language) -> String {
    match LOG_PATTERNS.get(&lang) {
        Some(regex) => regex.replace_all(input, "").into_owned(),
        None => input.to_string(),
    }
}
