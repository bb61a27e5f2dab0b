use std::collections::BTreeMap;

use serde::Serialize;

/// Lexical delimiters for one language.
///
/// An empty marker disables that kind of comment for the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyntaxConfig {
    pub single_line_comment: &'static str,
    pub block_comment_start: &'static str,
    pub block_comment_end: &'static str,
    pub string_delimiters: &'static [char],
    /// `[[` / `]]` are copied through as a pair (Lua long brackets).
    pub long_brackets: bool,
}

const LUA: SyntaxConfig = SyntaxConfig {
    single_line_comment: "--",
    block_comment_start: "--[[",
    block_comment_end: "]]",
    string_delimiters: &['"', '\'', '`'],
    long_brackets: true,
};

const TYPESCRIPT: SyntaxConfig = SyntaxConfig {
    single_line_comment: "//",
    block_comment_start: "/*",
    block_comment_end: "*/",
    string_delimiters: &['"', '\'', '`'],
    long_brackets: false,
};

const HTML: SyntaxConfig = SyntaxConfig {
    single_line_comment: "",
    block_comment_start: "<!--",
    block_comment_end: "-->",
    string_delimiters: &['"', '\''],
    long_brackets: false,
};

const CSS: SyntaxConfig = SyntaxConfig {
    single_line_comment: "",
    block_comment_start: "/*",
    block_comment_end: "*/",
    string_delimiters: &['"', '\''],
    long_brackets: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Lua,
    TypeScript,
    Html,
    Css,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Lua,
        Language::TypeScript,
        Language::Html,
        Language::Css,
    ];

    /// Resolve a language id, falling back to [`Language::Lua`] when the id
    /// is missing or unknown. This never fails.
    pub fn resolve(id: Option<&str>) -> Language {
        id.and_then(Language::from_id).unwrap_or_default()
    }

    /// Exact (case-insensitive) id lookup, without the fallback.
    pub fn from_id(id: &str) -> Option<Language> {
        match id.trim().to_ascii_lowercase().as_str() {
            "lua" => Some(Language::Lua),
            "typescript" | "ts" | "javascript" | "js" => Some(Language::TypeScript),
            "html" | "htm" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// Map a file extension (without the dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_ascii_lowercase().as_str() {
            "lua" => Some(Language::Lua),
            "ts" | "tsx" | "mts" | "cts" | "js" | "jsx" | "mjs" | "cjs" => {
                Some(Language::TypeScript)
            }
            "html" | "htm" | "xhtml" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// Every extension [`Language::from_extension`] recognises.
    pub fn known_extensions() -> &'static [&'static str] {
        &[
            "lua", "ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs", "html", "htm", "xhtml",
            "css",
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            Language::Lua => "lua",
            Language::TypeScript => "typescript",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    pub fn syntax(self) -> &'static SyntaxConfig {
        match self {
            Language::Lua => &LUA,
            Language::TypeScript => &TYPESCRIPT,
            Language::Html => &HTML,
            Language::Css => &CSS,
        }
    }
}

/// The full registry keyed by language id, e.g. for `--list-languages`.
pub fn registry() -> BTreeMap<&'static str, &'static SyntaxConfig> {
    Language::ALL
        .iter()
        .map(|lang| (lang.id(), lang.syntax()))
        .collect()
}
