//! Input tokenizer.
//!
//! Splits a line into whitespace-separated tokens, keeping `@(multi word)`
//! and `#(multi word)[/Section]` references together. The `{deadline}`
//! block is blanked out of the line before tokenizing, so token spans index
//! the text exactly as typed.

use once_cell::sync::Lazy;
use regex::Regex;

static DEADLINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^}]+)\}").unwrap_or_else(|e| panic!("Invalid deadline regex: {e}"))
});

/// One token and its byte range in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text exactly as typed.
    pub text: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// A line with its deadline block blanked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLine {
    /// The input with every `{...}` block replaced by spaces of the same
    /// byte length.
    pub line: String,
    /// Trimmed text of the first `{...}` block.
    pub deadline: Option<String>,
}

/// Tokenize a line.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(skip) = input[pos..].find(|c: char| !c.is_whitespace()) {
        let start = pos + skip;
        let end = wrapped_end(input, start).unwrap_or_else(|| word_end(input, start));
        tokens.push(Token {
            text: input[start..end].to_string(),
            start,
            end,
        });
        pos = end;
    }
    tokens
}

fn word_end(input: &str, start: usize) -> usize {
    input[start..]
        .find(char::is_whitespace)
        .map_or(input.len(), |i| start + i)
}

/// End of a `@(...)` or `#(...)` reference starting at `start`, including a
/// `/Section` tail. `None` when the parens do not balance.
fn wrapped_end(input: &str, start: usize) -> Option<usize> {
    let rest = &input[start..];
    if !(rest.starts_with("@(") || rest.starts_with("#(")) {
        return None;
    }
    let close = matching_paren(&rest[1..])?;
    if close == 1 {
        return None;
    }
    let after = start + 1 + close + 1;
    if input[after..].starts_with('/') {
        Some(word_end(input, after))
    } else {
        Some(after)
    }
}

/// Byte index of the `)` closing the `(` that `text` starts with.
pub(crate) fn matching_paren(text: &str) -> Option<usize> {
    if !text.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 1 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Blank the `{deadline}` block out of the line.
///
/// Every `{...}` block is blanked; the first one provides the deadline text.
#[must_use]
pub fn extract_deadline(input: &str) -> ExtractedLine {
    let Some(caps) = DEADLINE_PATTERN.captures(input) else {
        return ExtractedLine {
            line: input.to_string(),
            deadline: None,
        };
    };

    let deadline = caps
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty());
    let blanked = DEADLINE_PATTERN.replace_all(input, |caps: &regex::Captures<'_>| {
        " ".repeat(caps[0].len())
    });

    ExtractedLine {
        line: blanked.into_owned(),
        deadline,
    }
}

/// Trim and collapse runs of spaces into one.
#[must_use]
pub fn collapse_spaces(text: &str) -> String {
    let mut out = text.trim().to_string();
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(texts("hello world"), vec!["hello", "world"]);
    }

    #[test]
    fn test_wrapped_references_stay_whole() {
        assert_eq!(
            texts("task @(my label) #(My Project)"),
            vec!["task", "@(my label)", "#(My Project)"]
        );
    }

    #[test]
    fn test_wrapped_project_with_section() {
        assert_eq!(
            texts("call #(Home Stuff)/Calls now"),
            vec!["call", "#(Home Stuff)/Calls", "now"]
        );
    }

    #[test]
    fn test_nested_parens_stay_whole() {
        assert_eq!(
            texts("walk @(errands (home)) now"),
            vec!["walk", "@(errands (home))", "now"]
        );
        assert_eq!(
            texts("#(Side (old) Jobs)/Calls x"),
            vec!["#(Side (old) Jobs)/Calls", "x"]
        );
    }

    #[test]
    fn test_mixed_input() {
        assert_eq!(
            texts("buy milk @groceries #Shopping due:7d p1"),
            vec!["buy", "milk", "@groceries", "#Shopping", "due:7d", "p1"]
        );
    }

    #[test]
    fn test_unclosed_paren_falls_back_to_words() {
        assert_eq!(texts("@(broken label"), vec!["@(broken", "label"]);
        assert_eq!(texts("@(a (b c"), vec!["@(a", "(b", "c"]);
    }

    #[test]
    fn test_empty_parens_are_a_word() {
        assert_eq!(texts("@() x"), vec!["@()", "x"]);
    }

    #[test]
    fn test_token_spans() {
        let tokens = tokenize("a  @(b c) d");
        assert_eq!((tokens[1].start, tokens[1].end), (3, 9));
        assert_eq!(tokens[2].start, 10);
    }

    #[test]
    fn test_matching_paren() {
        assert_eq!(matching_paren("(a)"), Some(2));
        assert_eq!(matching_paren("(a (b) c)/S"), Some(8));
        assert_eq!(matching_paren("(a (b c"), None);
        assert_eq!(matching_paren("a)"), None);
    }

    #[test]
    fn test_extract_deadline() {
        let input = "buy groceries {2025-06-30} #Work";
        let extracted = extract_deadline(input);
        assert_eq!(extracted.deadline.as_deref(), Some("2025-06-30"));
        assert_eq!(extracted.line.len(), input.len());
        assert_eq!(texts(&extracted.line), vec!["buy", "groceries", "#Work"]);
        assert_eq!(collapse_spaces(&extracted.line), "buy groceries #Work");
    }

    #[test]
    fn test_extract_deadline_keeps_offsets() {
        let input = "report {fr\u{e4}h} #shop";
        let extracted = extract_deadline(input);
        let tokens = tokenize(&extracted.line);
        assert_eq!(&input[tokens[1].start..tokens[1].end], "#shop");
    }

    #[test]
    fn test_extract_deadline_trims_inner_text() {
        let extracted = extract_deadline("report { next friday }");
        assert_eq!(collapse_spaces(&extracted.line), "report");
        assert_eq!(extracted.deadline.as_deref(), Some("next friday"));
    }

    #[test]
    fn test_no_deadline_leaves_line_untouched() {
        let extracted = extract_deadline("  spaced  out ");
        assert_eq!(extracted.line, "  spaced  out ");
        assert!(extracted.deadline.is_none());
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("  a   b  c "), "a b c");
    }
}
