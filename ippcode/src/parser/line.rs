use std::ops::Range;

/// Characters that separate tokens. Matches ASCII `\s`: no Unicode spaces.
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// A whitespace-delimited token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of the token within its line.
    pub start: usize,
}

impl Token<'_> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// Split a line at its first `#`.
///
/// Returns the code before the comment and the byte position of the `#`,
/// if there was one. Purely textual: a `#` is a comment marker wherever it
/// appears, including in what would have been a string operand.
pub fn strip_comment(text: &str) -> (&str, Option<usize>) {
    match text.find('#') {
        Some(pos) => (&text[..pos], Some(pos)),
        None => (text, None),
    }
}

/// Split code on runs of whitespace, dropping empty tokens.
pub fn tokenize(code: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in code.char_indices() {
        match (is_blank(c), start) {
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &code[s..i],
                    start: s,
                });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &code[s..],
            start: s,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(code: &str) -> Vec<&str> {
        tokenize(code).iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(texts("  MOVE \t GF@x   int@5 "), vec!["MOVE", "GF@x", "int@5"]);
    }

    #[test]
    fn blank_code_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\x0B\x0C ").is_empty());
    }

    #[test]
    fn token_spans_point_into_the_line() {
        let tokens = tokenize("  ADD  GF@a");
        assert_eq!(tokens[0].span(), 2..5);
        assert_eq!(tokens[1].span(), 7..11);
    }

    #[test]
    fn strips_at_first_hash() {
        assert_eq!(strip_comment("WRITE string@a#b # c"), ("WRITE string@a", Some(14)));
        assert_eq!(strip_comment("BREAK"), ("BREAK", None));
        assert_eq!(strip_comment("   # only a comment"), ("   ", Some(3)));
    }

    #[test]
    fn unicode_spaces_are_not_separators() {
        assert_eq!(texts("string@a\u{a0}b"), vec!["string@a\u{a0}b"]);
    }
}
