use crate::HEADER;
use crate::parser::line::{is_blank, strip_comment};

/// Whether instruction processing may begin. One-way: once the header has
/// been accepted there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    AwaitingHeader,
    InBody,
}

/// A header line is the marker, case-insensitively, optionally surrounded
/// by whitespace and optionally followed by a comment.
pub fn is_header(text: &str) -> bool {
    let (code, _) = strip_comment(text);
    code.trim_matches(is_blank).eq_ignore_ascii_case(HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_case() {
        assert!(is_header(".IPPcode23"));
        assert!(is_header(".ippcode23"));
        assert!(is_header(".IPPCODE23"));
        assert!(is_header(".IppCode23"));
    }

    #[test]
    fn accepts_surrounding_whitespace_and_comment() {
        assert!(is_header("   .IppCode23   # note"));
        assert!(is_header("\t.IPPcode23\r"));
        assert!(is_header(".IPPcode23#tight"));
    }

    #[test]
    fn rejects_other_markers() {
        assert!(!is_header(".IPPcode24"));
        assert!(!is_header("IPPcode23"));
        assert!(!is_header("xIPPcode23"));
        assert!(!is_header(".IPPcode23 extra"));
        assert!(!is_header(""));
    }
}
