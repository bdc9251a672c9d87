use std::fmt;

use crate::instruction::signature::ArgClass;
use crate::parser::line::is_blank;
use crate::xml::escape;

/// The lexical kind of an operand. Determined solely by which pattern the
/// whole token matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Variable,
    Integer,
    Boolean,
    String,
    Nil,
    Label,
    Type,
}

impl OperandKind {
    /// The name written to the `type` attribute.
    pub fn xml_name(self) -> &'static str {
        match self {
            OperandKind::Variable => "var",
            OperandKind::Integer => "int",
            OperandKind::Boolean => "bool",
            OperandKind::String => "string",
            OperandKind::Nil => "nil",
            OperandKind::Label => "label",
            OperandKind::Type => "type",
        }
    }

    /// Whether the whole token matches this kind's pattern.
    pub fn matches(self, token: &str) -> bool {
        match self {
            OperandKind::Variable => is_variable(token),
            OperandKind::Integer => is_integer(token),
            OperandKind::Boolean => matches!(token, "bool@true" | "bool@false"),
            OperandKind::String => is_string(token),
            OperandKind::Nil => token == "nil@nil",
            OperandKind::Label => is_identifier(token),
            OperandKind::Type => matches!(token, "int" | "string" | "bool"),
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}

/// A classified operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub kind: OperandKind,
    /// The token as written in the source.
    pub raw: String,
    /// The payload written to the XML, already escaped where needed.
    pub value: String,
}

impl Operand {
    fn new(kind: OperandKind, raw: &str) -> Self {
        let value = match kind {
            OperandKind::Variable | OperandKind::Label => escape(raw),
            OperandKind::String => escape(after_at(raw)),
            OperandKind::Integer | OperandKind::Boolean | OperandKind::Nil => {
                after_at(raw).to_string()
            }
            OperandKind::Type => raw.to_string(),
        };
        Operand {
            kind,
            raw: raw.to_string(),
            value,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Classify a token for a position of the given class.
///
/// The class's candidate kinds are tried in order and the first whole-token
/// match wins. Returns `None` if nothing matches.
pub fn classify(token: &str, class: ArgClass) -> Option<Operand> {
    class
        .candidates()
        .iter()
        .copied()
        .find(|kind| kind.matches(token))
        .map(|kind| Operand::new(kind, token))
}

fn after_at(token: &str) -> &str {
    token.split_once('@').map_or(token, |(_, rest)| rest)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => {
            chars.all(|c| is_identifier_start(c) || c.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_variable(token: &str) -> bool {
    match token.split_once('@') {
        Some((frame, name)) => matches!(frame, "GF" | "LF" | "TF") && is_identifier(name),
        None => false,
    }
}

fn is_integer(token: &str) -> bool {
    let Some(digits) = token.strip_prefix("int@") else {
        return false;
    };
    let digits = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_string(token: &str) -> bool {
    let Some(content) = token.strip_prefix("string@") else {
        return false;
    };
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.by_ref().take(3).filter(|d| d.is_ascii_digit()).count();
                if escaped != 3 {
                    return false;
                }
            }
            '#' => return false,
            c if is_blank(c) => return false,
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(token: &str) -> Option<(OperandKind, String)> {
        classify(token, ArgClass::Symbol).map(|op| (op.kind, op.value))
    }

    #[test]
    fn variables_keep_frame_prefix() {
        assert_eq!(symbol("GF@x"), Some((OperandKind::Variable, "GF@x".into())));
        assert_eq!(symbol("LF@_tmp-1"), Some((OperandKind::Variable, "LF@_tmp-1".into())));
        assert_eq!(symbol("TF@$&%*!?"), Some((OperandKind::Variable, "TF@$&amp;%*!?".into())));
    }

    #[test]
    fn rejects_malformed_variables() {
        assert!(classify("gf@x", ArgClass::Variable).is_none());
        assert!(classify("GF@1x", ArgClass::Variable).is_none());
        assert!(classify("GF@", ArgClass::Variable).is_none());
        assert!(classify("XF@x", ArgClass::Variable).is_none());
        assert!(classify("GF@a@b", ArgClass::Variable).is_none());
        assert!(classify("int@5", ArgClass::Variable).is_none());
    }

    #[test]
    fn integers() {
        assert_eq!(symbol("int@5"), Some((OperandKind::Integer, "5".into())));
        assert_eq!(symbol("int@-42"), Some((OperandKind::Integer, "-42".into())));
        assert_eq!(symbol("int@+007"), Some((OperandKind::Integer, "+007".into())));
        assert!(symbol("int@").is_none());
        assert!(symbol("int@+").is_none());
        assert!(symbol("int@0x1F").is_none());
        assert!(symbol("int@1.5").is_none());
    }

    #[test]
    fn booleans_and_nil() {
        assert_eq!(symbol("bool@true"), Some((OperandKind::Boolean, "true".into())));
        assert_eq!(symbol("bool@false"), Some((OperandKind::Boolean, "false".into())));
        assert!(symbol("bool@TRUE").is_none());
        assert_eq!(symbol("nil@nil"), Some((OperandKind::Nil, "nil".into())));
        assert!(symbol("nil@").is_none());
        assert!(symbol("nil@null").is_none());
    }

    #[test]
    fn strings_keep_escape_sequences() {
        assert_eq!(symbol("string@a\\035b"), Some((OperandKind::String, "a\\035b".into())));
        assert_eq!(symbol("string@"), Some((OperandKind::String, String::new())));
        assert_eq!(symbol("string@a@b"), Some((OperandKind::String, "a@b".into())));
    }

    #[test]
    fn strings_are_escaped_for_xml() {
        assert_eq!(
            symbol("string@<tag>&"),
            Some((OperandKind::String, "&lt;tag&gt;&amp;".into()))
        );
    }

    #[test]
    fn rejects_bad_string_escapes() {
        assert!(symbol("string@\\").is_none());
        assert!(symbol("string@\\12").is_none());
        assert!(symbol("string@\\12a").is_none());
        assert!(symbol("string@a\\b").is_none());
        assert!(symbol("string@a#b").is_none());
    }

    #[test]
    fn labels_are_escaped_and_types_verbatim() {
        let label = classify("&loop", ArgClass::Label).unwrap();
        assert_eq!((label.kind, label.value.as_str()), (OperandKind::Label, "&amp;loop"));
        assert_eq!(label.raw, "&loop");
        let plain = classify("loop_1", ArgClass::Label).unwrap();
        assert_eq!(plain.value, "loop_1");
        let ty = classify("string", ArgClass::Type).unwrap();
        assert_eq!((ty.kind, ty.value.as_str()), (OperandKind::Type, "string"));
        assert!(classify("nil", ArgClass::Type).is_none());
        assert!(classify("GF@x", ArgClass::Label).is_none());
        assert!(classify("9lives", ArgClass::Label).is_none());
    }

    #[test]
    fn literals_do_not_satisfy_variable_or_label_positions() {
        assert!(classify("bool@true", ArgClass::Variable).is_none());
        assert!(classify("int", ArgClass::Label).is_some());
        assert!(classify("int@1", ArgClass::Label).is_none());
        assert!(classify("int@1", ArgClass::Type).is_none());
    }

    #[test]
    fn raw_token_is_kept() {
        let op = classify("string@x<y", ArgClass::Symbol).unwrap();
        assert_eq!(op.raw, "string@x<y");
        assert_eq!(op.to_string(), "string@x<y");
    }
}
