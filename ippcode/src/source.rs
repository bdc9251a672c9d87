use std::io::{self, BufRead};

/// One physical input line with its terminator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first character of the line in the consumed source.
    pub offset: usize,
    pub text: String,
}

/// Yields input lines in order and remembers everything read so far,
/// so diagnostics can point into the consumed text.
///
/// The retained text grows with the input for the whole run: memory is
/// proportional to the source size, not to the longest line. Only the error
/// path reads it back, through [`LineSource::into_consumed`].
pub struct LineSource<R> {
    reader: R,
    consumed: String,
    lines_read: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            consumed: String::new(),
            lines_read: 0,
        }
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        let offset = self.consumed.len();
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.consumed.push_str(&buf);
        self.lines_read += 1;

        let text = buf.strip_suffix('\n').unwrap_or(&buf);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(Some(Line {
            number: self.lines_read,
            offset,
            text: text.to_string(),
        }))
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    #[cfg(test)]
    fn consumed(&self) -> &str {
        &self.consumed
    }

    pub fn into_consumed(self) -> String {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Line> {
        let mut source = LineSource::new(input.as_bytes());
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn final_newline_is_optional() {
        let lines = collect("a\nb");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[1].offset, 2);
    }

    #[test]
    fn crlf_terminators_are_removed() {
        let lines = collect("one\r\ntwo\r\n");
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two");
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].offset, 5);
    }

    #[test]
    fn keeps_consumed_text() {
        let mut source = LineSource::new("x\n\ny\n".as_bytes());
        source.next_line().unwrap();
        source.next_line().unwrap();
        assert_eq!(source.consumed(), "x\n\n");
        assert_eq!(source.lines_read(), 2);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(collect("").is_empty());
    }
}
