//! Splits raw netlist text into records of lines.

use lexer::{TokenIter, TokenKind};

mod lexer;

/// One `;`-terminated chunk of the input, already split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    lines: Vec<&'a str>,
    line: usize,
}

impl<'a> Record<'a> {
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// The line classification looks at, empty for an empty record.
    pub fn head(&self) -> &'a str {
        self.get(0).unwrap_or("")
    }

    /// 1-based source line of the first kept line.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The record text as it was seen by the parser, for error messages.
    pub fn raw(&self) -> String {
        self.lines.join("\n")
    }

    fn from_lines(mut lines: Vec<(usize, &'a str)>) -> Self {
        let blank = |(_, text): &(usize, &str)| text.trim().is_empty();
        let start = lines.iter().position(|l| !blank(l)).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !blank(l)).map_or(start, |i| i + 1);
        lines.truncate(end);
        lines.drain(..start);

        if let Some((_, first)) = lines.first_mut() {
            *first = first.trim_start();
        }
        if let Some((_, last)) = lines.last_mut() {
            *last = last.trim_end();
        }
        // Header prologue, e.g. `{ OrCAD ... }`
        if lines.first().is_some_and(|(_, text)| text.starts_with('{')) {
            lines.remove(0);
        }

        let line = lines.first().map_or(0, |(n, _)| *n);
        let lines = lines.into_iter().map(|(_, text)| text).collect();
        Record { lines, line }
    }
}

/// Iterator over the records of a netlist text.
pub struct Records<'a> {
    input: &'a str,
    tokens: TokenIter<'a>,
    line: usize,
    done: bool,
}

impl<'a> Records<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: TokenIter::new(input),
            line: 1,
            done: false,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let input = self.input;
        let mut lines = Vec::new();
        let mut current = (self.line, "");
        loop {
            let Some(token) = self.tokens.next() else {
                self.done = true;
                lines.push(current);
                break;
            };
            let text = &input[token.span];
            match token.kind {
                TokenKind::Text => current.1 = text,
                TokenKind::Break => {
                    lines.push(current);
                    if text != "\t" {
                        self.line += 1;
                    }
                    current = (self.line, "");
                }
                TokenKind::RecordEnd => {
                    lines.push(current);
                    break;
                }
            }
        }
        Some(Record::from_lines(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("NODE_NAME\tR1 1\n\n'NET1':", &["NODE_NAME", "R1 1", "", "'NET1':"])]
    #[case("\n\n  NET_NAME\n'N1'\t\n C_SIGNAL='X' \n\n", &["NET_NAME", "'N1'", "", " C_SIGNAL='X'"])]
    #[case("{ header }\nNODE_NAME\nU1 A", &["NODE_NAME", "U1 A"])]
    #[case("  \n\t ", &[])]
    #[case("{ only a header }", &[])]
    fn record_lines(#[case] input: &str, #[case] expected: &[&str]) {
        let mut records = Records::new(input);
        let record = records.next().unwrap();
        assert_eq!(record.lines(), expected);
        assert!(records.next().is_none());
    }

    #[test]
    fn semicolons_separate_records() {
        let records: Vec<_> = Records::new("a;b\nc;").collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].lines(), &["a"]);
        assert_eq!(records[1].lines(), &["b", "c"]);
        assert!(records[2].is_empty());
        assert_eq!(records[2].head(), "");
    }

    #[test]
    fn empty_input_is_one_empty_record() {
        let records: Vec<_> = Records::new("").collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }

    #[test]
    fn line_numbers_count_newlines_only() {
        let records: Vec<_> = Records::new("{ hdr }\n;\n\nNODE_NAME\tR1 1\r\n\t'N':;").collect();
        assert_eq!(records[0].line_number(), 0);
        assert_eq!(records[1].line_number(), 4);
        assert_eq!(records[1].get(3), Some("'N':"));
        assert_eq!(records[1].raw(), "NODE_NAME\nR1 1\n\n'N':");
    }
}
