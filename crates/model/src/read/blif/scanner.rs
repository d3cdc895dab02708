//! BLIF tokenizer.

use crate::read::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    Word,
    Nl,
    Eof,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Token<'a> {
    pub(super) kind: TokenKind,
    pub(super) text: &'a str,
    pub(super) loc: Location,
}

/// Splits BLIF source into words and significant newlines.
///
/// `#` comments run to end of line. A backslash directly before a newline
/// joins the two lines, so statements never see it.
pub(super) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn loc(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// True at a backslash that ends the line.
    fn at_continuation(&self) -> bool {
        let rest = &self.src[self.pos..];
        rest.starts_with("\\\n") || rest.starts_with("\\\r\n")
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn token(&self, kind: TokenKind, start: usize, loc: Location) -> Token<'a> {
        Token {
            kind,
            text: &self.src[start..self.pos],
            loc,
        }
    }

    pub(super) fn next_token(&mut self) -> Token<'a> {
        loop {
            let start = self.pos;
            let loc = self.loc();
            match self.peek() {
                None => return self.token(TokenKind::Eof, start, loc),
                Some('\n') => {
                    self.bump();
                    return self.token(TokenKind::Nl, start, loc);
                }
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('\\') if self.at_continuation() => {
                    while self.bump().is_some_and(|c| c != '\n') {}
                }
                Some(_) => {
                    while self.peek().is_some_and(|c| {
                        !c.is_whitespace() && c != '#' && !(c == '\\' && self.at_continuation())
                    }) {
                        self.bump();
                    }
                    return self.token(TokenKind::Word, start, loc);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(src: &str) -> Vec<String> {
        let mut sc = Scanner::new(src);
        let mut out = Vec::new();
        loop {
            let tok = sc.next_token();
            match tok.kind {
                TokenKind::Word => out.push(tok.text.to_string()),
                TokenKind::Nl => out.push("<nl>".to_string()),
                TokenKind::Eof => break,
            }
        }
        out
    }

    #[test]
    fn test_scan_basic() {
        assert_eq!(
            words(".inputs a b # comment\n.end"),
            [".inputs", "a", "b", "<nl>", ".end"]
        );
    }

    #[test]
    fn test_scan_continuation() {
        assert_eq!(
            words(".outputs x \\\n  y\r\n"),
            [".outputs", "x", "y", "<nl>"]
        );
    }

    #[test]
    fn test_scan_backslash_inside_word() {
        assert_eq!(words("a\\b c\\ d\n"), ["a\\b", "c\\", "d", "<nl>"]);
        assert_eq!(words("x\\\ny"), ["x", "y"]);
    }

    #[test]
    fn test_scan_locations() {
        let mut sc = Scanner::new("\n  .model m");
        assert_eq!(sc.next_token().kind, TokenKind::Nl);
        let tok = sc.next_token();
        assert_eq!(tok.text, ".model");
        assert_eq!(tok.loc, Location::new(2, 3));
        assert_eq!(sc.next_token().loc, Location::new(2, 10));
    }
}
