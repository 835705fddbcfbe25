//! Lexical scanner for Gmsh v1 mesh text.
//!
//! Tokens are section tags (`$NOD`, `$ENDNOD`, `$ELM`, `$ENDELM`) and
//! numeric literals. Rules are tried in a fixed priority order after
//! skipping whitespace; the first rule that matches at the current position
//! wins. Line numbers are tracked for diagnostics.

use std::fmt;

/// Kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `$NOD`
    NodesStart,
    /// `$ENDNOD`
    NodesEnd,
    /// `$ELM`
    ElementsStart,
    /// `$ENDELM`
    ElementsEnd,
    /// Optionally signed integer or decimal with optional exponent
    Number,
    /// End of input
    EndOfFile,
    /// No rule matched; the token text is the offending character
    Error,
}

impl TokenKind {
    /// Text used for this kind in diagnostics and by the writer.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::NodesStart => "$NOD",
            TokenKind::NodesEnd => "$ENDNOD",
            TokenKind::ElementsStart => "$ELM",
            TokenKind::ElementsEnd => "$ENDELM",
            TokenKind::Number => "number",
            TokenKind::EndOfFile => "end of file",
            TokenKind::Error => "error",
        }
    }

    /// Whether this is one of the four section tags.
    #[inline]
    pub const fn is_section_tag(self) -> bool {
        matches!(
            self,
            TokenKind::NodesStart
                | TokenKind::NodesEnd
                | TokenKind::ElementsStart
                | TokenKind::ElementsEnd
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token borrowed from the scanned text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Matched text (empty for end of file)
    pub text: &'a str,
    /// 1-based line on which the token starts
    pub line: usize,
}

impl Token<'_> {
    /// Offending character of an error token.
    pub fn character(&self) -> Option<char> {
        match self.kind {
            TokenKind::Error => self.text.chars().next(),
            _ => None,
        }
    }
}

/// Returns the length of the match at the start of the input, if any.
type Matcher = fn(&[u8]) -> Option<usize>;

struct Rule {
    kind: TokenKind,
    matcher: Matcher,
}

/// Lexical rules in priority order.
static RULES: [Rule; 5] = [
    Rule {
        kind: TokenKind::NodesStart,
        matcher: nodes_start,
    },
    Rule {
        kind: TokenKind::NodesEnd,
        matcher: nodes_end,
    },
    Rule {
        kind: TokenKind::ElementsStart,
        matcher: elements_start,
    },
    Rule {
        kind: TokenKind::ElementsEnd,
        matcher: elements_end,
    },
    Rule {
        kind: TokenKind::Number,
        matcher: number,
    },
];

fn literal(input: &[u8], tag: &[u8]) -> Option<usize> {
    input.starts_with(tag).then_some(tag.len())
}

fn nodes_start(input: &[u8]) -> Option<usize> {
    literal(input, b"$NOD")
}

fn nodes_end(input: &[u8]) -> Option<usize> {
    literal(input, b"$ENDNOD")
}

fn elements_start(input: &[u8]) -> Option<usize> {
    literal(input, b"$ELM")
}

fn elements_end(input: &[u8]) -> Option<usize> {
    literal(input, b"$ENDELM")
}

fn digits(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `[-+]?[0-9]+(\.[0-9]*)?([eE][-+]?[0-9]+)?`
fn number(input: &[u8]) -> Option<usize> {
    let mut pos = usize::from(matches!(input.first(), Some(b'+' | b'-')));

    let integral = digits(&input[pos..]);
    if integral == 0 {
        return None;
    }
    pos += integral;

    if input.get(pos) == Some(&b'.') {
        pos += 1;
        pos += digits(&input[pos..]);
    }

    // The exponent only belongs to the literal if at least one digit follows.
    if matches!(input.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(input.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(&input[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    Some(pos)
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn rule_for(kind: TokenKind) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

/// Restartable scanner over a borrowed text buffer.
///
/// # Example
///
/// ```
/// use drape_rs::mesh::gmsh::{Scanner, TokenKind};
///
/// let mut scanner = Scanner::new("$NOD\n1\n");
/// assert_eq!(scanner.next_token(None).kind, TokenKind::NodesStart);
/// let count = scanner.next_token(Some(TokenKind::Number));
/// assert_eq!((count.text, count.line), ("1", 2));
/// assert_eq!(scanner.next_token(None).kind, TokenKind::EndOfFile);
/// ```
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    /// Point the scanner at the start of `source`, restarting line counting.
    pub fn reset(&mut self, source: &'a str) {
        self.source = source;
        self.pos = 0;
        self.line = 1;
    }

    /// Current line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next token.
    ///
    /// With a `hint`, the rule for that kind is tried first. If it does not
    /// match, all rules are tried in priority order, so the result is the
    /// same as an unhinted scan.
    ///
    /// An error token consumes the offending character, so repeated calls
    /// always make progress.
    pub fn next_token(&mut self, hint: Option<TokenKind>) -> Token<'a> {
        self.skip_whitespace();

        let start = self.pos;
        let rest = &self.source.as_bytes()[start..];
        if rest.is_empty() {
            return self.make_token(TokenKind::EndOfFile, start);
        }

        if let Some(rule) = hint.and_then(rule_for) {
            if let Some(len) = (rule.matcher)(rest) {
                self.pos += len;
                return self.make_token(rule.kind, start);
            }
        }

        for rule in &RULES {
            if let Some(len) = (rule.matcher)(rest) {
                self.pos += len;
                return self.make_token(rule.kind, start);
            }
        }

        let width = self.source[start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
        self.make_token(TokenKind::Error, start)
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.source.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if !is_space(b) {
                break;
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            line: self.line,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to, but not including, end of file.
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.next_token(None);
        (token.kind != TokenKind::EndOfFile).then_some(token)
    }
}
