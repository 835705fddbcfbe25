//! One-token-lookahead parser for Gmsh v1 mesh text.
//!
//! Grammar:
//!
//! ```text
//! document := (node_section | element_section)* EOF
//! node_section := "$NOD" count (id x y z){count} "$ENDNOD"
//! element_section := "$ELM" count (id type phys region n node{n}){count} "$ENDELM"
//! ```
//!
//! Identifiers in the file are 1-based. Records are stored at their
//! 0-based slot while the file order of identifiers is kept separately.

use std::str::FromStr;

use tracing::debug;

use super::GmshError;
use super::scanner::{Scanner, Token, TokenKind};
use crate::mesh::{Element, ElementType, Node, SurfaceMesh};
use crate::types::{ElementIndex, NodeIndex};

const NODE_SECTION: &str = "node";
const ELEMENT_SECTION: &str = "element";

/// A record read from a section, keyed by its 0-based slot.
struct Record<T> {
    index: usize,
    line: usize,
    value: T,
}

/// Parser state: the scanner plus one token of lookahead.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    lookahead: Token<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser reading from the scanner's current position.
    pub fn new(mut scanner: Scanner<'a>) -> Self {
        let lookahead = scanner.next_token(None);
        Self { scanner, lookahead }
    }

    /// Parse a complete version 1 document.
    pub fn parse_v1(mut self) -> Result<SurfaceMesh, GmshError> {
        let mut nodes: Option<Vec<Record<Node>>> = None;
        let mut elements: Option<Vec<Record<Element>>> = None;

        loop {
            match self.lookahead.kind {
                TokenKind::EndOfFile => break,
                TokenKind::NodesStart => {
                    if nodes.is_some() {
                        return Err(self.duplicate_section(NODE_SECTION));
                    }
                    nodes = Some(self.node_section()?);
                }
                TokenKind::ElementsStart => {
                    if elements.is_some() {
                        return Err(self.duplicate_section(ELEMENT_SECTION));
                    }
                    elements = Some(self.element_section()?);
                }
                _ => return Err(self.unexpected("$NOD or $ELM")),
            }
        }

        let (nodes, node_order) = into_store(NODE_SECTION, nodes.unwrap_or_default())?;
        let (elements, element_order) =
            into_store(ELEMENT_SECTION, elements.unwrap_or_default())?;

        let mesh = SurfaceMesh::from_parts(
            nodes,
            node_order.into_iter().map(NodeIndex::new).collect(),
            elements,
            element_order.into_iter().map(ElementIndex::new).collect(),
        )?;
        Ok(mesh)
    }

    fn node_section(&mut self) -> Result<Vec<Record<Node>>, GmshError> {
        self.eat(TokenKind::NodesStart, Some(TokenKind::Number))?;
        let (count, _) = self.count("number of nodes")?;
        debug!(count, line = self.lookahead.line, "Parsing node section");

        let mut records = Vec::new();
        for _ in 0..count {
            let (index, line) = self.index(NODE_SECTION, count)?;
            let x = self.real()?;
            let y = self.real()?;
            let z = self.real()?;
            records.push(Record {
                index,
                line,
                value: Node::new(x, y, z),
            });
        }

        self.eat(TokenKind::NodesEnd, None)?;
        Ok(records)
    }

    fn element_section(&mut self) -> Result<Vec<Record<Element>>, GmshError> {
        self.eat(TokenKind::ElementsStart, Some(TokenKind::Number))?;
        let (count, _) = self.count("number of elements")?;
        debug!(count, line = self.lookahead.line, "Parsing element section");

        let mut records = Vec::new();
        for _ in 0..count {
            let (index, line) = self.index(ELEMENT_SECTION, count)?;
            let (code, _) = self.integer::<u32>()?;
            let element_type = ElementType::new(code);
            let (physical_region, _) = self.integer::<i32>()?;
            let (element_region, _) = self.integer::<i32>()?;
            let (n_nodes, _) = self.integer::<usize>()?;

            if let Some(expected) = element_type.node_count() {
                if expected != n_nodes {
                    return Err(GmshError::NodeCountMismatch {
                        element: index + 1,
                        element_type: code,
                        expected,
                        found: n_nodes,
                    });
                }
            }

            let mut nodes = Vec::with_capacity(n_nodes.min(64));
            for _ in 0..n_nodes {
                let (id, line) = self.integer::<usize>()?;
                let node = NodeIndex::from_one_based(id).ok_or(GmshError::ZeroNodeReference {
                    element: index + 1,
                    line,
                })?;
                nodes.push(node);
            }

            records.push(Record {
                index,
                line,
                value: Element::new(element_type, physical_region, element_region, nodes),
            });
        }

        self.eat(TokenKind::ElementsEnd, None)?;
        Ok(records)
    }

    /// Consume the lookahead if it has the expected kind.
    fn eat(
        &mut self,
        expected: TokenKind,
        next_hint: Option<TokenKind>,
    ) -> Result<Token<'a>, GmshError> {
        self.expect(expected, next_hint, expected.describe())
    }

    fn expect(
        &mut self,
        expected: TokenKind,
        next_hint: Option<TokenKind>,
        what: &'static str,
    ) -> Result<Token<'a>, GmshError> {
        if self.lookahead.kind != expected {
            return Err(self.unexpected(what));
        }
        let token = self.lookahead;
        self.lookahead = self.scanner.next_token(next_hint);
        Ok(token)
    }

    fn unexpected(&self, expected: &'static str) -> GmshError {
        let found = self.lookahead;
        match found.character() {
            Some(character) => GmshError::Lexical {
                line: found.line,
                character,
            },
            None => GmshError::Syntax {
                line: found.line,
                expected,
                found: found.kind.describe(),
            },
        }
    }

    fn duplicate_section(&self, section: &'static str) -> GmshError {
        GmshError::DuplicateSection {
            section,
            line: self.lookahead.line,
        }
    }

    fn count(&mut self, what: &'static str) -> Result<(usize, usize), GmshError> {
        let token = self.expect(TokenKind::Number, Some(TokenKind::Number), what)?;
        parse_token(&token)
    }

    fn integer<T: FromStr>(&mut self) -> Result<(T, usize), GmshError> {
        let token = self.eat(TokenKind::Number, Some(TokenKind::Number))?;
        parse_token(&token)
    }

    /// Read a 1-based record identifier and return its 0-based slot.
    fn index(&mut self, section: &'static str, count: usize) -> Result<(usize, usize), GmshError> {
        let (id, line) = self.integer::<usize>()?;
        match id.checked_sub(1) {
            Some(index) if index < count => Ok((index, line)),
            _ => Err(GmshError::IndexOutOfRange {
                section,
                index: id,
                count,
                line,
            }),
        }
    }

    fn real(&mut self) -> Result<f64, GmshError> {
        let token = self.eat(TokenKind::Number, Some(TokenKind::Number))?;
        let (value, _) = parse_token::<f64>(&token)?;
        if !value.is_finite() {
            return Err(GmshError::InvalidNumber {
                line: token.line,
                text: token.text.to_string(),
            });
        }
        Ok(value)
    }
}

fn parse_token<T: FromStr>(token: &Token<'_>) -> Result<(T, usize), GmshError> {
    token
        .text
        .parse::<T>()
        .map(|value| (value, token.line))
        .map_err(|_| GmshError::InvalidNumber {
            line: token.line,
            text: token.text.to_string(),
        })
}

/// Scatter records into a dense store and return it with the file order.
///
/// Every record index is below the section count and there are exactly
/// `count` records, so the store is complete unless an index repeats.
fn into_store<T>(
    section: &'static str,
    mut records: Vec<Record<T>>,
) -> Result<(Vec<T>, Vec<usize>), GmshError> {
    let order: Vec<usize> = records.iter().map(|r| r.index).collect();

    // Stable sort keeps file order among equal indices.
    records.sort_by_key(|r| r.index);
    if let Some(pair) = records.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(GmshError::DuplicateIndex {
            section,
            index: pair[1].index + 1,
            line: pair[1].line,
        });
    }

    Ok((records.into_iter().map(|r| r.value).collect(), order))
}
