//! Face-corner token parsing.
//!
//! OBJ files write face corners as `v`, `v/t`, `v//n` or `v/t/n`. A file uses
//! one layout throughout, so the layout is detected from the first corner
//! seen and then reused for every later corner of the same load.

use crate::core::mesh::FaceIndex;

const SEPARATOR: char = '/';

/// Layout of a face-corner token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceGrammar {
    /// `v`
    V,
    /// `v/t`
    VT,
    /// `v//n`
    VN,
    /// `v/t/n`
    VTN,
}

impl FaceGrammar {
    /// Classifies a token, or returns `None` when it has more than two separators.
    pub fn detect(token: &str) -> Option<FaceGrammar> {
        if token.contains("//") {
            return Some(FaceGrammar::VN);
        }
        match token.matches(SEPARATOR).count() {
            0 => Some(FaceGrammar::V),
            1 => Some(FaceGrammar::VT),
            2 => Some(FaceGrammar::VTN),
            _ => None,
        }
    }

    /// Parses `token` strictly in this layout.
    pub fn parse(self, token: &str) -> Option<FaceIndex> {
        let mut fields = token.split(SEPARATOR);
        let first = fields.next()?;
        let second = fields.next();
        let third = fields.next();
        if fields.next().is_some() {
            return None;
        }

        let index = match (self, second, third) {
            (FaceGrammar::V, None, None) => FaceIndex::new(parse_index(first)?, 0, 0),
            (FaceGrammar::VT, Some(t), None) => {
                FaceIndex::new(parse_index(first)?, parse_index(t)?, 0)
            }
            (FaceGrammar::VN, Some(""), Some(n)) => {
                FaceIndex::new(parse_index(first)?, 0, parse_index(n)?)
            }
            (FaceGrammar::VTN, Some(t), Some(n)) => {
                FaceIndex::new(parse_index(first)?, parse_index(t)?, parse_index(n)?)
            }
            _ => return None,
        };
        Some(index)
    }
}

fn parse_index(field: &str) -> Option<u32> {
    field.parse::<u32>().ok()
}

/// Per-load resolver that remembers the layout once it has been detected.
#[derive(Debug, Clone, Default)]
pub struct FaceIndexResolver {
    grammar: Option<FaceGrammar>,
}

impl FaceIndexResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grammar(&self) -> Option<FaceGrammar> {
        self.grammar
    }

    pub fn reset(&mut self) {
        self.grammar = None;
    }

    /// Resolves one face-corner token. `None` signals a malformed token.
    pub fn resolve(&mut self, token: &str) -> Option<FaceIndex> {
        let grammar = match self.grammar {
            Some(grammar) => grammar,
            None => {
                let grammar = FaceGrammar::detect(token)?;
                self.grammar = Some(grammar);
                grammar
            }
        };
        grammar.parse(token)
    }
}
