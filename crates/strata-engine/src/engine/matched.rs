//! Match results and their flattening into tokens.

use strata_core::{NodeId, NodeTypeId};

use super::token::Token;

/// How a node's boundaries are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrapping {
    #[default]
    Full,
    /// Open only: a scope whose end never matched, or a node around one.
    Begin,
}

/// A successfully matched span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matched {
    pub node: NodeTypeId,
    pub from: usize,
    pub len: usize,
    /// Sorted by position, non-overlapping.
    pub children: Vec<Matched>,
    pub wrapping: Wrapping,
}

impl Matched {
    pub fn new(node: NodeTypeId, from: usize, len: usize, children: Vec<Matched>) -> Self {
        Self {
            node,
            from,
            len,
            children,
            wrapping: Wrapping::Full,
        }
    }

    pub fn leaf(node: NodeTypeId, from: usize, len: usize) -> Self {
        Self::new(node, from, len, Vec::new())
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.from + self.len
    }

    /// Reparent under `node` with the same span.
    pub fn wrap(self, node: NodeTypeId, wrapping: Wrapping) -> Self {
        Self {
            node,
            from: self.from,
            len: self.len,
            children: vec![self],
            wrapping,
        }
    }

    /// Whether this span or anything below it was left open.
    pub fn is_incomplete(&self) -> bool {
        self.wrapping == Wrapping::Begin || self.children.iter().any(Matched::is_incomplete)
    }

    /// Shift every position by `delta`.
    pub fn offset(&mut self, delta: usize) {
        if delta == 0 {
            return;
        }
        self.from += delta;
        for child in &mut self.children {
            child.offset(delta);
        }
    }

    /// Close every open node with one zero-length `Incomplete` marker.
    ///
    /// Open nodes form a chain through last children that all end at the
    /// same position, so the marker goes below the deepest one and closes
    /// the whole chain.
    pub fn close_incomplete(&mut self) {
        if !self.is_incomplete() {
            return;
        }
        self.wrapping = Wrapping::Full;
        match self.children.last_mut() {
            Some(last) if last.is_incomplete() => last.close_incomplete(),
            _ => {
                let at = self.end();
                self.children.push(Matched::leaf(NodeId::Incomplete.id(), at, 0));
            }
        }
    }

    /// Insert `m` below the deepest child containing it, keeping order.
    pub(crate) fn insert_child(children: &mut Vec<Matched>, m: Matched) {
        if let Some(parent) = children
            .iter_mut()
            .find(|c| c.len > 0 && c.from <= m.from && m.end() <= c.end())
        {
            Self::insert_child(&mut parent.children, m);
            return;
        }
        let at = children.partition_point(|c| c.from <= m.from);
        children.insert(at, m);
    }

    /// Flatten into tokens.
    ///
    /// A leaf is one token. A node with children opens on its first token and,
    /// unless left open, closes on its last; zero-length `None` tokens pad the edges when the
    /// children do not reach them. `None` nodes never open or close.
    pub fn compile(&self, tokens: &mut Vec<Token>) {
        let named = self.node != NodeId::None.id();

        if self.children.is_empty() {
            let mut token = match (named, self.wrapping) {
                (true, Wrapping::Full) | (false, _) => Token::new(self.node, self.from, self.end()),
                (true, _) => Token::new(NodeId::None.id(), self.from, self.end()),
            };
            if named && self.wrapping == Wrapping::Begin {
                token.opens.push(self.node);
            }
            tokens.push(token);
            return;
        }

        let start = tokens.len();
        for child in &self.children {
            child.compile(tokens);
        }
        if !named {
            return;
        }

        if tokens[start].from > self.from {
            tokens.insert(start, Token::pad(self.from));
        }
        if tokens.last().is_some_and(|t| t.to < self.end()) {
            tokens.push(Token::pad(self.end()));
        }
        tokens[start].opens.insert(0, self.node);
        if self.wrapping == Wrapping::Full
            && let Some(last) = tokens.last_mut()
        {
            last.closes.push(self.node);
        }
    }

    /// Convenience wrapper around [`Matched::compile`].
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.compile(&mut tokens);
        tokens
    }
}
