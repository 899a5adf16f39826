//! Incremental parse driver.
//!
//! A parse alternates between matching one top-level span and compiling the
//! chunks it completed. An incremental parse starts from the cache of an
//! earlier one: chunks before the edit are kept together with the compiler
//! state they produced, text after the edit is re-tokenized only until the
//! parse lines up with a pure chunk of the old sequence, and the rest of the
//! old sequence is spliced in unchanged.

use std::borrow::Cow;
use std::collections::HashMap;

use strata_buffer::CompiledTree;
use strata_engine::{BackrefCache, Engine, GrammarState};
use strata_grammar::Grammar;
use tracing::{debug, trace};

use crate::chunk::{Chunk, ChunkTree};
use crate::compiler::Compiler;
use crate::config::ParseConfig;
use crate::packet::Packet;
use crate::source::TextSource;

/// A replaced range, in the coordinates of the document before the edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    pub from: usize,
    pub to: usize,
    /// Inserted length minus removed length.
    pub delta: isize,
}

impl Edit {
    pub fn new(from: usize, to: usize, delta: isize) -> Self {
        Self { from, to, delta }
    }

    /// Replace `from..to` with `inserted` bytes.
    pub fn replace(from: usize, to: usize, inserted: usize) -> Self {
        Self::new(from, to, inserted as isize - (to - from) as isize)
    }

    /// End of the replacement in the new document.
    pub fn new_end(&self) -> usize {
        self.to.saturating_add_signed(self.delta)
    }

    /// One edit covering several sorted, non-overlapping ones.
    pub fn cover(edits: &[Edit]) -> Option<Edit> {
        let first = edits.first()?;
        let last = edits.last()?;
        Some(Edit {
            from: first.from,
            to: last.to,
            delta: edits.iter().map(|e| e.delta).sum(),
        })
    }
}

/// Chunks and compiler state of a finished parse, the seed of the next one.
#[derive(Clone, Debug, Default)]
pub struct ParseCache {
    pub(crate) compiler: Compiler,
    pub(crate) packet: Packet,
    pub(crate) config: ParseConfig,
}

impl ParseCache {
    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn config(&self) -> ParseConfig {
        self.config
    }
}

#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub tree: CompiledTree,
    pub cache: ParseCache,
}

pub struct Parser<'g, 't> {
    engine: Engine<'g>,
    text: Cow<'t, str>,
    backrefs: BackrefCache,
    config: ParseConfig,
    packet: Packet,
    compiler: Compiler,
    pos: usize,
    stop: usize,
    /// Old chunks after the edit, waiting to be spliced in.
    ahead: Option<Packet>,
    /// Old chunks that were re-tokenized, by start position; their subtrees
    /// can be adopted.
    stale: HashMap<usize, Vec<Chunk>>,
}

impl<'g, 't> Parser<'g, 't> {
    pub fn new<S: TextSource + ?Sized>(grammar: &'g Grammar, source: &'t S) -> Self {
        Self::with_config(grammar, source, ParseConfig::default())
    }

    pub fn with_config<S: TextSource + ?Sized>(
        grammar: &'g Grammar,
        source: &'t S,
        config: ParseConfig,
    ) -> Self {
        let text = source.slice(0, source.len());
        let stop = text.len();
        Self {
            engine: Engine::with_limits(grammar, config.limits),
            text,
            backrefs: BackrefCache::new(),
            config,
            packet: Packet::new(config.chunk_size),
            compiler: Compiler::new(),
            pos: 0,
            stop,
            ahead: None,
            stale: HashMap::new(),
        }
    }

    /// Parse `source`, the result of applying `edit` to the document `cache`
    /// was built from.
    pub fn incremental<S: TextSource + ?Sized>(
        grammar: &'g Grammar,
        source: &'t S,
        cache: &ParseCache,
        edit: Edit,
    ) -> Self {
        let mut parser = Self::with_config(grammar, source, cache.config);
        let mut packet = cache.packet.clone();

        let split = packet
            .find_pure_before(edit.from)
            .and_then(|i| packet.find_pure_before(packet.chunks()[i].from().checked_sub(1)?))
            .filter(|&i| packet.chunks()[i].snapshot().is_some());
        let Some(split) = split else {
            debug!(edit.from, "no restart point before edit, parsing from start");
            parser.seed_ahead(packet, edit);
            return parser;
        };

        let mut compiler = cache.compiler.clone();
        compiler.rewind(&packet, split);
        let right = packet.split(split + 1);
        debug!(
            edit.from,
            restart = packet.end(),
            kept_chunks = packet.len(),
            "reusing chunks before edit"
        );

        parser.pos = packet.end();
        parser.packet = packet;
        parser.compiler = compiler;
        parser.seed_ahead(right, edit);
        parser
    }

    /// Slide the old chunks after `edit` into place and find the first pure
    /// chunk that can be spliced in. Everything before it is stale.
    fn seed_ahead(&mut self, mut right: Packet, edit: Edit) {
        let moved = right.chunks().partition_point(|c| c.from() < edit.to);
        right.offset(moved, edit.delta);
        let mut ahead = right.split(moved);

        let first = ahead.find_pure_after(edit.new_end());
        self.retire(&mut right);
        match first {
            Some(i) => {
                let rest = ahead.split(i);
                self.retire(&mut ahead);
                trace!(from = rest.from(), chunks = rest.len(), "ahead chunks ready");
                self.ahead = Some(rest);
            }
            None => self.retire(&mut ahead),
        }
    }

    /// Keep the chunks of `packet` whose subtrees can still be adopted.
    fn retire(&mut self, packet: &mut Packet) {
        for chunk in packet.drain().filter(|c| c.cached_subtree().is_some()) {
            self.stale.entry(chunk.from()).or_default().push(chunk);
        }
    }

    /// Stop at the first step boundary at or after `pos`.
    pub fn stop_at(mut self, pos: usize) -> Self {
        self.stop = pos.min(self.text.len());
        self
    }

    /// End of the text parsed so far.
    pub fn parsed_pos(&self) -> usize {
        self.pos
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.stop || self.pos >= self.text.len()
    }

    /// Run one step. Returns the output once the parse is done.
    pub fn advance(&mut self) -> Option<ParseOutput> {
        if !self.is_done() {
            self.step();
        }
        self.is_done().then(|| self.output())
    }

    /// Parse to the end (or the stop position).
    pub fn run(mut self) -> ParseOutput {
        while !self.is_done() {
            self.step();
        }
        self.output()
    }

    /// Stop now. Open nodes are closed as incomplete.
    pub fn finish(mut self) -> ParseOutput {
        self.output()
    }

    fn step(&mut self) {
        let backrefs = std::mem::take(&mut self.backrefs);
        let mut state = GrammarState::new(&self.text, 0).with_backrefs(backrefs);
        let matched = self.engine.next_match(&mut state, self.pos);
        self.backrefs = state.into_backrefs();

        for token in matched.tokens() {
            self.packet.add(&token);
        }
        self.packet.end_match();
        self.pos = matched.end();
        self.try_splice();

        // The last chunk may still grow.
        self.compile_until(self.packet.len().saturating_sub(1));
    }

    /// Splice the ahead chunks in if the parse lines up with them.
    fn try_splice(&mut self) {
        let Some(mut ahead) = self.ahead.take() else {
            return;
        };
        if self.pos > ahead.from() {
            let Some(i) = ahead.find_pure_after(self.pos) else {
                self.retire(&mut ahead);
                return;
            };
            let rest = ahead.split(i);
            self.retire(&mut ahead);
            ahead = rest;
        }

        if self.pos == ahead.from() && self.packet.stack().is_empty() && self.packet.is_sealed() {
            debug!(at = self.pos, chunks = ahead.len(), "splicing chunks after edit");
            self.packet.append(ahead);
            self.pos = self.packet.end().max(self.pos);
        } else {
            self.ahead = Some(ahead);
        }
    }

    fn compile_until(&mut self, end: usize) {
        while self.compiler.index() < end {
            self.adopt(self.compiler.index());
            if !self.compiler.step(&mut self.packet) {
                break;
            }
        }
    }

    /// Give a fresh chunk the subtree of an identical stale one.
    fn adopt(&mut self, index: usize) {
        let Some(chunk) = self.packet.chunk_mut(index) else {
            return;
        };
        if chunk.is_computed() || !chunk.is_convertible() {
            return;
        }
        let Some(tree) = self
            .stale
            .get(&chunk.from())
            .and_then(|stale| stale.iter().find(|s| s.same_content(chunk)))
            .and_then(Chunk::cached_subtree)
        else {
            return;
        };
        trace!(from = chunk.from(), "subtree adopted");
        chunk.tree = ChunkTree::Cached(Some(tree));
    }

    fn output(&mut self) -> ParseOutput {
        self.compile_until(self.packet.len());
        ParseOutput {
            tree: self.compiler.finish(self.pos),
            cache: ParseCache {
                compiler: self.compiler.clone(),
                packet: self.packet.clone(),
                config: self.config,
            },
        }
    }
}

/// Parse `source` from scratch.
pub fn parse<S: TextSource + ?Sized>(grammar: &Grammar, source: &S) -> ParseOutput {
    Parser::new(grammar, source).run()
}
