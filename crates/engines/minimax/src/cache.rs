//! Transposition cache keyed on exact position identity.

use std::collections::HashMap;

use chess_core::{Color, Position, PositionId, RepetitionContext};
use tracing::debug;

/// Everything that decides the score of a subtree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub position: PositionId,
    pub depth: u8,
    pub white_to_move: bool,
    /// Game history the subtree could still repeat
    pub history: RepetitionContext,
}

impl CacheKey {
    /// Key for searching `pos` with `depth` plies left.
    ///
    /// Leaves still look one ply ahead for repetition claims, so the history
    /// horizon is one more than the depth.
    pub fn new<P: Position + ?Sized>(pos: &P, depth: u8) -> Self {
        Self {
            position: pos.position_id(),
            depth,
            white_to_move: pos.side_to_move() == Color::White,
            history: pos.repetition_context(depth.saturating_add(1)),
        }
    }
}

/// How a stored score relates to the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the minimax value
    Exact,
    /// The search failed high: true value >= score
    Lower,
    /// The search failed low: true value <= score
    Upper,
}

impl Bound {
    /// Classifies a node result against the window it was searched with.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub score: i32,
    pub bound: Bound,
}

/// Scores of previously searched (position, depth, side) triples.
///
/// Unbounded unless a maximum is given; a full cache is emptied before the
/// next new key goes in.
#[derive(Debug, Clone, Default)]
pub struct TranspositionCache {
    entries: HashMap<CacheKey, CacheEntry>,
    max_entries: Option<usize>,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    pub fn set_max_entries(&mut self, max_entries: Option<usize>) {
        self.max_entries = max_entries;
        if matches!(max_entries, Some(max) if self.entries.len() > max) {
            self.clear();
        }
    }

    /// Returns the cached score when it decides this node for `(alpha, beta)`.
    pub fn lookup(&self, key: &CacheKey, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(key)?;
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).copied()
    }

    pub fn store(&mut self, key: CacheKey, score: i32, bound: Bound) {
        if let Some(max) = self.max_entries {
            if self.entries.len() >= max && !self.entries.contains_key(&key) {
                debug!(entries = self.entries.len(), max, "transposition cache full, clearing");
                self.entries.clear();
            }
        }
        self.entries.insert(key, CacheEntry { score, bound });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
