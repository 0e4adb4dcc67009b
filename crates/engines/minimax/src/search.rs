//! Alpha-beta minimax with a transposition cache.
//!
//! White maximizes and Black minimizes the same White-relative score, so the
//! two sides are handled by explicit max/min branches rather than negamax.

use std::time::Instant;

use chess_core::{Color, MoveGuard, Position, SearchResult};
use tracing::{debug, debug_span, trace};

use crate::cache::{Bound, CacheKey, TranspositionCache};
use crate::config::{CachePolicy, SearchConfig};
use crate::eval::evaluate;
use crate::ordering::order_moves;

/// Bigger than any evaluation, mate included.
pub const INFINITY: i32 = 1_000_000;

/// The side whose gains count as positive scores.
pub const MAXIMIZING_SIDE: Color = Color::White;

/// Per-search counters, reset by every [`Searcher::best_move`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to `minimax`, cache hits included
    pub nodes: u64,
    pub cache_hits: u64,
}

/// Owns the cache and counters for one line of searches.
///
/// One search at a time: both entry points take `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    cache: TranspositionCache,
    stats: SearchStats,
    policy: CachePolicy,
}

impl Searcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            cache: TranspositionCache::with_max_entries(config.cache.max_entries),
            stats: SearchStats::default(),
            policy: config.cache.policy,
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn set_cache_policy(&mut self, policy: CachePolicy) {
        self.policy = policy;
    }

    pub fn set_cache_max_entries(&mut self, max_entries: Option<usize>) {
        self.cache.set_max_entries(max_entries);
    }

    /// Static evaluation, positive favours White.
    pub fn evaluate<P: Position + ?Sized>(&self, pos: &P) -> i32 {
        evaluate(pos)
    }

    /// Depth-limited alpha-beta search of `pos`, returning its White-relative score.
    ///
    /// The position is mutated while searching and restored before returning.
    pub fn minimax<P: Position + ?Sized>(
        &mut self,
        pos: &mut P,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        let key = CacheKey::new(&*pos, depth);
        if let Some(score) = self.cache.lookup(&key, alpha, beta) {
            self.stats.cache_hits += 1;
            return score;
        }

        if depth == 0 || pos.is_terminal() {
            let score = evaluate(&*pos);
            self.cache.store(key, score, Bound::Exact);
            return score;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let maximizing = pos.side_to_move() == MAXIMIZING_SIDE;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in order_moves(pos) {
            let score = {
                let mut child = MoveGuard::new(&mut *pos, mv);
                self.minimax(&mut *child, depth - 1, alpha, beta)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break; // Cutoff
            }
        }

        self.cache
            .store(key, best, Bound::classify(best, alpha_orig, beta_orig));
        best
    }

    /// Picks the best move for the side to move, searching `depth` plies.
    ///
    /// Each root move gets a full window; the first move with the strictly
    /// best score wins. Without legal moves the result has no move and the
    /// score of the terminal position.
    ///
    /// # Panics
    /// If `depth` is 0.
    pub fn best_move<P: Position + ?Sized>(&mut self, pos: &mut P, depth: u8) -> SearchResult {
        assert!(depth >= 1, "best_move needs a depth of at least one ply");

        let span = debug_span!("best_move", depth);
        let _guard = span.enter();
        let started = Instant::now();

        self.stats = SearchStats::default();
        if self.policy == CachePolicy::PerSearch {
            self.cache.clear();
        }

        let maximizing = pos.side_to_move() == MAXIMIZING_SIDE;
        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in order_moves(pos) {
            let score = {
                let mut child = MoveGuard::new(&mut *pos, mv);
                self.minimax(&mut *child, depth - 1, -INFINITY, INFINITY)
            };
            trace!(%mv, score, "root move");

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best_move = Some(mv);
            }
        }

        if best_move.is_none() {
            best_score = evaluate(&*pos);
        }

        debug!(
            score = best_score,
            nodes = self.stats.nodes,
            cache_hits = self.stats.cache_hits,
            cache_entries = self.cache.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.stats.nodes,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
