//! Background search thread.
//!
//! The worker owns the engine, so its cache survives between `go` commands
//! while the protocol loop stays free to answer the GUI.

use std::thread::{self, JoinHandle};
use std::time::Instant;

use chess_core::{move_to_uci, Engine, Game, Position, SearchResult};
use crossbeam_channel::{unbounded, Receiver, Sender};
use minimax_engine::MinimaxEngine;
use serde::Serialize;
use tracing::{debug, warn};

/// Work sent to the search thread, handled in order.
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// `None` depth means the engine's configured depth
    Search { game: Game, depth: Option<u8> },
    NewGame,
    SetOption { name: String, value: String },
}

/// Outcome of one search, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub fen: String,
    pub white_to_move: bool,
    /// UCI long algebraic, castling as the king's two-square step
    pub best_move: Option<String>,
    /// Centipawns, positive favours White
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

impl SearchReport {
    pub fn new(game: &Game, result: &SearchResult, started: Instant) -> Self {
        Self {
            fen: game.fen(),
            white_to_move: game.side_to_move() == chess_core::Color::White,
            best_move: result.best_move.map(|mv| move_to_uci(game.board(), mv)),
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Runs one search synchronously on `engine`.
pub fn run_search(engine: &mut MinimaxEngine, game: &mut Game, depth: Option<u8>) -> SearchReport {
    let depth = depth.unwrap_or_else(|| engine.default_depth());
    let started = Instant::now();
    let result = engine.search(game, depth);
    SearchReport::new(game, &result, started)
}

/// Handle to the search thread. Dropping it waits for the current search.
#[derive(Debug)]
pub struct SearchWorker {
    request_sender: Option<Sender<SearchRequest>>,
    report_receiver: Receiver<SearchReport>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(mut engine: MinimaxEngine) -> std::io::Result<Self> {
        let (request_sender, request_receiver) = unbounded::<SearchRequest>();
        let (report_sender, report_receiver) = unbounded::<SearchReport>();

        let handle = thread::Builder::new()
            .name("search".to_string())
            .spawn(move || {
                while let Ok(request) = request_receiver.recv() {
                    match request {
                        SearchRequest::Search { mut game, depth } => {
                            let report = run_search(&mut engine, &mut game, depth);
                            if report_sender.send(report).is_err() {
                                break;
                            }
                        }
                        SearchRequest::NewGame => engine.new_game(),
                        SearchRequest::SetOption { name, value } => {
                            if !engine.set_option(&name, &value) {
                                warn!(%name, %value, "option rejected");
                            }
                        }
                    }
                }
                debug!("search worker shutting down");
            })?;

        Ok(Self {
            request_sender: Some(request_sender),
            report_receiver,
            handle: Some(handle),
        })
    }

    /// Queues a request; false once the worker has stopped.
    pub fn send(&self, request: SearchRequest) -> bool {
        match &self.request_sender {
            Some(sender) => sender.send(request).is_ok(),
            None => false,
        }
    }

    pub fn search(&self, game: Game, depth: Option<u8>) -> bool {
        self.send(SearchRequest::Search { game, depth })
    }

    /// Finished searches, in request order.
    pub fn reports(&self) -> &Receiver<SearchReport> {
        &self.report_receiver
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.request_sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("search worker panicked");
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
