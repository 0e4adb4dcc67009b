//! UCI command parsing and reply formatting.

use crate::worker::SearchReport;

/// One line of input from the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    NewGame,
    /// Arguments after `position`, handed to `set_position_from_uci`
    Position(Vec<String>),
    /// `None` means the engine's configured depth
    Go { depth: Option<u8> },
    Stop,
    Quit,
    Unknown(String),
}

/// Parses one input line; blank lines give `None`.
pub fn parse_command(line: &str) -> Option<UciCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    let command = match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "setoption" => parse_setoption(&rest)?,
        "ucinewgame" => UciCommand::NewGame,
        "position" => UciCommand::Position(rest.iter().map(|s| s.to_string()).collect()),
        "go" => UciCommand::Go {
            depth: parse_go_depth(&rest),
        },
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        other => UciCommand::Unknown(other.to_string()),
    };
    Some(command)
}

// setoption name <id words> [value <x words>]
fn parse_setoption(args: &[&str]) -> Option<UciCommand> {
    if args.first() != Some(&"name") {
        return Some(UciCommand::Unknown("setoption".to_string()));
    }
    let value_idx = args.iter().position(|&w| w == "value");
    let name_end = value_idx.unwrap_or(args.len());
    let name = args[1..name_end].join(" ");
    if name.is_empty() {
        return Some(UciCommand::Unknown("setoption".to_string()));
    }
    let value = value_idx
        .map(|idx| args[idx + 1..].join(" "))
        .unwrap_or_default();

    Some(UciCommand::SetOption { name, value })
}

/// Only `depth` is honoured; clock and node limits are ignored.
fn parse_go_depth(args: &[&str]) -> Option<u8> {
    let idx = args.iter().position(|&w| w == "depth")?;
    let depth = args.get(idx + 1)?.parse::<u8>().ok()?;
    (depth >= 1).then_some(depth)
}

/// Lines answering `uci`.
pub fn id_lines(engine_name: &str, author: &str, default_depth: u8) -> Vec<String> {
    vec![
        format!("id name {engine_name}"),
        format!("id author {author}"),
        format!("option name Depth type spin default {default_depth} min 1 max 12"),
        "option name CachePolicy type combo default persistent var persistent var per-search"
            .to_string(),
        "option name CacheMaxEntries type spin default 0 min 0 max 100000000".to_string(),
        "uciok".to_string(),
    ]
}

/// UCI scores are from the side to move, the engine's are from White.
pub fn uci_score(report: &SearchReport) -> i32 {
    if report.white_to_move {
        report.score
    } else {
        -report.score
    }
}

pub fn info_line(report: &SearchReport) -> String {
    format!(
        "info depth {} score cp {} nodes {} time {}",
        report.depth,
        uci_score(report),
        report.nodes,
        report.elapsed_ms
    )
}

pub fn bestmove_line(report: &SearchReport) -> String {
    match &report.best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
