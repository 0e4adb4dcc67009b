use super::*;

fn report(best_move: Option<&str>, score: i32, white_to_move: bool) -> SearchReport {
    SearchReport {
        fen: String::new(),
        white_to_move,
        best_move: best_move.map(str::to_string),
        score,
        depth: 3,
        nodes: 1234,
        elapsed_ms: 7,
    }
}

#[test]
fn test_simple_commands() {
    assert_eq!(parse_command("uci"), Some(UciCommand::Uci));
    assert_eq!(parse_command("  isready  "), Some(UciCommand::IsReady));
    assert_eq!(parse_command("ucinewgame"), Some(UciCommand::NewGame));
    assert_eq!(parse_command("stop"), Some(UciCommand::Stop));
    assert_eq!(parse_command("quit"), Some(UciCommand::Quit));
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("   "), None);
    assert_eq!(
        parse_command("debug on"),
        Some(UciCommand::Unknown("debug".to_string()))
    );
}

#[test]
fn test_position_keeps_arguments() {
    assert_eq!(
        parse_command("position startpos moves e2e4 e7e5"),
        Some(UciCommand::Position(vec![
            "startpos".to_string(),
            "moves".to_string(),
            "e2e4".to_string(),
            "e7e5".to_string(),
        ]))
    );
}

#[test]
fn test_go_depth() {
    assert_eq!(parse_command("go"), Some(UciCommand::Go { depth: None }));
    assert_eq!(parse_command("go depth 4"), Some(UciCommand::Go { depth: Some(4) }));
    assert_eq!(
        parse_command("go wtime 1000 btime 1000 depth 2"),
        Some(UciCommand::Go { depth: Some(2) })
    );
    assert_eq!(parse_command("go depth 0"), Some(UciCommand::Go { depth: None }));
    assert_eq!(parse_command("go depth"), Some(UciCommand::Go { depth: None }));
    assert_eq!(parse_command("go infinite"), Some(UciCommand::Go { depth: None }));
}

#[test]
fn test_setoption() {
    assert_eq!(
        parse_command("setoption name Depth value 5"),
        Some(UciCommand::SetOption {
            name: "Depth".to_string(),
            value: "5".to_string()
        })
    );
    assert_eq!(
        parse_command("setoption name Cache Policy value per-search"),
        Some(UciCommand::SetOption {
            name: "Cache Policy".to_string(),
            value: "per-search".to_string()
        })
    );
    assert_eq!(
        parse_command("setoption name Clear"),
        Some(UciCommand::SetOption {
            name: "Clear".to_string(),
            value: String::new()
        })
    );
    assert_eq!(
        parse_command("setoption Depth 5"),
        Some(UciCommand::Unknown("setoption".to_string()))
    );
}

#[test]
fn test_id_lines_end_with_uciok() {
    let lines = id_lines("Minimax v1.0", "ML-chess", 3);
    assert_eq!(lines[0], "id name Minimax v1.0");
    assert_eq!(lines[1], "id author ML-chess");
    assert!(lines.iter().any(|l| l.contains("option name Depth type spin default 3")));
    assert_eq!(lines.last().map(String::as_str), Some("uciok"));
}

#[test]
fn test_score_is_from_side_to_move() {
    assert_eq!(uci_score(&report(None, 150, true)), 150);
    assert_eq!(uci_score(&report(None, 150, false)), -150);
}

#[test]
fn test_info_and_bestmove_lines() {
    let white = report(Some("e2e4"), 20, true);
    assert_eq!(info_line(&white), "info depth 3 score cp 20 nodes 1234 time 7");
    assert_eq!(bestmove_line(&white), "bestmove e2e4");

    let mated = report(None, 10_000, false);
    assert_eq!(info_line(&mated), "info depth 3 score cp -10000 nodes 1234 time 7");
    assert_eq!(bestmove_line(&mated), "bestmove 0000");
}
