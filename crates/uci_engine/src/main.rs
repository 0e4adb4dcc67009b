mod protocol;
mod worker;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use chess_core::{parse_uci_move, set_position_from_uci, Engine, Game};
use clap::{Parser, Subcommand};
use crossbeam_channel::{select, unbounded};
use minimax_engine::{MinimaxEngine, SearchConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::protocol::{bestmove_line, id_lines, info_line, parse_command, UciCommand};
use crate::worker::{run_search, SearchRequest, SearchWorker};

#[derive(Parser, Debug)]
#[command(name = "uci_engine", about = "Fixed-depth alpha-beta chess engine")]
struct Args {
    /// TOML file with search settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search depth in plies, overrides the config file
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..))]
    depth: Option<u8>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Speak UCI on stdin/stdout (the default)
    Uci,
    /// Search one position and print the result
    Analyze {
        /// Starting position, the standard one if omitted
        #[arg(long)]
        fen: Option<String>,

        /// Moves to play from the starting position, in UCI notation
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    // stdout belongs to the protocol
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading search config from {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(&args)?;
    debug!(?config, "search config");

    match args.command {
        None | Some(Command::Uci) => run_uci(config),
        Some(Command::Analyze { fen, moves, json }) => run_analyze(config, fen, &moves, json),
    }
}

fn run_analyze(config: SearchConfig, fen: Option<String>, moves: &[String], json: bool) -> Result<()> {
    let mut game = match fen {
        Some(fen) => Game::from_fen(&fen)?,
        None => Game::startpos(),
    };
    for txt in moves {
        let Some(mv) = parse_uci_move(game.board(), txt) else {
            bail!("illegal move {txt} in position {}", game.fen());
        };
        game.play(mv)?;
    }

    let mut engine = MinimaxEngine::with_config(config);
    let report = run_search(&mut engine, &mut game, None);

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "position:  {}", report.fen)?;
        writeln!(
            stdout,
            "best move: {}",
            report.best_move.as_deref().unwrap_or("(none)")
        )?;
        writeln!(stdout, "score:     {} cp (White's view)", report.score)?;
        writeln!(stdout, "depth:     {}", report.depth)?;
        writeln!(stdout, "nodes:     {}", report.nodes)?;
        writeln!(stdout, "time:      {} ms", report.elapsed_ms)?;
    }
    Ok(())
}

fn run_uci(config: SearchConfig) -> Result<()> {
    let engine = MinimaxEngine::with_config(config);
    let name = engine.name().to_string();
    let author = engine.author().to_string();
    let mut default_depth = engine.default_depth();
    let worker = SearchWorker::spawn(engine).context("starting search thread")?;

    // Stdin is read on its own thread so results can be printed while waiting
    let (line_sender, line_receiver) = unbounded::<String>();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_sender.send(line).is_err() {
                    break;
                }
            }
        })
        .context("starting stdin reader")?;

    let mut game = Game::startpos();
    let mut stdout = io::stdout();
    info!(%name, "uci loop started");

    loop {
        select! {
            recv(line_receiver) -> line => {
                // Stdin closed: same as quit
                let Ok(line) = line else { break };
                let Some(command) = parse_command(&line) else { continue };

                match command {
                    UciCommand::Uci => {
                        for reply in id_lines(&name, &author, default_depth) {
                            writeln!(stdout, "{reply}")?;
                        }
                    }
                    UciCommand::IsReady => writeln!(stdout, "readyok")?,
                    UciCommand::SetOption { name, value } => {
                        if name.eq_ignore_ascii_case("depth") {
                            match value.parse::<u8>() {
                                Ok(depth) if depth >= 1 => default_depth = depth,
                                _ => warn!(%value, "ignoring invalid depth"),
                            }
                        }
                        worker.send(SearchRequest::SetOption { name, value });
                    }
                    UciCommand::NewGame => {
                        game = Game::startpos();
                        worker.send(SearchRequest::NewGame);
                    }
                    UciCommand::Position(args) => {
                        let args: Vec<&str> = args.iter().map(String::as_str).collect();
                        if let Err(err) = set_position_from_uci(&mut game, &args) {
                            warn!(%err, "bad position command");
                            writeln!(stdout, "info string {err}")?;
                        }
                    }
                    UciCommand::Go { depth } => {
                        if !worker.search(game.clone(), depth) {
                            bail!("search thread stopped");
                        }
                    }
                    UciCommand::Stop => {
                        // Searches are fixed-depth; the result arrives when it is done
                        debug!("stop received");
                    }
                    UciCommand::Quit => break,
                    UciCommand::Unknown(cmd) => debug!(%cmd, "ignoring unknown command"),
                }
                stdout.flush()?;
            }
            recv(worker.reports()) -> report => {
                let Ok(report) = report else {
                    bail!("search thread stopped");
                };
                writeln!(stdout, "{}", info_line(&report))?;
                writeln!(stdout, "{}", bestmove_line(&report))?;
                stdout.flush()?;
            }
        }
    }

    Ok(())
}
