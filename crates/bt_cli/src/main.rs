//! Courtside Tagger CLI
//!
//! Interactive line-oriented front end over the `bt_core` session API:
//! set up the game, tag possessions player-by-player, review metrics, and
//! export CSV/JSON at the buzzer.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use bt_core::{
    compute_metrics, import_roster_csv, AddOutcome, ExportBundle, GroupBy, MetricsTable, Quarter,
    SelectionStatus, SessionError, TagResult, TagSession,
};

#[derive(Parser)]
#[command(name = "bt_cli")]
#[command(about = "Courtside basketball play tagger", long_about = None)]
struct Cli {
    /// Bulk roster import CSV with headers: name,image_url
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Opponent name
    #[arg(long)]
    opponent: Option<String>,

    /// Game date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Quarter (1-4 or OT)
    #[arg(long)]
    quarter: Option<String>,

    /// Allow tagging before opponent/date/quarter are all set
    #[arg(long, default_value = "false")]
    no_context_gate: bool,

    /// Directory export files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

struct App {
    session: TagSession,
    /// Player narrowing for the per-play metrics view and export.
    filter: Option<String>,
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut session = if cli.no_context_gate {
        TagSession::without_context_gate()
    } else {
        TagSession::new()
    };

    if let Some(opponent) = cli.opponent {
        session.context.opponent = opponent;
    }
    if let Some(date) = cli.date {
        session.context.game_date = Some(date);
    }
    if let Some(quarter) = cli.quarter.as_deref() {
        session.context.quarter = Quarter::parse(quarter);
    }

    if let Some(path) = cli.roster {
        let file = File::open(&path)
            .with_context(|| format!("cannot open roster file {}", path.display()))?;
        let summary = import_roster_csv(file, &mut session.roster);
        println!("Roster imported: {}", summary);
    }

    let mut app = App { session, filter: None, out_dir: cli.out_dir };

    println!("Courtside Tagger {} — type 'help' for commands", bt_core::VERSION);
    print_context(&app.session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !app.dispatch(line)? {
            break;
        }
    }

    Ok(())
}

impl App {
    /// Handle one command line. Returns `false` when the operator quits.
    fn dispatch(&mut self, line: &str) -> Result<bool> {
        let (command, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "quit" | "exit" => return Ok(false),

            // Game setup
            "opponent" => {
                self.session.context.opponent = rest.to_string();
                print_context(&self.session);
            }
            "date" => match rest.parse::<NaiveDate>() {
                Ok(date) => {
                    self.session.context.game_date = Some(date);
                    print_context(&self.session);
                }
                Err(_) => println!("Expected a date like 2026-02-14."),
            },
            "quarter" => {
                let quarter = Quarter::parse(rest);
                if quarter.is_set() {
                    self.session.context.quarter = quarter;
                    print_context(&self.session);
                } else {
                    println!("Expected 1, 2, 3, 4 or OT.");
                }
            }
            "gate" => match rest {
                "on" => self.session.set_require_context(true),
                "off" => self.session.set_require_context(false),
                _ => println!("Usage: gate <on|off>"),
            },

            // Roster & playbook
            "add-player" => {
                let (name, url) = match rest.rsplit_once(' ') {
                    Some((name, url)) if url.starts_with("http") => (name, Some(url)),
                    _ => (rest, None),
                };
                let photo = url.map(|u| bt_core::PhotoSource::Url(u.to_string()));
                report_add(self.session.add_player(name, photo), name, "roster");
            }
            "remove-player" => {
                if self.session.remove_player(rest) {
                    println!("Removed {}.", rest);
                } else {
                    println!("No player named {}.", rest);
                }
            }
            "clear-roster" => {
                self.session.clear_roster();
                self.filter = None;
                println!("Roster cleared.");
            }
            "add-play" => report_add(self.session.add_play(rest), rest, "playbook"),
            "roster" => {
                for name in self.session.roster.names() {
                    println!("  {}", name);
                }
                if self.session.roster.is_empty() {
                    println!("  (roster is empty)");
                }
            }
            "plays" => {
                for name in self.session.playbook.names() {
                    println!("  {}", name);
                }
                if self.session.playbook.is_empty() {
                    println!("  (playbook is empty)");
                }
            }

            // Selection & tagging
            "player" => report_session(self.session.select_player(rest), || {
                format!("Tagging player: {}", rest)
            }),
            "play" => report_session(self.session.select_play(rest), || {
                format!("Selected play: {}", rest)
            }),
            "tag" => match parse_result_token(rest) {
                Some(result) => match self.session.tag(result) {
                    Ok(event) => {
                        println!("{} | {} | {} (+{})", event.player, event.play, event.result, event.points)
                    }
                    Err(err) => println!("{}", err),
                },
                None => println!("Expected one of: m2 m3 x2 x3 foul (or the full labels)."),
            },
            "undo" => match self.session.undo_last() {
                Some(event) => println!("Removed: {} {} by {}.", event.play, event.result, event.player),
                None => println!("No tags to undo."),
            },
            "undo-player" => match self.session.selection().player() {
                Some(player) => {
                    let player = player.to_string();
                    match self.session.undo_last_for_selected() {
                        Some(event) => println!("Removed last tag for {}: {} {}.", player, event.play, event.result),
                        None => println!("No tags found for {}.", player),
                    }
                }
                None => println!("Select a player first."),
            },
            "reset" => {
                self.session.reset_game();
                println!("Game state cleared.");
            }

            // Views
            "status" => {
                print_context(&self.session);
                print_selection(&self.session);
                println!("Logged events: {}", self.session.log().len());
            }
            "log" => print_log(&self.session),
            "metrics" => {
                let group_by = match rest {
                    "" | "play" => GroupBy::Play,
                    "player" => GroupBy::Player,
                    _ => {
                        println!("Usage: metrics [play|player]");
                        return Ok(true);
                    }
                };
                let events = match group_by {
                    // Per-play view honors the player filter; per-player is teamwide
                    GroupBy::Play => self.session.filtered_events(self.filter.as_deref()),
                    GroupBy::Player => self.session.log().events().to_vec(),
                };
                if let (GroupBy::Play, Some(player)) = (group_by, self.filter.as_deref()) {
                    println!("(Filtered: {})", player);
                }
                print_metrics(&compute_metrics(&events, group_by));
            }
            "filter" => {
                if rest == "all" || rest.is_empty() {
                    self.filter = None;
                    println!("Showing all players.");
                } else if self.session.roster.contains(rest) {
                    self.filter = Some(rest.to_string());
                    println!("Per-play metrics filtered to {}.", rest);
                } else {
                    println!("No player named {}.", rest);
                }
            }
            "export" => match ExportBundle::from_session(&self.session, self.filter.as_deref()) {
                Ok(bundle) => {
                    bundle.write_to_dir(&self.out_dir)?;
                    for file in &bundle.files {
                        println!("Wrote {}", self.out_dir.join(&file.name).display());
                    }
                }
                Err(err) => println!("{}", err),
            },

            other => println!("Unknown command '{}'. Type 'help'.", other),
        }

        Ok(true)
    }
}

/// Short and long forms for tagging outcomes.
fn parse_result_token(token: &str) -> Option<TagResult> {
    match token.to_lowercase().as_str() {
        "m2" | "made2" | "made 2" => Some(TagResult::Made2),
        "m3" | "made3" | "made 3" => Some(TagResult::Made3),
        "x2" | "miss2" | "missed2" | "missed 2" => Some(TagResult::Missed2),
        "x3" | "miss3" | "missed3" | "missed 3" => Some(TagResult::Missed3),
        "f" | "foul" => Some(TagResult::Foul),
        _ => None,
    }
}

fn report_add(outcome: AddOutcome, name: &str, store: &str) {
    match outcome {
        AddOutcome::Added => println!("Added {} to {}.", name, store),
        AddOutcome::Duplicate => println!("{} already in {}.", name, store),
        AddOutcome::EmptyName => println!("Name is empty."),
    }
}

fn report_session(result: Result<(), SessionError>, on_ok: impl FnOnce() -> String) {
    match result {
        Ok(()) => println!("{}", on_ok()),
        Err(err) => println!("{}", err),
    }
}

fn print_context(session: &TagSession) {
    let ctx = &session.context;
    println!(
        "Game: vs {} | Date: {} | Quarter: {}{}",
        if ctx.opponent.is_empty() { "?" } else { ctx.opponent.as_str() },
        if ctx.date_label().is_empty() { "?".to_string() } else { ctx.date_label() },
        if ctx.quarter.is_set() { ctx.quarter.label() } else { "?" },
        if session.require_context() && !ctx.is_complete() {
            "  (tagging disabled until setup is complete)"
        } else {
            ""
        }
    );
}

fn print_selection(session: &TagSession) {
    match session.selection().status() {
        SelectionStatus::NoPlayer => println!("Selection: none"),
        SelectionStatus::PlayerOnly(player) => println!("Selection: {} (pick a play)", player),
        SelectionStatus::PlayerAndPlay(player, play) => {
            println!("Selection: {} running {}", player, play)
        }
    }
}

fn print_log(session: &TagSession) {
    if session.log().is_empty() {
        println!("No events logged yet.");
        return;
    }
    for event in session.log().events() {
        println!(
            "{}  Q{:<2} {:<16} {:<16} {:<9} {}",
            event.timestamp.format("%H:%M:%S"),
            event.quarter,
            event.player,
            event.play,
            event.result,
            event.points
        );
    }
}

fn print_metrics(table: &MetricsTable) {
    if table.is_empty() {
        println!("No data yet — tag some plays to see metrics.");
        return;
    }
    let key_width = table
        .rows
        .iter()
        .map(|r| r.key.len())
        .chain(std::iter::once(table.group_label.len()))
        .max()
        .unwrap_or(6);

    let headers = table.headers();
    println!(
        "{:<key_width$}  {:>8}  {:>6}  {:>5}  {:>9}  {:>12}",
        headers[0], headers[1], headers[2], headers[3], headers[4], headers[5]
    );
    for row in &table.rows {
        println!(
            "{:<key_width$}  {:>8}  {:>6}  {:>5.2}  {:>8.1}%  {:>11.1}%",
            row.key,
            row.attempts,
            row.points,
            row.ppp,
            row.frequency * 100.0,
            row.success_rate * 100.0
        );
    }
}

fn print_help() {
    println!(
        "Game setup:\n\
         \x20 opponent <name>       set the opponent\n\
         \x20 date <YYYY-MM-DD>     set the game date\n\
         \x20 quarter <1-4|OT>      set the quarter\n\
         \x20 gate <on|off>         toggle the setup gate for tagging\n\
         Roster & playbook:\n\
         \x20 add-player <name> [url]   add a player (optional photo URL)\n\
         \x20 remove-player <name>      remove a player\n\
         \x20 clear-roster              remove every player\n\
         \x20 add-play <name>           add a play\n\
         \x20 roster / plays            list entries\n\
         Tagging:\n\
         \x20 player <name>         select the player to tag for\n\
         \x20 play <name>           select the play\n\
         \x20 tag <m2|m3|x2|x3|foul>    record an outcome\n\
         \x20 undo                  remove the most recent tag\n\
         \x20 undo-player           remove the selected player's last tag\n\
         \x20 reset                 clear the log and selection\n\
         Views & export:\n\
         \x20 status / log          show session state\n\
         \x20 metrics [play|player] aggregated efficiency table\n\
         \x20 filter <name|all>     narrow per-play metrics to one player\n\
         \x20 export                write CSV/JSON files to the out dir\n\
         \x20 quit                  leave"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_token() {
        assert_eq!(parse_result_token("m2"), Some(TagResult::Made2));
        assert_eq!(parse_result_token("Made 3"), Some(TagResult::Made3));
        assert_eq!(parse_result_token("x3"), Some(TagResult::Missed3));
        assert_eq!(parse_result_token("FOUL"), Some(TagResult::Foul));
        assert_eq!(parse_result_token("dunk"), None);
    }
}
