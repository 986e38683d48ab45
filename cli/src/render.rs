use std::fmt::Write;
use tileslide_core::{
    Board, BuildReport, BuilderSession, Direction, Leaderboard, Phase, Session, Tile,
};

use crate::client::MenuView;

fn glyph(tile: Tile) -> char {
    use Direction::*;

    match tile {
        Tile::Blank => '·',
        Tile::Block => '■',
        Tile::Cracked => '▒',
        Tile::Hole => '○',
        Tile::Drill => '✱',
        Tile::Arrow(Up) => '↑',
        Tile::Arrow(Down) => '↓',
        Tile::Arrow(Left) => '←',
        Tile::Arrow(Right) => '→',
        Tile::DoubleArrow(Up) => '⇑',
        Tile::DoubleArrow(Down) => '⇓',
        Tile::DoubleArrow(Left) => '⇐',
        Tile::DoubleArrow(Right) => '⇒',
    }
}

/// Draws the board with row and column numbers, row 0 on top.
pub(crate) fn board(board: &Board) -> String {
    let mut out = String::from("   0 1 2 3 4 5\n");
    for (row, tiles) in board.rows().enumerate() {
        let _ = write!(out, "{} ", row);
        for tile in tiles {
            out.push(' ');
            out.push(glyph(tile));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn status(session: &Session) -> String {
    let phase = match session.phase() {
        Phase::Idle => "idle",
        Phase::Playing if session.is_in_flight() => "moving",
        Phase::Playing => "playing",
        Phase::Won => "solved",
        Phase::LostMoves => "out of moves",
        Phase::LostTime => "time up",
    };
    format!(
        "moves {}/{}  time {}s  score {}  [{}]",
        session.moves_remaining(),
        session.max_moves(),
        session.time_remaining(),
        session.score(),
        phase
    )
}

pub(crate) fn session(session: &Session) -> String {
    format!("{}{}\n", board(session.board()), status(session))
}

pub(crate) fn report(report: &BuildReport) -> String {
    let mut out = format!(
        "arrows {}  holes {}  drills {}  obstacles {}",
        report.arrows, report.holes, report.drills, report.obstacles
    );
    if let Some(issue) = report.issue {
        let _ = write!(out, "\n! {}", issue);
    }
    if let Some(hint) = report.hint {
        let _ = write!(out, "\n? {}", hint);
    }
    out
}

pub(crate) fn builder(builder: &BuilderSession) -> String {
    if let Some(playtest) = builder.playtest() {
        return format!("test run\n{}", session(playtest));
    }

    let title = match builder.title() {
        "" => "(untitled)",
        title => title,
    };
    format!(
        "{}\n{}selected {}  moves {}  time {}s  {}\n{}\n",
        title,
        board(builder.board()),
        tileslide_protocol::tile_name(builder.selected()),
        builder.max_moves(),
        builder.timer_seconds(),
        if builder.is_verified() { "verified" } else { "not verified" },
        report(&builder.check())
    )
}

pub(crate) fn menu(menu: &MenuView) -> String {
    let actions = if menu.can_play() { "[play] [build]" } else { "[build]" };
    match &menu.level {
        Some((title, author)) => format!(
            "{}\nby {}  best {}\n{}\n",
            title, author, menu.best_score, actions
        ),
        None => format!("No level yet\n{}\n", actions),
    }
}

pub(crate) fn leaderboard(leaderboard: &Leaderboard) -> String {
    if leaderboard.is_empty() {
        return "No scores yet\n".to_string();
    }

    let mut out = String::new();
    for (rank, entry) in leaderboard.ranked().iter() {
        let _ = writeln!(
            out,
            "{:>2}. {:<16} {:>5}",
            rank, entry.player_name, entry.score
        );
    }
    out
}
