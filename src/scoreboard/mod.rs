mod general_scores;
pub mod page;
mod recent_games;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::api::{scores_api, GameRecord, PlayerScores, ScoreDocument, ScoreSource};
use crate::html::Table;
use crate::util::dates;

pub use page::PageWriter;

pub const GENERAL_SCORES_ID: &str = "general-scores";
pub const RECENT_GAMES_ID: &str = "recent-games";
pub const UPDATE_TIME_ID: &str = "update-time";

pub const LOAD_ERROR_MESSAGE: &str = "Erreur de chargement des scores";
const UPDATED_PREFIX: &str = "Dernière mise à jour: ";

/// Numeric keys come from the older format, where players were only numbered.
pub fn display_name(key: &str) -> String {
    if is_numeric_key(key) {
        format!("Joueur {}", key)
    } else {
        key.to_string()
    }
}

/// A key JavaScript's `Number()` would accept: blank, decimal, `Infinity`,
/// or a `0x`/`0o`/`0b` literal.
fn is_numeric_key(key: &str) -> bool {
    let s = key.trim();
    if s.is_empty() || matches!(s, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    // Rust also parses `inf` and `NaN`, which JavaScript does not.
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && s.parse::<f64>().is_ok()
}

/// The three page elements a poll writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    general_scores: Table,
    recent_games: Table,
    update_time: String,
    recent_games_limit: usize,
}

impl ScoreBoard {
    pub fn new(recent_games_limit: usize) -> Self {
        Self {
            general_scores: Table::new(GENERAL_SCORES_ID, &general_scores::HEADER),
            recent_games: Table::new(RECENT_GAMES_ID, &recent_games::HEADER),
            update_time: String::new(),
            recent_games_limit,
        }
    }

    pub fn general_scores(&self) -> &Table {
        &self.general_scores
    }

    pub fn recent_games(&self) -> &Table {
        &self.recent_games
    }

    pub fn update_time(&self) -> &str {
        &self.update_time
    }

    pub fn update_general_scores(&mut self, scores: &PlayerScores) {
        self.general_scores
            .replace_rows(general_scores::build_rows(scores));
    }

    pub fn update_recent_games(&mut self, parties: &[GameRecord]) {
        self.recent_games
            .replace_rows(recent_games::build_rows(parties, self.recent_games_limit));
    }

    pub fn show_document(&mut self, document: &ScoreDocument, updated_at: &DateTime<Local>) {
        self.update_general_scores(&document.scores);
        self.update_recent_games(&document.parties);
        self.update_time = format!("{}{}", UPDATED_PREFIX, dates::format_local_timestamp(updated_at));
    }

    /// Tables keep whatever the last successful poll rendered.
    pub fn show_error(&mut self) {
        self.update_time = LOAD_ERROR_MESSAGE.to_string();
    }
}

/// One poll: fetch, render into the board, then write the page.
///
/// Polls are not serialized against each other. Whichever response arrives
/// last decides what the board shows.
#[tracing::instrument(level = "info", skip_all, fields(source = %source))]
pub async fn load_scores(source: &ScoreSource, board: &Mutex<ScoreBoard>, page: &PageWriter) {
    let result = scores_api::get_scores(source).await;

    let mut board = board.lock().await;
    match result {
        Ok(document) => {
            if document.scores.is_empty() {
                warn!("Scores document lists no players");
            }
            board.show_document(&document, &Local::now());
            info!(
                players = document.scores.len(),
                games = document.parties.len(),
                "Scoreboard updated"
            );
        }
        Err(e) => {
            error!(error = %e, "Failed to load scores");
            board.show_error();
        }
    }

    if let Err(e) = page.write(&board).await {
        error!(error = ?e, path = %page.index_path().display(), "Failed to write scoreboard page");
    }
}
