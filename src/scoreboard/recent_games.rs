use crate::api::GameRecord;
use crate::html::{Cell, Column, Row, TableBuilder, Text};
use crate::scoreboard::display_name;

pub(crate) const HEADER: [&str; 3] = ["Date", "Joueur 1", "Joueur 2"];

/// Keys used by the older two-player format when a game names fewer than two players.
const FALLBACK_KEYS: [&str; 2] = ["1", "2"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Participant {
    pub key: String,
    pub points: i64,
}

impl Participant {
    /// The eliminated player is the one who scored in this game.
    fn is_flagged(&self) -> bool {
        self.points > 0
    }
}

/// The two players of a game, in the order the game lists them.
pub(crate) fn participants(game: &GameRecord) -> [Participant; 2] {
    let mut keys = game.scores.keys();
    FALLBACK_KEYS.map(|fallback| {
        let key = keys.next().filter(|k| !k.is_empty()).unwrap_or(fallback);
        Participant {
            key: key.to_string(),
            points: game.scores.get(key).unwrap_or(0),
        }
    })
}

/// The last `limit` games, most recent first.
pub(crate) fn recent(parties: &[GameRecord], limit: usize) -> Vec<&GameRecord> {
    parties.iter().rev().take(limit).collect()
}

struct PlayerColumn {
    participants: Vec<Participant>,
}

impl Column for PlayerColumn {
    fn len(&self) -> usize {
        self.participants.len()
    }

    fn cell(&self, row_index: usize) -> Cell {
        let participant = &self.participants[row_index];
        Cell::new(format!("{}: {}", display_name(&participant.key), participant.points))
            .highlighted(participant.is_flagged())
            .with_player(participant.key.as_str())
    }
}

impl From<PlayerColumn> for Box<dyn Column> {
    fn from(c: PlayerColumn) -> Self {
        Box::new(c)
    }
}

pub(crate) fn build_rows(parties: &[GameRecord], limit: usize) -> Vec<Row> {
    let games = recent(parties, limit);
    let (first, second): (Vec<Participant>, Vec<Participant>) = games
        .iter()
        .map(|game| {
            let [a, b] = participants(game);
            (a, b)
        })
        .unzip();

    TableBuilder::new()
        .add_column(Text::new(games.iter().map(|g| g.date.clone()).collect()))
        .add_column(PlayerColumn {
            participants: first,
        })
        .add_column(PlayerColumn {
            participants: second,
        })
        .build()
}
