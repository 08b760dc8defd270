use crate::api::PlayerScores;
use crate::html::{Row, TableBuilder, Text};
use crate::scoreboard::display_name;

pub(crate) const HEADER: [&str; 3] = ["Position", "Joueur", "Score"];

/// Highest score first. Equal scores keep their document order.
pub(crate) fn sorted_scores(scores: &PlayerScores) -> Vec<(&str, i64)> {
    let mut sorted: Vec<(&str, i64)> = scores.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

pub(crate) fn build_rows(scores: &PlayerScores) -> Vec<Row> {
    let sorted = sorted_scores(scores);

    TableBuilder::new()
        .add_column(Text::new(
            (1..=sorted.len()).map(|rank| rank.to_string()).collect(),
        ))
        .add_column(Text::new(
            sorted.iter().map(|(name, _)| display_name(name)).collect(),
        ))
        .add_column(Text::new(
            sorted.iter().map(|(_, score)| score.to_string()).collect(),
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(row: &Row) -> Vec<&str> {
        row.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn sorts_descending_with_stable_ties() {
        let scores: PlayerScores = [("Zoe", 2), ("Alice", 5), ("Bob", 2), ("Eve", 9)]
            .into_iter()
            .collect();

        assert_eq!(
            sorted_scores(&scores),
            vec![("Eve", 9), ("Alice", 5), ("Zoe", 2), ("Bob", 2)]
        );
    }

    #[test]
    fn one_ranked_row_per_player() {
        let scores: PlayerScores = [("Bob", 1), ("Alice", 4), ("Carol", 3)].into_iter().collect();
        let rows = build_rows(&scores);

        assert_eq!(rows.len(), scores.len());
        assert_eq!(texts(&rows[0]), vec!["1", "Alice", "4"]);
        assert_eq!(texts(&rows[1]), vec!["2", "Carol", "3"]);
        assert_eq!(texts(&rows[2]), vec!["3", "Bob", "1"]);

        let displayed: Vec<i64> = rows.iter().map(|r| r[2].text.parse().unwrap()).collect();
        assert!(displayed.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn legacy_numeric_players_get_a_label() {
        let scores: PlayerScores = [("1", 3), ("2", 4)].into_iter().collect();
        let rows = build_rows(&scores);

        assert_eq!(texts(&rows[0]), vec!["1", "Joueur 2", "4"]);
        assert_eq!(texts(&rows[1]), vec!["2", "Joueur 1", "3"]);
    }

    #[test]
    fn no_players_no_rows() {
        assert!(build_rows(&PlayerScores::default()).is_empty());
    }
}
