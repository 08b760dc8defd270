use std::path::{Path, PathBuf};

use tracing::debug;

use crate::html::escape;
use crate::scoreboard::{ScoreBoard, UPDATE_TIME_ID};

const INDEX_FILE_NAME: &str = "index.html";
const PAGE_TITLE: &str = "Scores de la Roulette Russe";

const STYLE: &str = r#"        body {
            font-family: 'Arial', sans-serif;
            background-color: #2c3e50;
            color: #ecf0f1;
            margin: 0;
            padding: 20px;
            display: flex;
            flex-direction: column;
            align-items: center;
        }

        h1 {
            color: #e74c3c;
            text-align: center;
            margin-bottom: 30px;
        }

        .container {
            display: flex;
            justify-content: space-between;
            width: 90%;
            max-width: 1000px;
        }

        .section {
            background-color: #34495e;
            border-radius: 10px;
            padding: 20px;
            margin: 10px;
            width: 45%;
        }

        h2 {
            color: #f39c12;
            border-bottom: 1px solid #f39c12;
            padding-bottom: 10px;
        }

        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }

        th, td {
            padding: 12px;
            text-align: left;
            border-bottom: 1px solid #576574;
        }

        th {
            background-color: #2980b9;
        }

        .highlight {
            background-color: rgba(46, 204, 113, 0.2);
        }

        .refresh-btn {
            background-color: #2ecc71;
            color: white;
            padding: 10px 20px;
            text-decoration: none;
            font-size: 16px;
            margin: 20px 0;
            border-radius: 5px;
        }

        .last-update {
            font-size: 12px;
            color: #bdc3c7;
            text-align: center;
            margin-top: 10px;
        }
"#;

/// Renders the board as `index.html` inside the output directory.
#[derive(Debug, Clone)]
pub struct PageWriter {
    output_dir: PathBuf,
    refresh_secs: u64,
}

impl PageWriter {
    pub fn new(output_dir: impl Into<PathBuf>, refresh_secs: u64) -> Self {
        Self {
            output_dir: output_dir.into(),
            refresh_secs,
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE_NAME)
    }

    pub fn render(&self, board: &ScoreBoard) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta http-equiv="refresh" content="{refresh}">
    <title>{title}</title>
    <style>
{style}    </style>
</head>
<body>
    <h1>🔫 SCORES DE LA ROULETTE RUSSE 🔫</h1>

    <a class="refresh-btn" href="{index}">Rafraîchir les scores</a>

    <div class="container">
        <div class="section">
            <h2>Classement Général</h2>
{general}
        </div>

        <div class="section">
            <h2>Parties Récentes</h2>
{recent}
        </div>
    </div>

    <p class="last-update" id="{update_id}">{update_time}</p>
</body>
</html>
"#,
            refresh = self.refresh_secs,
            title = PAGE_TITLE,
            style = STYLE,
            index = INDEX_FILE_NAME,
            general = board.general_scores().to_html(),
            recent = board.recent_games().to_html(),
            update_id = UPDATE_TIME_ID,
            update_time = escape(board.update_time()),
        )
    }

    /// Writes through a temporary file so a browser never reads half a page.
    pub async fn write(&self, board: &ScoreBoard) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let index_path = self.index_path();
        let tmp_path = tmp_path_for(&index_path);
        tokio::fs::write(&tmp_path, self.render(board)).await?;
        tokio::fs::rename(&tmp_path, &index_path).await?;

        debug!(path = %index_path.display(), "Wrote scoreboard page");
        Ok(index_path)
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
