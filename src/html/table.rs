use crate::html::{escape, Column};

pub const HIGHLIGHT_CLASS: &str = "highlight";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub highlight: bool,
    /// Raw player key, exposed as `data-player`.
    pub player: Option<String>,
}

pub type Row = Vec<Cell>;

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
            player: None,
        }
    }

    pub fn highlighted(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_player(mut self, key: impl Into<String>) -> Self {
        self.player = Some(key.into());
        self
    }

    fn to_html(&self) -> String {
        let mut attrs = String::new();
        if self.highlight {
            attrs.push_str(&format!(" class=\"{}\"", HIGHLIGHT_CLASS));
        }
        if let Some(ref player) = self.player {
            attrs.push_str(&format!(" data-player=\"{}\"", escape(player)));
        }
        format!("<td{}>{}</td>", attrs, escape(&self.text))
    }
}

/// A table element: a fixed header row followed by replaceable data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    id: &'static str,
    header: Vec<&'static str>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(id: &'static str, header: &[&'static str]) -> Self {
        Self {
            id,
            header: header.to_vec(),
            rows: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn header(&self) -> &[&'static str] {
        &self.header
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Drops every data row and installs `rows`. The header row is kept.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<table id=\"{}\">\n", self.id);

        let header_cells: Vec<String> = self
            .header
            .iter()
            .map(|h| format!("<th>{}</th>", escape(h)))
            .collect();
        html.push_str(&format!("    <tr>{}</tr>\n", header_cells.concat()));

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(Cell::to_html).collect();
            html.push_str(&format!("    <tr>{}</tr>\n", cells.concat()));
        }

        html.push_str("</table>");
        html
    }
}

/// Assembles rows from equally long columns.
pub struct TableBuilder {
    columns: Vec<Box<dyn Column>>,
    row_count: Option<usize>,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self {
            columns: Vec::new(),
            row_count: None,
        }
    }

    pub(crate) fn add_column(mut self, column: impl Into<Box<dyn Column>>) -> Self {
        let column = column.into();
        let column_len = column.len();

        match self.row_count {
            None => self.row_count = Some(column_len),
            Some(existing) if existing == column_len => {}
            Some(existing) => {
                panic!(
                    "column length mismatch: expected {} rows but received {}",
                    existing, column_len
                );
            }
        }

        self.columns.push(column);
        self
    }

    pub(crate) fn build(self) -> Vec<Row> {
        let row_count = self.row_count.unwrap_or(0);

        (0..row_count)
            .map(|row_index| self.columns.iter().map(|col| col.cell(row_index)).collect())
            .collect()
    }
}
