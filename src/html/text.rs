use crate::html::Cell;

/// A column of plain text cells.
pub struct Text {
    values: Vec<String>,
}

impl Text {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl crate::html::Column for Text {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn cell(&self, row_index: usize) -> Cell {
        Cell::new(self.values[row_index].clone())
    }
}

impl From<Text> for Box<dyn crate::html::Column> {
    fn from(t: Text) -> Self {
        Box::new(t)
    }
}
