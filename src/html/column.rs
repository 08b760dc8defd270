use crate::html::Cell;

pub trait Column {
    fn len(&self) -> usize;
    fn cell(&self, row_index: usize) -> Cell;
}

impl std::fmt::Debug for dyn Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column({} rows)", self.len())
    }
}
