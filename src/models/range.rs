use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open column window `[column, column_to)` on one MRZ row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MrzRange {
    pub column: usize,
    pub column_to: usize,
    pub row: usize,
}

impl MrzRange {
    pub const fn new(column: usize, column_to: usize, row: usize) -> Self {
        debug_assert!(column < column_to);
        MrzRange {
            column,
            column_to,
            row,
        }
    }

    /// Single-character window, used for check digits and the sex field.
    pub const fn at(column: usize, row: usize) -> Self {
        MrzRange::new(column, column + 1, row)
    }

    pub fn len(&self) -> usize {
        self.column_to - self.column
    }

    pub fn is_empty(&self) -> bool {
        self.column_to <= self.column
    }
}

impl fmt::Display for MrzRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{},{}", self.column, self.column_to, self.row)
    }
}
