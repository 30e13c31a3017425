pub mod data;
pub mod date;
pub mod document_code;
pub mod range;

pub use data::*;
pub use date::{MrzDate, DEFAULT_CENTURY_PIVOT};
pub use document_code::DocumentCode;
pub use range::MrzRange;
