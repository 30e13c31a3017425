pub mod finder;
pub mod parser;
mod records;
pub mod transliteration;

pub use finder::find_mrz;
pub use parser::{parse, MrzParser};
pub use transliteration::{name_to_mrz, to_mrz};
