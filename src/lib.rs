pub mod models;
pub mod mrz_reader;
pub mod processing;
pub mod utils;
pub mod validation;

pub use models::{DocumentCode, DocumentFormat, MrzDate, MrzRange, MrzRecord, MrzSex};
pub use mrz_reader::MrzReader;
pub use processing::{find_mrz, name_to_mrz, parse, to_mrz};
pub use utils::{MrzError, MrzParseError};
pub use validation::{compute_check_digit, compute_check_digit_char};
