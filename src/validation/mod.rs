pub mod checksum;
pub mod expiry;
pub mod mrz;

pub use checksum::{compute_check_digit, compute_check_digit_char};
pub use expiry::ExpiryValidator;
pub use mrz::MrzValidator;
