//! ICAO 9303 check digit computation.
//!
//! Every character is mapped to a value (`<` = 0, `0`-`9` = 0-9,
//! `A`-`Z` = 10-35), multiplied by the repeating weights 7, 3, 1 and the
//! sum is taken modulo 10. Characters outside the MRZ alphabet (including
//! lowercase letters) are rejected with a parse error instead of being
//! given an arbitrary value.

use crate::processing::transliteration::FILLER;
use crate::utils::MrzParseError;

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of a single MRZ character, `None` outside the alphabet.
pub fn character_value(c: char) -> Option<u32> {
    match c {
        FILLER => Some(0),
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

pub fn compute_check_digit(value: &str) -> Result<u8, MrzParseError> {
    let mut sum = 0u32;
    for (position, c) in value.chars().enumerate() {
        let char_value = character_value(c).ok_or_else(|| {
            MrzParseError::new(
                format!("Invalid character '{}' at position {} in check digit input", c, position),
                value,
                None,
            )
        })?;
        // running sum stays below 10
        sum = (sum + char_value * WEIGHTS[position % WEIGHTS.len()]) % 10;
    }
    Ok(sum as u8)
}

pub fn compute_check_digit_char(value: &str) -> Result<char, MrzParseError> {
    let digit = compute_check_digit(value)?;
    Ok(char::from(b'0' + digit))
}
