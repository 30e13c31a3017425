//! Mapping of arbitrary text into the MRZ alphabet (`A`-`Z`, `0`-`9`, `<`).
//!
//! Transliteration is lossy and never fails: accented letters fold to
//! their base letter, ligatures expand, apostrophes disappear and anything
//! else that cannot be represented becomes the filler character.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const FILLER: char = '<';

const APOSTROPHES: [char; 6] = ['\'', '\u{2019}', '\u{2018}', '`', '\u{00B4}', '\u{02BC}'];

/// Letters without a canonical decomposition.
fn expand(c: char) -> Option<&'static str> {
    match c {
        'Æ' | 'æ' => Some("AE"),
        'Œ' | 'œ' => Some("OE"),
        'Ĳ' | 'ĳ' => Some("IJ"),
        'ß' | 'ẞ' => Some("SS"),
        'Ø' | 'ø' => Some("OE"),
        'Þ' | 'þ' => Some("TH"),
        'Ð' | 'ð' | 'Đ' | 'đ' => Some("D"),
        'Ł' | 'ł' => Some("L"),
        _ => None,
    }
}

pub fn is_mrz_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == FILLER
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn transliterate_token(token: &str) -> String {
    let mut expanded = String::with_capacity(token.len());
    for c in token.chars().filter(|c| !APOSTROPHES.contains(c)) {
        match expand(c) {
            Some(replacement) => expanded.push_str(replacement),
            None => expanded.push(c),
        }
    }

    expanded
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if is_mrz_char(upper) {
                upper
            } else {
                FILLER
            }
        })
        .collect()
}

fn tokens(text: &str) -> Vec<String> {
    text.split(is_separator)
        .map(transliterate_token)
        .filter(|token| !token.is_empty())
        .collect()
}

fn fit(mut value: String, width: usize) -> String {
    value.truncate(width);
    while value.len() < width {
        value.push(FILLER);
    }
    value
}

/// Converts free text to the MRZ alphabet, collapsing separator runs to a
/// single filler, then truncates or pads to `width`.
pub fn to_mrz(text: &str, width: usize) -> String {
    fit(tokens(text).join("<"), width)
}

fn compose(surnames: &[String], given_names: &[String]) -> String {
    format!("{}<<{}", surnames.join("<"), given_names.join("<"))
}

/// Builds the `SURNAME<<GIVEN<NAMES` field of exactly `width` characters.
///
/// Names that do not fit are shortened from the last given name backwards;
/// surnames are only shortened once every given name is down to its
/// initial.
pub fn name_to_mrz(surname: &str, given_names: &str, width: usize) -> String {
    let mut surnames = tokens(surname);
    let mut given = tokens(given_names);

    let order: Vec<(bool, usize)> = (0..given.len())
        .rev()
        .map(|index| (true, index))
        .chain((0..surnames.len()).rev().map(|index| (false, index)))
        .collect();

    for (is_given, index) in order {
        let size = compose(&surnames, &given).len();
        if size <= width {
            break;
        }
        let excess = size - width;
        let token = if is_given {
            &mut given[index]
        } else {
            &mut surnames[index]
        };
        let keep = if token.len() > excess { token.len() - excess } else { 1 };
        token.truncate(keep);
    }

    let mut name = compose(&surnames, &given);
    if name.len() > width {
        name.truncate(width);
        while name.ends_with(FILLER) {
            name.pop();
        }
    }
    fit(name, width)
}
