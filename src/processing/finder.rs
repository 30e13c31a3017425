use crate::models::{DocumentFormat, MrzRecord};
use crate::processing::parser::parse;
use crate::utils::MrzError;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref MRZ_LINE: Regex = Regex::new(r"^[A-Z0-9<]+$").unwrap();
    // three letters, or Germany's single-letter code
    static ref ISSUING_COUNTRY: Regex = Regex::new(r"^(?:[A-Z]{3}|D<<)$").unwrap();
}

/// Consecutive MRZ-alphabet lines starting at a line of layout width.
struct Candidate<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Candidate<'a> {
    fn is_exact(&self) -> bool {
        let width = self.lines[0].len();
        DocumentFormat::rows_for_width(width) == Some(self.lines.len())
            && self.lines.iter().all(|line| line.len() == width)
    }

    fn size(&self) -> usize {
        self.lines.iter().map(|line| line.len()).sum()
    }

    fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

fn is_anchor(line: &str) -> bool {
    MRZ_LINE.is_match(line) && line.get(2..5).map_or(false, |code| ISSUING_COUNTRY.is_match(code))
}

fn candidates<'a>(lines: &[&'a str]) -> Vec<Candidate<'a>> {
    let mut found = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let rows = match DocumentFormat::rows_for_width(line.len()) {
            Some(rows) if is_anchor(line) => rows,
            _ => continue,
        };

        let block: Vec<&str> = lines[index..]
            .iter()
            .take(rows)
            .take_while(|line| MRZ_LINE.is_match(line))
            .copied()
            .collect();
        if block.len() >= 2 {
            trace!("MRZ candidate at line {}: {} rows of {}", index, block.len(), line.len());
            found.push(Candidate { lines: block });
        }
    }
    found
}

/// Locates an MRZ block inside arbitrary text, typically OCR output.
///
/// Lines are trimmed and blank lines skipped. The located block is checked
/// by the record parser; a block that is MRZ shaped but does not parse is
/// reported as [`MrzError::Parse`] rather than [`MrzError::NotFound`].
pub fn find_mrz(text: Option<&str>) -> Result<String, MrzError> {
    locate(text).map(|(block, _)| block)
}

/// Like [`find_mrz`], also returning the record decoded from the block.
pub(crate) fn locate(text: Option<&str>) -> Result<(String, MrzRecord), MrzError> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(MrzError::NotFound),
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let candidates = candidates(&lines);
    let mut best: Option<&Candidate> = None;
    for candidate in candidates.iter().filter(|candidate| candidate.is_exact()) {
        if best.map_or(true, |best| candidate.size() > best.size()) {
            best = Some(candidate);
        }
    }

    let block = match best.or_else(|| candidates.first()) {
        Some(candidate) => candidate.joined(),
        None => {
            debug!("No MRZ candidate among {} lines", lines.len());
            return Err(MrzError::NotFound);
        }
    };

    let record = parse(&block)?;
    Ok((block, record))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_MRZ: &str =
        "I<SVKNOVAK<<JAN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n123456<AA5SVK8110251M1801020749313<<<<<<<<70";
    const VALID_GER_MRZ: &str =
        "P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<\nC01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4";
    const INVALID_MRZ: &str = "I<SVKNOVAK<<JAN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n123456";
    const TD1: &str =
        "CIUTOD231458907A123X5328434D23\n3407127M9507122UTO<<<<<<<<<<<6\nSTEVENSON<<PETER<<<<<<<<<<<<<<";

    fn wrapped(mrz: &str) -> String {
        format!("xx\n\nyyy\n{}\nZZZZ", mrz)
    }

    #[test]
    fn test_valid_mrz() {
        assert_eq!(find_mrz(Some(VALID_MRZ)).unwrap(), VALID_MRZ);
        assert_eq!(find_mrz(Some(VALID_GER_MRZ)).unwrap(), VALID_GER_MRZ);
        assert_eq!(find_mrz(Some(TD1)).unwrap(), TD1);
    }

    #[test]
    fn test_leading_whitespace_and_blank_lines() {
        let blank_start = "  I<SVKNOVAK<<JAN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n  123456<AA5SVK8110251M1801020749313<<<<<<<<70";
        assert_eq!(find_mrz(Some(blank_start)).unwrap(), VALID_MRZ);

        let blank_lines = "I<SVKNOVAK<<JAN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n  \n123456<AA5SVK8110251M1801020749313<<<<<<<<70";
        assert_eq!(find_mrz(Some(blank_lines)).unwrap(), VALID_MRZ);

        let crlf = VALID_MRZ.replace('\n', "\r\n");
        assert_eq!(find_mrz(Some(&crlf)).unwrap(), VALID_MRZ);
    }

    #[test]
    fn test_wrapped_mrz() {
        assert_eq!(find_mrz(Some(&wrapped(VALID_MRZ))).unwrap(), VALID_MRZ);
        assert_eq!(find_mrz(Some(&wrapped(VALID_GER_MRZ))).unwrap(), VALID_GER_MRZ);
        assert_eq!(find_mrz(Some(&wrapped(TD1))).unwrap(), TD1);
    }

    #[test]
    fn test_exact_block_preferred_over_truncated() {
        let text = format!("{}\n\nnotes\n{}", INVALID_MRZ, VALID_GER_MRZ);
        assert_eq!(find_mrz(Some(&text)).unwrap(), VALID_GER_MRZ);
    }

    #[test]
    fn test_truncated_mrz_is_parse_error() {
        let err = find_mrz(Some(INVALID_MRZ)).unwrap_err();
        assert!(matches!(err, MrzError::Parse(_)));

        let wrapped_invalid = format!("XX\nAZ09<\nYYY\n{}\nAZ09<\nZZZZ", INVALID_MRZ);
        let err = find_mrz(Some(&wrapped_invalid)).unwrap_err();
        assert!(err.as_parse_error().is_some());
    }

    #[test]
    fn test_not_found() {
        assert!(find_mrz(None).unwrap_err().is_not_found());
        assert!(find_mrz(Some("")).unwrap_err().is_not_found());
        assert!(find_mrz(Some("  \n\t\n")).unwrap_err().is_not_found());
        assert!(find_mrz(Some("AZ09<\n\nBBB\n\nAZ09<\nCCCCC")).unwrap_err().is_not_found());

        // "DE<" is not an issuing country code
        let no_ger_mrz =
            "P<DE<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<\nC01X00T478D<<6408125F2702283<<<<<<<<<<<<<<<4";
        assert!(find_mrz(Some(no_ger_mrz)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_issuing_country_shape() {
        assert!(is_anchor("P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<"));
        assert!(is_anchor("P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<"));
        assert!(!is_anchor("P<DE<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<"));
        assert!(!is_anchor("P<U1OERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<"));

        // a well formed block with a bad code next to a good one
        let text = format!("{}\n\n{}", VALID_GER_MRZ.replacen("P<D<<", "P<DE<", 1), VALID_MRZ);
        assert_eq!(find_mrz(Some(&text)).unwrap(), VALID_MRZ);
    }

    #[test]
    fn test_locate_returns_record() {
        let (block, record) = locate(Some(&wrapped(VALID_MRZ))).unwrap();
        assert_eq!(block, VALID_MRZ);
        assert_eq!(record.surname, "NOVAK");
        assert_eq!(record.document_number, "123456 AA");
    }

    #[test]
    fn test_lowercase_lines_are_not_mrz() {
        let text = VALID_MRZ.to_lowercase();
        assert!(find_mrz(Some(&text)).unwrap_err().is_not_found());
    }
}
