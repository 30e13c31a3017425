use crate::models::{DocumentCode, DocumentFormat, MrzDate, MrzRange, MrzRecord, MrzSex};
use crate::processing::records;
use crate::processing::transliteration::{is_mrz_char, FILLER};
use crate::utils::MrzParseError;
use crate::validation::checksum::compute_check_digit_char;
use log::debug;

/// Parses a two or three line MRZ into a record.
///
/// Fails only on structural problems. Check digit mismatches are reported
/// through the record's `is_valid_*` flags.
pub fn parse(mrz: &str) -> Result<MrzRecord, MrzParseError> {
    let parser = MrzParser::new(mrz)?;
    records::decode(&parser)
}

/// Splits raw MRZ text into rows, ignoring one trailing line break and
/// carriage returns.
pub fn split_rows(mrz: &str) -> Vec<&str> {
    let body = mrz.strip_suffix('\n').unwrap_or(mrz);
    let body = body.strip_suffix('\r').unwrap_or(body);
    body.split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .collect()
}

/// Field slicing over the rows of a single MRZ whose layout is known and
/// whose characters are all within the MRZ alphabet.
pub struct MrzParser<'a> {
    mrz: &'a str,
    rows: Vec<&'a str>,
    format: DocumentFormat,
}

impl<'a> MrzParser<'a> {
    pub fn new(mrz: &'a str) -> Result<Self, MrzParseError> {
        let rows = split_rows(mrz);
        if rows.iter().all(|row| row.is_empty()) {
            return Err(MrzParseError::new("Empty MRZ", mrz, None));
        }

        let format = DocumentFormat::detect(&rows, mrz)?;

        for (row_index, row) in rows.iter().enumerate() {
            if let Some((column, c)) = row.chars().enumerate().find(|(_, c)| !is_mrz_char(*c)) {
                return Err(MrzParseError::new(
                    format!("Invalid character in MRZ record: '{}'", c),
                    mrz,
                    Some(MrzRange::at(column, row_index)),
                )
                .with_format(format));
            }
        }

        Ok(MrzParser { mrz, rows, format })
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    fn error(&self, message: impl Into<String>, range: MrzRange) -> MrzParseError {
        MrzParseError::new(message, self.mrz, Some(range)).with_format(self.format)
    }

    pub fn raw_value(&self, range: MrzRange) -> Result<&'a str, MrzParseError> {
        self.rows
            .get(range.row)
            .and_then(|row| row.get(range.column..range.column_to))
            .ok_or_else(|| self.error("Field is outside of the MRZ", range))
    }

    /// Concatenates the raw content of several windows, as used by the
    /// composite check digit.
    pub fn raw_values(&self, ranges: &[MrzRange]) -> Result<String, MrzParseError> {
        let mut value = String::new();
        for range in ranges {
            value.push_str(self.raw_value(*range)?);
        }
        Ok(value)
    }

    pub fn char_at(&self, at: MrzRange) -> Result<char, MrzParseError> {
        self.raw_value(at)?
            .chars()
            .next()
            .ok_or_else(|| self.error("Field is outside of the MRZ", at))
    }

    /// Trailing fillers removed, inner fillers turned into spaces.
    pub fn parse_string(&self, range: MrzRange) -> Result<String, MrzParseError> {
        let value = self.raw_value(range)?.trim_end_matches(FILLER);
        Ok(value.replace(FILLER, " "))
    }

    /// Splits a name window into the surname and the given-name tokens.
    pub fn parse_name(&self, range: MrzRange) -> Result<(String, Vec<String>), MrzParseError> {
        let value = self.raw_value(range)?.trim_end_matches(FILLER);
        let (surname, given) = match value.split_once("<<") {
            Some((surname, given)) => (surname, given),
            None => (value, ""),
        };

        let surname = surname.trim_matches(FILLER).replace(FILLER, " ");
        let given_names = given
            .split(FILLER)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Ok((surname, given_names))
    }

    pub fn parse_date(&self, range: MrzRange) -> Result<MrzDate, MrzParseError> {
        if range.len() != 6 {
            return Err(self.error("Date field must be 6 characters long", range));
        }
        let date = MrzDate::parse(self.raw_value(range)?);
        if date.year.is_none() || date.month.is_none() || date.day.is_none() {
            debug!("Unparseable date at {}: {}", range, date.to_mrz());
        }
        Ok(date)
    }

    pub fn parse_sex(&self, at: MrzRange) -> Result<MrzSex, MrzParseError> {
        let c = self.char_at(at)?;
        MrzSex::from_mrz(c).ok_or_else(|| self.error(format!("Invalid MRZ sex character: {}", c), at))
    }

    pub fn parse_document_code(&self) -> Result<Option<DocumentCode>, MrzParseError> {
        let code = DocumentCode::classify(self.raw_value(MrzRange::new(0, 2, 0))?)
            .map_err(|err| self.error(err.message, MrzRange::new(0, 2, 0)))?;
        if code.is_none() {
            debug!("Unsupported document code: {}", self.raw_value(MrzRange::new(0, 2, 0))?);
        }
        Ok(code)
    }

    /// Compares the digit printed at `at` with the check digit of `value`.
    /// A printed filler counts as `0`.
    pub fn check_digit(&self, at: MrzRange, value: &str, field_name: &str) -> Result<bool, MrzParseError> {
        let expected = compute_check_digit_char(value).map_err(|err| self.error(err.message, at))?;
        let printed = match self.char_at(at)? {
            FILLER => '0',
            c => c,
        };
        if expected != printed {
            debug!(
                "Check digit verification failed for {}: expected {} but got {}",
                field_name, expected, printed
            );
        }
        Ok(expected == printed)
    }
}
