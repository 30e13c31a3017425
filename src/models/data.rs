use crate::models::{DocumentCode, MrzDate, MrzRange};
use crate::utils::MrzParseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    TD1,  // ID Card, 3 lines of 30
    TD2,  // ID Card, 2 lines of 36
    TD3,  // Passport, 2 lines of 44
    MRVA, // Visa Format-A, 2 lines of 44
    MRVB, // Visa Format-B, 2 lines of 36
}

/// Layout table in detection order: rows, columns, required first
/// character of the first row. Entries sharing a geometry must list the
/// discriminated layout first.
const LAYOUTS: [(usize, usize, Option<char>, DocumentFormat); 5] = [
    (3, 30, None, DocumentFormat::TD1),
    (2, 36, Some('V'), DocumentFormat::MRVB),
    (2, 36, None, DocumentFormat::TD2),
    (2, 44, Some('V'), DocumentFormat::MRVA),
    (2, 44, None, DocumentFormat::TD3),
];

impl DocumentFormat {
    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            DocumentFormat::TD2 => 2,
            DocumentFormat::TD3 => 2,
            DocumentFormat::MRVA => 2,
            DocumentFormat::MRVB => 2,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 => 36,
            DocumentFormat::TD3 => 44,
            DocumentFormat::MRVA => 44,
            DocumentFormat::MRVB => 36,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::TD1 => "MRTD-TD1",
            DocumentFormat::TD2 => "MRTD-TD2",
            DocumentFormat::TD3 => "MRP",
            DocumentFormat::MRVA => "MRV-A",
            DocumentFormat::MRVB => "MRV-B",
        }
    }

    /// Whether the layout prints a composite check digit.
    pub fn has_composite_check(&self) -> bool {
        !matches!(self, DocumentFormat::MRVA | DocumentFormat::MRVB)
    }

    /// Number of rows of the layouts printed with the given line width.
    pub fn rows_for_width(width: usize) -> Option<usize> {
        LAYOUTS
            .iter()
            .find(|(_, columns, _, _)| *columns == width)
            .map(|(rows, _, _, _)| *rows)
    }

    /// Detects the layout of an MRZ already split into rows.
    pub fn detect(rows: &[&str], mrz: &str) -> Result<DocumentFormat, MrzParseError> {
        let first = rows
            .first()
            .ok_or_else(|| MrzParseError::new("Empty MRZ", mrz, None))?;
        let columns = first.chars().count();

        for (index, row) in rows.iter().enumerate().skip(1) {
            let width = row.chars().count();
            if width != columns {
                return Err(MrzParseError::new(
                    format!(
                        "Different row lengths: 0: {} and {}: {}",
                        columns, index, width
                    ),
                    mrz,
                    Some(MrzRange::new(0, width.max(1), index)),
                ));
            }
        }

        LAYOUTS
            .iter()
            .find(|(layout_rows, layout_columns, first_char, _)| {
                *layout_rows == rows.len()
                    && *layout_columns == columns
                    && first_char.map_or(true, |c| first.starts_with(c))
            })
            .map(|(_, _, _, format)| *format)
            .ok_or_else(|| {
                MrzParseError::new(
                    format!(
                        "Unknown format / unsupported number of cols/rows: {}/{}",
                        columns,
                        rows.len()
                    ),
                    mrz,
                    Some(MrzRange::new(0, columns.max(1), 0)),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MrzSex {
    Male,
    Female,
    Unspecified,
}

impl MrzSex {
    pub fn from_mrz(c: char) -> Option<MrzSex> {
        match c {
            'M' => Some(MrzSex::Male),
            'F' => Some(MrzSex::Female),
            '<' | 'X' => Some(MrzSex::Unspecified),
            _ => None,
        }
    }

    pub fn mrz_char(&self) -> char {
        match self {
            MrzSex::Male => 'M',
            MrzSex::Female => 'F',
            MrzSex::Unspecified => '<',
        }
    }
}

/// Check digits exactly as printed. `None` when the layout has no such
/// digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDigits {
    pub document_number_check: char,
    pub date_of_birth_check: char,
    pub date_of_expiry_check: char,
    pub personal_number_check: Option<char>,
    pub composite_check: Option<char>,
}

/// A decoded MRZ. Only the record parser builds these.
///
/// Optional text fields are `None` when the layout does not carry them
/// and `Some("")` when the layout carries them but they are blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct MrzRecord {
    pub format: DocumentFormat,
    pub document_code: Option<DocumentCode>,
    pub code1: char,
    pub code2: char,
    pub issuing_country: String,
    pub nationality: String,
    pub surname: String,
    pub given_names: Vec<String>,
    pub document_number: String,
    pub date_of_birth: MrzDate,
    pub sex: MrzSex,
    pub expiration_date: MrzDate,
    pub personal_number: Option<String>,
    pub optional_data: Option<String>,
    pub optional_data_2: Option<String>,
    pub check_digits: CheckDigits,
    pub is_valid_document_number: bool,
    pub is_valid_date_of_birth: bool,
    pub is_valid_expiration_date: bool,
    pub is_valid_personal_number: bool,
    pub is_valid_composite: bool,
}

impl MrzRecord {
    pub fn given_names_joined(&self) -> String {
        self.given_names.join(" ")
    }

    /// True when every check digit and both dates are valid.
    pub fn is_valid(&self) -> bool {
        self.is_valid_document_number
            && self.is_valid_date_of_birth
            && self.is_valid_expiration_date
            && self.is_valid_personal_number
            && self.is_valid_composite
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    Mrz,
    Format,
    Expiry,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub record: MrzRecord,
    pub mrz_validation: MrzValidationResult,
    pub expiry_validation: ExpiryValidationResult,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrzValidationResult {
    pub is_valid: bool,
    pub document_number_check_valid: bool,
    pub date_of_birth_check_valid: bool,
    pub date_of_expiry_check_valid: bool,
    pub personal_number_check_valid: bool,
    pub composite_check_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub issues: Vec<ValidationIssue>,
}
