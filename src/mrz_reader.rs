use crate::models::*;
use crate::processing::finder;
use crate::utils::MrzError;
use crate::validation::*;
use chrono::NaiveDate;
use log::debug;

/// Runs the whole pipeline over OCR text: locate, decode, validate.
pub struct MrzReader {
    century_pivot: u8,
}

impl Default for MrzReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MrzReader {
    pub fn new() -> Self {
        MrzReader {
            century_pivot: DEFAULT_CENTURY_PIVOT,
        }
    }

    pub fn with_century_pivot(mut self, pivot: u8) -> Self {
        self.century_pivot = pivot;
        self
    }

    // Main entry point that orchestrates the entire process
    pub fn read(&self, text: &str, today: NaiveDate) -> Result<ValidationResult, MrzError> {
        // Step 1: Locate and decode the MRZ block
        let (_, record) = finder::locate(Some(text))?;
        debug!("Decoded {} record for {}", record.format.name(), record.surname);

        Ok(self.validate_all(record, today))
    }

    // Validate all aspects of the record
    fn validate_all(&self, record: MrzRecord, today: NaiveDate) -> ValidationResult {
        let mrz_validation = MrzValidator::validate(&record);
        let expiry_validation = ExpiryValidator::validate(&record, today, self.century_pivot);

        let is_valid = mrz_validation.is_valid && expiry_validation.is_valid;

        let mut issues = Vec::new();
        issues.extend(mrz_validation.issues.clone());
        issues.extend(expiry_validation.issues.clone());

        ValidationResult {
            is_valid,
            record,
            mrz_validation,
            expiry_validation,
            issues,
        }
    }
}
