use crate::models::{MrzRecord, MrzValidationResult, ValidationIssue, ValidationIssueType};

pub struct MrzValidator;

impl MrzValidator {
    /// Turns the check digit flags of a decoded record into an issue
    /// report. Checksum failures never make the record unusable.
    pub fn validate(record: &MrzRecord) -> MrzValidationResult {
        let mut issues = Vec::new();

        let checks = [
            (record.is_valid_document_number, "document number"),
            (record.is_valid_date_of_birth, "date of birth"),
            (record.is_valid_expiration_date, "date of expiry"),
            (record.is_valid_personal_number, "personal number"),
            (record.is_valid_composite, "composite"),
        ];
        for (valid, field) in checks {
            if !valid {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Mrz,
                    message: format!("Invalid {} check digit", field),
                });
            }
        }

        if record.document_code.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: format!(
                    "Unknown document code: {}{}",
                    record.code1, record.code2
                ),
            });
        }

        MrzValidationResult {
            is_valid: record.is_valid(),
            document_number_check_valid: record.is_valid_document_number,
            date_of_birth_check_valid: record.is_valid_date_of_birth,
            date_of_expiry_check_valid: record.is_valid_expiration_date,
            personal_number_check_valid: record.is_valid_personal_number,
            composite_check_valid: record.is_valid_composite,
            issues,
        }
    }
}
