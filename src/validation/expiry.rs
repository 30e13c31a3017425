use chrono::NaiveDate;
use crate::models::{ExpiryValidationResult, MrzRecord, ValidationIssue, ValidationIssueType};

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Checks the expiration date against `today`. Two-digit years at or
    /// above `pivot` resolve to the 1900s.
    pub fn validate(record: &MrzRecord, today: NaiveDate, pivot: u8) -> ExpiryValidationResult {
        let mut issues = Vec::new();
        let mut not_expired = false;

        if let Some(date) = record.expiration_date.to_naive_date(pivot) {
            // valid through the printed day
            not_expired = date >= today;

            if !not_expired {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Expiry,
                    message: format!("Document expired on {}", date.format("%Y-%m-%d")),
                });
            }
        } else {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: format!(
                    "Invalid expiry date: {}",
                    record.expiration_date.to_mrz()
                ),
            });
        }

        ExpiryValidationResult {
            is_valid: not_expired,
            not_expired,
            issues,
        }
    }
}
