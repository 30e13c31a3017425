use crate::models::{DocumentFormat, MrzRange};
use thiserror::Error;

/// A located MRZ block that could not be decoded structurally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}: {mrz}", range_label(.range))]
pub struct MrzParseError {
    pub message: String,
    /// The raw MRZ text being parsed.
    pub mrz: String,
    pub range: Option<MrzRange>,
    pub format: Option<DocumentFormat>,
}

impl MrzParseError {
    pub fn new(message: impl Into<String>, mrz: impl Into<String>, range: Option<MrzRange>) -> Self {
        MrzParseError {
            message: message.into(),
            mrz: mrz.into(),
            range,
            format: None,
        }
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

fn range_label(range: &Option<MrzRange>) -> String {
    match range {
        Some(range) => range.to_string(),
        None => "unknown range".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MrzError {
    #[error("Could not find a MRZ")]
    NotFound,
    #[error("MRZ parsing error: {0}")]
    Parse(#[from] MrzParseError),
}

impl MrzError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MrzError::NotFound)
    }

    pub fn as_parse_error(&self) -> Option<&MrzParseError> {
        match self {
            MrzError::Parse(err) => Some(err),
            MrzError::NotFound => None,
        }
    }
}
