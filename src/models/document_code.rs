use crate::models::MrzRange;
use crate::utils::MrzParseError;
use serde::{Deserialize, Serialize};

/// Document family derived from the first two characters of the MRZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCode {
    /// P, T or IP.
    Passport,
    /// I, except IP.
    TypeI,
    /// A, except AC.
    TypeA,
    /// AC.
    CrewMember,
    TypeC,
    /// Visa.
    TypeV,
    /// ME, TD, PT and R (1951 Convention travel documents).
    Migrant,
}

impl DocumentCode {
    /// Classifies the leading document code of `mrz`.
    ///
    /// `Ok(None)` means the code is not recognised; the record can still be
    /// decoded from its layout. The code `IV` is rejected outright.
    pub fn classify(mrz: &str) -> Result<Option<DocumentCode>, MrzParseError> {
        let mut chars = mrz.chars();
        let first = chars.next();
        let second = chars.next();

        let (first, second) = match (first, second) {
            (Some(first), Some(second)) => (first, second),
            _ => {
                return Err(MrzParseError::new(
                    "Document code needs two characters",
                    mrz,
                    Some(MrzRange::new(0, 2, 0)),
                ))
            }
        };

        match (first, second) {
            ('I', 'V') => {
                return Err(MrzParseError::new(
                    "IV document code is not allowed",
                    mrz,
                    Some(MrzRange::new(0, 2, 0)),
                ))
            }
            ('A', 'C') => return Ok(Some(DocumentCode::CrewMember)),
            ('M', 'E') | ('T', 'D') | ('P', 'T') => return Ok(Some(DocumentCode::Migrant)),
            ('I', 'P') => return Ok(Some(DocumentCode::Passport)),
            _ => {}
        }

        Ok(match first {
            'T' | 'P' => Some(DocumentCode::Passport),
            'A' => Some(DocumentCode::TypeA),
            'C' => Some(DocumentCode::TypeC),
            'V' => Some(DocumentCode::TypeV),
            'I' => Some(DocumentCode::TypeI),
            'R' => Some(DocumentCode::Migrant),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_codes() {
        assert_eq!(DocumentCode::classify("AC").unwrap(), Some(DocumentCode::CrewMember));
        assert_eq!(DocumentCode::classify("ME").unwrap(), Some(DocumentCode::Migrant));
        assert_eq!(DocumentCode::classify("TD").unwrap(), Some(DocumentCode::Migrant));
        assert_eq!(DocumentCode::classify("PT").unwrap(), Some(DocumentCode::Migrant));
        assert_eq!(DocumentCode::classify("IP").unwrap(), Some(DocumentCode::Passport));
    }

    #[test]
    fn test_exact_codes_ignore_rest_of_line() {
        assert_eq!(
            DocumentCode::classify("PTD<<ALJWEER<<AHMAD").unwrap(),
            Some(DocumentCode::Migrant)
        );
        assert_eq!(DocumentCode::classify("ACUTO").unwrap(), Some(DocumentCode::CrewMember));
    }

    #[test]
    fn test_first_character_fallback() {
        assert_eq!(DocumentCode::classify("P<").unwrap(), Some(DocumentCode::Passport));
        assert_eq!(DocumentCode::classify("T<").unwrap(), Some(DocumentCode::Passport));
        assert_eq!(DocumentCode::classify("AB").unwrap(), Some(DocumentCode::TypeA));
        assert_eq!(DocumentCode::classify("CI").unwrap(), Some(DocumentCode::TypeC));
        assert_eq!(DocumentCode::classify("V<").unwrap(), Some(DocumentCode::TypeV));
        assert_eq!(DocumentCode::classify("I<").unwrap(), Some(DocumentCode::TypeI));
        assert_eq!(DocumentCode::classify("ID").unwrap(), Some(DocumentCode::TypeI));
        assert_eq!(DocumentCode::classify("R<").unwrap(), Some(DocumentCode::Migrant));
    }

    #[test]
    fn test_unknown_code_is_not_an_error() {
        assert_eq!(DocumentCode::classify("X<").unwrap(), None);
        assert_eq!(DocumentCode::classify("<<").unwrap(), None);
    }

    #[test]
    fn test_iv_is_rejected() {
        let err = DocumentCode::classify("IV").unwrap_err();
        assert_eq!(err.range, Some(MrzRange::new(0, 2, 0)));

        let err = DocumentCode::classify("IVUTOSTEVENSON<<PETER").unwrap_err();
        assert!(err.message.contains("IV"));
    }

    #[test]
    fn test_short_input() {
        assert!(DocumentCode::classify("P").is_err());
        assert!(DocumentCode::classify("").is_err());
    }
}
