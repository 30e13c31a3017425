//! Per-layout field windows, decoding and re-encoding.

use crate::models::{CheckDigits, DocumentFormat, MrzDate, MrzRange, MrzRecord, MrzSex};
use crate::processing::parser::MrzParser;
use crate::processing::transliteration::{name_to_mrz, to_mrz};
use crate::utils::MrzParseError;
use crate::validation::checksum::compute_check_digit_char;

/// Windows of the fields every layout carries.
struct CoreLayout {
    document_number: MrzRange,
    document_number_check: MrzRange,
    nationality: MrzRange,
    date_of_birth: MrzRange,
    date_of_birth_check: MrzRange,
    sex: MrzRange,
    expiration_date: MrzRange,
    expiration_date_check: MrzRange,
}

const TD1_CORE: CoreLayout = CoreLayout {
    document_number: MrzRange::new(5, 14, 0),
    document_number_check: MrzRange::at(14, 0),
    nationality: MrzRange::new(15, 18, 1),
    date_of_birth: MrzRange::new(0, 6, 1),
    date_of_birth_check: MrzRange::at(6, 1),
    sex: MrzRange::at(7, 1),
    expiration_date: MrzRange::new(8, 14, 1),
    expiration_date_check: MrzRange::at(14, 1),
};

/// Second line shared by TD2, TD3 and both visa layouts.
const LINE2_CORE: CoreLayout = CoreLayout {
    document_number: MrzRange::new(0, 9, 1),
    document_number_check: MrzRange::at(9, 1),
    nationality: MrzRange::new(10, 13, 1),
    date_of_birth: MrzRange::new(13, 19, 1),
    date_of_birth_check: MrzRange::at(19, 1),
    sex: MrzRange::at(20, 1),
    expiration_date: MrzRange::new(21, 27, 1),
    expiration_date_check: MrzRange::at(27, 1),
};

const ISSUING_COUNTRY: MrzRange = MrzRange::new(2, 5, 0);

struct Core {
    document_number: String,
    nationality: String,
    date_of_birth: MrzDate,
    sex: MrzSex,
    expiration_date: MrzDate,
    document_number_check: char,
    date_of_birth_check: char,
    date_of_expiry_check: char,
    is_valid_document_number: bool,
    is_valid_date_of_birth: bool,
    is_valid_expiration_date: bool,
}

fn decode_core(parser: &MrzParser, layout: &CoreLayout) -> Result<Core, MrzParseError> {
    let date_of_birth = parser.parse_date(layout.date_of_birth)?;
    let expiration_date = parser.parse_date(layout.expiration_date)?;

    Ok(Core {
        document_number: parser.parse_string(layout.document_number)?,
        nationality: parser.parse_string(layout.nationality)?,
        sex: parser.parse_sex(layout.sex)?,
        document_number_check: parser.char_at(layout.document_number_check)?,
        date_of_birth_check: parser.char_at(layout.date_of_birth_check)?,
        date_of_expiry_check: parser.char_at(layout.expiration_date_check)?,
        is_valid_document_number: parser.check_digit(
            layout.document_number_check,
            parser.raw_value(layout.document_number)?,
            "document number",
        )?,
        is_valid_date_of_birth: parser.check_digit(
            layout.date_of_birth_check,
            date_of_birth.to_mrz(),
            "date of birth",
        )? && date_of_birth.is_date_valid(),
        is_valid_expiration_date: parser.check_digit(
            layout.expiration_date_check,
            expiration_date.to_mrz(),
            "expiration date",
        )? && expiration_date.is_date_valid(),
        date_of_birth,
        expiration_date,
    })
}

/// Layout specific extras decoded on top of the core fields.
#[derive(Default)]
struct Extras {
    personal_number: Option<String>,
    optional_data: Option<String>,
    optional_data_2: Option<String>,
    personal_number_check: Option<char>,
    composite_check: Option<char>,
    is_valid_personal_number: Option<bool>,
    is_valid_composite: Option<bool>,
}

fn composite(
    parser: &MrzParser,
    at: MrzRange,
    ranges: &[MrzRange],
    extras: &mut Extras,
) -> Result<(), MrzParseError> {
    extras.composite_check = Some(parser.char_at(at)?);
    extras.is_valid_composite = Some(parser.check_digit(at, &parser.raw_values(ranges)?, "composite")?);
    Ok(())
}

pub(crate) fn decode(parser: &MrzParser) -> Result<MrzRecord, MrzParseError> {
    let format = parser.format();
    let document_code = parser.parse_document_code()?;
    let code1 = parser.char_at(MrzRange::at(0, 0))?;
    let code2 = parser.char_at(MrzRange::at(1, 0))?;
    let issuing_country = parser.parse_string(ISSUING_COUNTRY)?;

    let mut extras = Extras::default();
    let (name, core) = match format {
        DocumentFormat::TD1 => {
            extras.optional_data = Some(parser.parse_string(MrzRange::new(15, 30, 0))?);
            extras.optional_data_2 = Some(parser.parse_string(MrzRange::new(18, 29, 1))?);
            composite(
                parser,
                MrzRange::at(29, 1),
                &[
                    MrzRange::new(5, 30, 0),
                    MrzRange::new(0, 7, 1),
                    MrzRange::new(8, 15, 1),
                    MrzRange::new(18, 29, 1),
                ],
                &mut extras,
            )?;
            (parser.parse_name(MrzRange::new(0, 30, 2))?, decode_core(parser, &TD1_CORE)?)
        }
        DocumentFormat::TD2 => {
            extras.optional_data = Some(parser.parse_string(MrzRange::new(28, 35, 1))?);
            composite(
                parser,
                MrzRange::at(35, 1),
                &[MrzRange::new(0, 10, 1), MrzRange::new(13, 20, 1), MrzRange::new(21, 35, 1)],
                &mut extras,
            )?;
            (parser.parse_name(MrzRange::new(5, 36, 0))?, decode_core(parser, &LINE2_CORE)?)
        }
        DocumentFormat::MRVB => {
            extras.optional_data = Some(parser.parse_string(MrzRange::new(28, 36, 1))?);
            (parser.parse_name(MrzRange::new(5, 36, 0))?, decode_core(parser, &LINE2_CORE)?)
        }
        DocumentFormat::TD3 => {
            let personal_number = MrzRange::new(28, 42, 1);
            let check = MrzRange::at(42, 1);
            extras.personal_number = Some(parser.parse_string(personal_number)?);
            extras.personal_number_check = Some(parser.char_at(check)?);
            extras.is_valid_personal_number = Some(parser.check_digit(
                check,
                parser.raw_value(personal_number)?,
                "personal number",
            )?);
            composite(
                parser,
                MrzRange::at(43, 1),
                &[MrzRange::new(0, 10, 1), MrzRange::new(13, 20, 1), MrzRange::new(21, 43, 1)],
                &mut extras,
            )?;
            (parser.parse_name(MrzRange::new(5, 44, 0))?, decode_core(parser, &LINE2_CORE)?)
        }
        DocumentFormat::MRVA => {
            extras.optional_data = Some(parser.parse_string(MrzRange::new(28, 44, 1))?);
            (parser.parse_name(MrzRange::new(5, 44, 0))?, decode_core(parser, &LINE2_CORE)?)
        }
    };
    let (surname, given_names) = name;

    Ok(MrzRecord {
        format,
        document_code,
        code1,
        code2,
        issuing_country,
        nationality: core.nationality,
        surname,
        given_names,
        document_number: core.document_number,
        date_of_birth: core.date_of_birth,
        sex: core.sex,
        expiration_date: core.expiration_date,
        personal_number: extras.personal_number,
        optional_data: extras.optional_data,
        optional_data_2: extras.optional_data_2,
        check_digits: CheckDigits {
            document_number_check: core.document_number_check,
            date_of_birth_check: core.date_of_birth_check,
            date_of_expiry_check: core.date_of_expiry_check,
            personal_number_check: extras.personal_number_check,
            composite_check: extras.composite_check,
        },
        is_valid_document_number: core.is_valid_document_number,
        is_valid_date_of_birth: core.is_valid_date_of_birth,
        is_valid_expiration_date: core.is_valid_expiration_date,
        // layouts without these digits are accepted as valid
        is_valid_personal_number: extras.is_valid_personal_number.unwrap_or(true),
        is_valid_composite: extras.is_valid_composite.unwrap_or(true),
    })
}

/// Appends `value` followed by its check digit.
fn push_checked(line: &mut String, value: &str) -> Result<(), MrzParseError> {
    line.push_str(value);
    line.push(compute_check_digit_char(value)?);
    Ok(())
}

fn push_composite(line: &mut String, composite: &str) -> Result<(), MrzParseError> {
    line.push(compute_check_digit_char(composite)?);
    Ok(())
}

impl MrzRecord {
    fn optional_or_empty(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("")
    }

    /// Re-encodes the record in its layout, recomputing every check digit.
    /// Rows are separated and terminated by `\n`.
    ///
    /// Every field is transliterated and fitted to its window first, so
    /// each row has its layout's exact width even after the public fields
    /// were edited.
    pub fn to_mrz(&self) -> Result<String, MrzParseError> {
        let code = to_mrz(&format!("{}{}", self.code1, self.code2), 2);
        let country = to_mrz(&self.issuing_country, 3);
        let document_number = to_mrz(&self.document_number, 9);
        let nationality = to_mrz(&self.nationality, 3);
        let birth = to_mrz(self.date_of_birth.to_mrz(), 6);
        let expiry = to_mrz(self.expiration_date.to_mrz(), 6);
        let sex = self.sex.mrz_char();
        let given = self.given_names_joined();

        match self.format {
            DocumentFormat::TD1 => {
                let mut line1 = format!("{}{}", code, country);
                push_checked(&mut line1, &document_number)?;
                line1.push_str(&to_mrz(Self::optional_or_empty(&self.optional_data), 15));

                let mut line2 = String::new();
                push_checked(&mut line2, &birth)?;
                line2.push(sex);
                push_checked(&mut line2, &expiry)?;
                line2.push_str(&nationality);
                line2.push_str(&to_mrz(Self::optional_or_empty(&self.optional_data_2), 11));

                let composite = format!("{}{}{}{}", &line1[5..30], &line2[0..7], &line2[8..15], &line2[18..29]);
                push_composite(&mut line2, &composite)?;

                let line3 = name_to_mrz(&self.surname, &given, 30);
                Ok(format!("{}\n{}\n{}\n", line1, line2, line3))
            }
            DocumentFormat::TD2 | DocumentFormat::MRVB | DocumentFormat::TD3 | DocumentFormat::MRVA => {
                let width = self.format.mrz_chars_per_line();
                let line1 = format!("{}{}{}", code, country, name_to_mrz(&self.surname, &given, width - 5));

                let mut line2 = String::new();
                push_checked(&mut line2, &document_number)?;
                line2.push_str(&nationality);
                push_checked(&mut line2, &birth)?;
                line2.push(sex);
                push_checked(&mut line2, &expiry)?;

                match self.format {
                    DocumentFormat::TD3 => {
                        let personal = to_mrz(Self::optional_or_empty(&self.personal_number), 14);
                        push_checked(&mut line2, &personal)?;
                        let composite = format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..43]);
                        push_composite(&mut line2, &composite)?;
                    }
                    DocumentFormat::TD2 => {
                        line2.push_str(&to_mrz(Self::optional_or_empty(&self.optional_data), 7));
                        let composite = format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..35]);
                        push_composite(&mut line2, &composite)?;
                    }
                    _ => {
                        line2.push_str(&to_mrz(Self::optional_or_empty(&self.optional_data), width - 28));
                    }
                }
                Ok(format!("{}\n{}\n", line1, line2))
            }
        }
    }
}
