use chrono::Local;
use luppa_mrz::models::{ValidationIssueType, ValidationResult};
use luppa_mrz::{name_to_mrz, MrzError, MrzReader};

// OCR-like samples: prose around the zone, stray whitespace and blank lines
const SAMPLES: [(&str, &str); 4] = [
    (
        "Utopian passport",
        "PASSPORT  PASSEPORT\nUtopia\n\n  P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n  L898902C36UTO7408122F1204159ZE184226B<<<<<10\n",
    ),
    (
        "Utopian ID card",
        "IDENTITY CARD\nCIUTOD231458907A123X5328434D23\n3407127M9507122UTO<<<<<<<<<<<6\nSTEVENSON<<PETER<<<<<<<<<<<<<<\n",
    ),
    (
        "Truncated scan",
        "I<SVKNOVAK<<JAN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n123456\n",
    ),
    ("Blank page", "nothing to see here\n"),
];

fn passed(valid: bool) -> &'static str {
    if valid {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn print_detailed_report(result: &ValidationResult) {
    let record = &result.record;

    println!("\n===============================================");
    println!("      MRZ VALIDATION DETAILED REPORT");
    println!("===============================================\n");

    println!("DOCUMENT INFORMATION:");
    println!("  Layout: {}", record.format.name());
    println!("  Document Code: {}{} ({:?})", record.code1, record.code2, record.document_code);
    println!("  Issuing Country: {}", record.issuing_country);
    println!("  Document Number: {}", record.document_number);
    println!("  Surname: {}", record.surname);
    println!("  Given Names: {}", record.given_names_joined());
    println!("  Nationality: {}", record.nationality);
    println!("  Date of Birth: {}", record.date_of_birth);
    println!("  Sex: {:?}", record.sex);
    println!("  Date of Expiry: {}", record.expiration_date);
    println!("  Personal Number: {:?}", record.personal_number);
    println!("  Optional Data: {:?}", record.optional_data);

    println!("\nVALIDATION STEPS:");
    println!("  1. Document Number Check: {}", passed(result.mrz_validation.document_number_check_valid));
    println!("  2. Date of Birth Check: {}", passed(result.mrz_validation.date_of_birth_check_valid));
    println!("  3. Date of Expiry Check: {}", passed(result.mrz_validation.date_of_expiry_check_valid));
    println!("  4. Personal Number Check: {}", passed(result.mrz_validation.personal_number_check_valid));
    println!("  5. Composite Check: {}", passed(result.mrz_validation.composite_check_valid));
    println!("  6. Expiry Validation: {}", passed(result.expiry_validation.is_valid));

    if !result.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &result.issues {
            println!(
                "  - [{}] {}",
                match issue.issue_type {
                    ValidationIssueType::Mrz => "MRZ",
                    ValidationIssueType::Format => "FORMAT",
                    ValidationIssueType::Expiry => "EXPIRY",
                },
                issue.message
            );
        }
    }

    match record.to_mrz() {
        Ok(mrz) => println!("\nRe-encoded MRZ:\n{}", mrz),
        Err(err) => eprintln!("Could not re-encode MRZ: {}", err),
    }

    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("JSON:\n{}", json),
        Err(err) => eprintln!("Could not serialize record: {}", err),
    }

    println!(
        "Document validation result: {}",
        if result.is_valid { "VALID" } else { "INVALID" }
    );
}

fn main() {
    env_logger::init();

    let reader = MrzReader::new();
    let today = Local::now().naive_local().date();

    for (label, text) in SAMPLES.iter() {
        println!("\nReading sample: {}", label);
        match reader.read(text, today) {
            Ok(result) => print_detailed_report(&result),
            Err(MrzError::NotFound) => println!("No MRZ found"),
            Err(MrzError::Parse(err)) => eprintln!("Error parsing MRZ: {}", err),
        }
    }

    println!("\nName field for a long name (31 characters):");
    println!("  {}", name_to_mrz("Nilavadhanananda", "Chayapa Dejthamrong Krasuang", 31));
}
