//! Constants used throughout the MCH core crate.
//!
//! Code systems, default configuration values and the two day-count constants every date
//! calculation depends on live here so that each has exactly one definition.

/// Default server base URL used to build questionnaire canonical URLs.
pub const DEFAULT_SERVER_BASE_URL: &str = "http://localhost:5001";

/// Default base URL for guideline references. Always ends with `/`.
pub const DEFAULT_GUIDELINE_BASE_URL: &str = "http://who.int/smart-guidelines/";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5001";

/// Days from LMP to EDD (Naegele's rule).
///
/// This is a population-average approximation, not a dating computation: it ignores cycle
/// length and ultrasound dating. The same offset is used in both directions.
pub const NAEGELE_OFFSET_DAYS: u64 = 280;

/// Average days per calendar month (365.25 / 12).
///
/// Used both for converting a fractional-month schedule offset into days and for converting
/// a child's age in days into months. Both uses must share this value.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.4375;

/// Subject id used when a schedule request does not name a patient.
pub const DEFAULT_PATIENT_ID: &str = "patient-example";

/// Calendar date format for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";
pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const FALLBACK_VACCINE_SYSTEM: &str = "http://example.org/vaccines";
pub const OBSERVATION_INTERPRETATION_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/v3-ObservationInterpretation";
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";
pub const EPISODE_OF_CARE_TYPE_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/episodeofcare-type";

/// Default identifier system for registered pregnancies.
pub const PREGNANCY_IDENTIFIER_SYSTEM: &str = "urn:oid:example-national-id";

/// Default identifier system for registered children.
pub const CHILD_IDENTIFIER_SYSTEM: &str = "urn:oid:example-child-health-id";

/// Organization every episode of care is managed by.
pub const MANAGING_ORGANIZATION_ID: &str = "org-example";
pub const MANAGING_ORGANIZATION_NAME: &str = "WHO Affiliated Clinic";
