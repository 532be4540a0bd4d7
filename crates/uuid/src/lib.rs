//! Resource identifier utilities.
//!
//! Every FHIR-shaped record produced by the service carries a logical `id`. Identifiers are
//! opaque to callers; internally they are random (version 4) UUIDs rendered in the
//! **canonical hyphenated form**: 36 lowercase characters, `8-4-4-4-12`.
//!
//! Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! Notes:
//! - Identifiers are unique per generation; nothing checks uniqueness across calls because
//!   nothing is stored.
//! - Externally supplied identifiers (for example a `patient_id` passed back in by a caller)
//!   are *not* required to be [`ResourceId`]s. FHIR allows any `[A-Za-z0-9\-\.]{1,64}` id, and
//!   callers routinely use placeholders such as `patient-example`.

mod service;

pub use service::ResourceId;
