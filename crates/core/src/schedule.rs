//! Static schedule tables and the anchor-date calculator that expands them.
//!
//! A schedule is an ordered table of offsets from an anchor date (LMP for antenatal contacts,
//! date of birth for immunizations). Expanding a table yields one [`ScheduleEntry`] per row, in
//! table order, each with a target date and a fixed-width window.

use crate::constants::{FALLBACK_VACCINE_SYSTEM, LOINC_SYSTEM, NAEGELE_OFFSET_DAYS, SNOMED_SYSTEM};
use crate::dates::{add_days, add_fractional_months, sub_days};
use crate::ServiceResult;
use chrono::NaiveDate;

/// Offset of a schedule row from its anchor date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    Weeks(u32),
    /// Fractional calendar months, see [`add_fractional_months`].
    Months(f64),
}

impl Offset {
    pub fn apply(self, anchor: NaiveDate) -> ServiceResult<NaiveDate> {
        match self {
            Offset::Weeks(weeks) => add_days(anchor, u64::from(weeks) * 7),
            Offset::Months(months) => add_fractional_months(anchor, months),
        }
    }
}

/// One expanded row of a schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleEntry<R> {
    pub row: R,
    pub target: NaiveDate,
    pub window_end: NaiveDate,
}

/// A row of a schedule table.
pub trait ScheduleRow: Copy {
    fn offset(&self) -> Offset;
}

/// Expand `rows` against `anchor`, preserving row order.
pub fn expand<R: ScheduleRow>(
    anchor: NaiveDate,
    rows: &[R],
    window_days: u64,
) -> ServiceResult<Vec<ScheduleEntry<R>>> {
    rows.iter()
        .map(|row| {
            let target = row.offset().apply(anchor)?;
            Ok(ScheduleEntry {
                row: *row,
                target,
                window_end: add_days(target, window_days)?,
            })
        })
        .collect()
}

/// EDD from LMP by Naegele's rule.
pub fn edd_from_lmp(lmp: NaiveDate) -> ServiceResult<NaiveDate> {
    add_days(lmp, NAEGELE_OFFSET_DAYS)
}

/// LMP implied by an EDD, the inverse of [`edd_from_lmp`].
pub fn lmp_from_edd(edd: NaiveDate) -> ServiceResult<NaiveDate> {
    sub_days(edd, NAEGELE_OFFSET_DAYS)
}

// Antenatal contacts

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AncContact {
    pub weeks: u32,
    pub label: &'static str,
}

impl ScheduleRow for AncContact {
    fn offset(&self) -> Offset {
        Offset::Weeks(self.weeks)
    }
}

pub const ANC_WINDOW_DAYS: u64 = 1;

/// The eight-contact antenatal model, weeks from LMP.
pub const ANC_CONTACTS: [AncContact; 8] = [
    AncContact { weeks: 12, label: "First contact: Up to 12 weeks" },
    AncContact { weeks: 20, label: "Second contact: 20 weeks" },
    AncContact { weeks: 26, label: "Third contact: 26 weeks" },
    AncContact { weeks: 30, label: "Fourth contact: 30 weeks" },
    AncContact { weeks: 34, label: "Fifth contact: 34 weeks" },
    AncContact { weeks: 36, label: "Sixth contact: 36 weeks" },
    AncContact { weeks: 38, label: "Seventh contact: 38 weeks" },
    AncContact { weeks: 40, label: "Eighth contact: 40 weeks (or around EDD)" },
];

// Immunizations

/// Vaccine product family, used to pick the coding of a dose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vaccine {
    Bcg,
    Opv,
    HepatitisB,
    Pentavalent,
    Pcv,
    Rotavirus,
    Ipv,
    Mmr,
    VitaminA,
}

impl Vaccine {
    /// `(system, code, display)`
    pub fn coding(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Vaccine::Bcg => (LOINC_SYSTEM, "297BCG", "BCG Vaccine"),
            Vaccine::Opv => (LOINC_SYSTEM, "09OPV", "Oral Polio Vaccine"),
            Vaccine::HepatitisB => (LOINC_SYSTEM, "08HEPB", "Hepatitis B Vaccine"),
            Vaccine::Pentavalent => (LOINC_SYSTEM, "115", "DTP-HepB-Hib Vaccine"),
            Vaccine::Pcv => (LOINC_SYSTEM, "100PCV", "Pneumococcal Conjugate Vaccine"),
            Vaccine::Rotavirus => (LOINC_SYSTEM, "118ROTA", "Rotavirus Vaccine"),
            Vaccine::Ipv => (LOINC_SYSTEM, "10IPV", "Inactivated Polio Vaccine"),
            Vaccine::Mmr => (LOINC_SYSTEM, "04MMR", "MMR Vaccine"),
            Vaccine::VitaminA => (SNOMED_SYSTEM, "37384000", "Vitamin A supplement"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImmunizationDose {
    pub vaccine: &'static str,
    pub age_months: f64,
    pub dose: &'static str,
    pub product: Option<Vaccine>,
}

impl ImmunizationDose {
    /// Coding for this dose.
    ///
    /// Doses without a known product family use a local system whose code is the vaccine name
    /// upper-cased with spaces replaced by underscores.
    pub fn coding(&self) -> (String, String, String) {
        match self.product {
            Some(product) => {
                let (system, code, display) = product.coding();
                (system.to_string(), code.to_string(), display.to_string())
            }
            None => (
                FALLBACK_VACCINE_SYSTEM.to_string(),
                self.vaccine.replace(' ', "_").to_uppercase(),
                self.vaccine.to_string(),
            ),
        }
    }
}

impl ScheduleRow for ImmunizationDose {
    fn offset(&self) -> Offset {
        Offset::Months(self.age_months)
    }
}

pub const IMMUNIZATION_WINDOW_DAYS: u64 = 7;

const fn dose(
    vaccine: &'static str,
    age_months: f64,
    dose: &'static str,
    product: Option<Vaccine>,
) -> ImmunizationDose {
    ImmunizationDose { vaccine, age_months, dose, product }
}

/// Routine childhood immunization plan, age in months from date of birth.
pub const IMMUNIZATION_PLAN: [ImmunizationDose; 20] = [
    dose("BCG", 0.0, "Birth dose", Some(Vaccine::Bcg)),
    dose("OPV-0", 0.0, "Birth dose", Some(Vaccine::Opv)),
    dose("Hepatitis B - Birth", 0.0, "Birth dose", Some(Vaccine::HepatitisB)),
    dose("Pentavalent-1 (DTP-HepB-Hib)", 1.5, "1st dose (6 weeks)", Some(Vaccine::Pentavalent)),
    dose("OPV-1", 1.5, "1st dose (6 weeks)", Some(Vaccine::Opv)),
    dose("PCV-1", 1.5, "1st dose (6 weeks)", Some(Vaccine::Pcv)),
    dose("Rotavirus-1", 1.5, "1st dose (6 weeks)", Some(Vaccine::Rotavirus)),
    dose("Pentavalent-2", 2.5, "2nd dose (10 weeks)", Some(Vaccine::Pentavalent)),
    dose("OPV-2", 2.5, "2nd dose (10 weeks)", Some(Vaccine::Opv)),
    dose("PCV-2", 2.5, "2nd dose (10 weeks)", Some(Vaccine::Pcv)),
    dose("Rotavirus-2", 2.5, "2nd dose (10 weeks)", Some(Vaccine::Rotavirus)),
    dose("Pentavalent-3", 3.5, "3rd dose (14 weeks)", Some(Vaccine::Pentavalent)),
    dose("OPV-3", 3.5, "3rd dose (14 weeks)", Some(Vaccine::Opv)),
    dose("PCV-3", 3.5, "3rd dose (14 weeks)", Some(Vaccine::Pcv)),
    dose("IPV-1", 3.5, "1st dose (14 weeks)", Some(Vaccine::Ipv)),
    dose("Measles-Mumps-Rubella (MMR) - 1", 9.0, "1st dose", Some(Vaccine::Mmr)),
    dose("Vitamin A - 1", 9.0, "1st dose", Some(Vaccine::VitaminA)),
    dose("Measles-Mumps-Rubella (MMR) - 2", 15.0, "2nd dose", Some(Vaccine::Mmr)),
    dose("DTP Booster 1", 18.0, "Booster (1.5 years)", None),
    dose("OPV Booster 1", 18.0, "Booster (1.5 years)", Some(Vaccine::Opv)),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn anc_contacts_are_weeks_from_lmp_in_order() {
        let lmp = d("2024-01-01");
        let entries = expand(lmp, &ANC_CONTACTS, ANC_WINDOW_DAYS).unwrap();

        assert_eq!(entries.len(), 8);
        let weeks: Vec<u32> = entries.iter().map(|e| e.row.weeks).collect();
        assert_eq!(weeks, vec![12, 20, 26, 30, 34, 36, 38, 40]);

        for entry in &entries {
            let expected = lmp + chrono::Days::new(u64::from(entry.row.weeks) * 7);
            assert_eq!(entry.target, expected);
            assert_eq!(entry.window_end, entry.target + chrono::Days::new(1));
        }
        assert_eq!(entries[0].target, d("2024-03-25"));
        assert_eq!(entries[7].target, edd_from_lmp(lmp).unwrap());
    }

    #[test]
    fn edd_and_lmp_are_inverse() {
        let lmp = d("2023-05-17");
        let edd = edd_from_lmp(lmp).unwrap();
        assert_eq!(edd, d("2024-02-21"));
        assert_eq!(lmp_from_edd(edd).unwrap(), lmp);
    }

    #[test]
    fn immunization_plan_keeps_table_order() {
        let dob = d("2024-01-31");
        let entries = expand(dob, &IMMUNIZATION_PLAN, IMMUNIZATION_WINDOW_DAYS).unwrap();

        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].row.vaccine, "BCG");
        assert_eq!(entries[19].row.vaccine, "OPV Booster 1");

        for entry in entries.iter().take(3) {
            assert_eq!(entry.target, dob);
            assert_eq!(entry.window_end, d("2024-02-07"));
        }

        // 1.5 months: 31 Jan + 1 month clamps to 29 Feb, then +15 days.
        assert_eq!(entries[3].target, d("2024-03-15"));
        // 18 months.
        assert_eq!(entries[18].target, d("2025-07-31"));

        let mut previous = dob;
        for entry in &entries {
            assert!(entry.target >= previous);
            previous = entry.target;
        }
    }

    #[test]
    fn known_products_use_fixed_codings() {
        let (system, code, display) = IMMUNIZATION_PLAN[16].coding();
        assert_eq!(system, SNOMED_SYSTEM);
        assert_eq!(code, "37384000");
        assert_eq!(display, "Vitamin A supplement");

        let (_, code, _) = IMMUNIZATION_PLAN[19].coding();
        assert_eq!(code, "09OPV");
    }

    #[test]
    fn doses_without_product_fall_back_to_local_code() {
        let booster = IMMUNIZATION_PLAN[18];
        assert!(booster.product.is_none());
        let (system, code, display) = booster.coding();
        assert_eq!(system, FALLBACK_VACCINE_SYSTEM);
        assert_eq!(code, "DTP_BOOSTER_1");
        assert_eq!(display, "DTP Booster 1");
    }
}
