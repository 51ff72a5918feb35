use crate::{
    data::Document,
    error::{RosterResult, SeedDateRangeSnafu},
};
use jiff::{ToSpan, Zoned, civil::Date};
use rand::{Rng, seq::IndexedRandom};
use serde_json::{Value, json};
use snafu::ResultExt;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph", "Sarah", "Thomas", "Karen",
    "Charles", "Nancy", "Aisha", "Mohammed", "Raj", "Priya", "Chen", "Yuki", "Sofia", "Diego",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Patel", "Kim", "Nguyen", "Chen", "Wang", "Singh",
    "Gupta",
];

const SESSIONS: &[&str] = &["2022-2023", "2023-2024", "2024-2025"];

pub const DEFAULT_SEED_COUNT: usize = 50;

fn random_date(rng: &mut impl Rng, start: Date, end: Date) -> RosterResult<Date> {
    let days = start
        .until(end)
        .context(SeedDateRangeSnafu)?
        .get_days()
        .max(0);
    start
        .checked_add(rng.random_range(0..=days).days())
        .context(SeedDateRangeSnafu)
}

/// Makes `count` plausible student records, ready to be written out or loaded directly.
pub fn generate_students(
    rng: &mut impl Rng,
    count: usize,
    today: Date,
) -> RosterResult<Vec<Document>> {
    let dob_start = jiff::civil::date(2000, 1, 1);
    let dob_end = jiff::civil::date(2010, 12, 31);
    let created_start = jiff::civil::date(2022, 1, 1);
    let created_end = today.max(created_start);

    (0..count)
        .map(|_| {
            let dob = random_date(rng, dob_start, dob_end)?;
            let created = random_date(rng, created_start, created_end)?;
            let first_name = FIRST_NAMES.choose(rng).copied().unwrap_or("Student");
            let last_name = LAST_NAMES.choose(rng).copied().unwrap_or("Unknown");
            let session = SESSIONS.choose(rng).copied().unwrap_or("2024-2025");

            let Value::Object(document) = json!({
                "first_name": first_name,
                "last_name": last_name,
                "dob": dob.to_string(),
                "class": rng.random_range(1..=12_u8).to_string(),
                "session": session,
                "created_date": created.to_string(),
            }) else {
                unreachable!("json! object literal is always an object")
            };
            Ok(document)
        })
        .collect()
}

pub fn today() -> Date {
    Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn generates_the_requested_number_of_complete_records() {
        let mut rng = StdRng::seed_from_u64(7);
        let students =
            generate_students(&mut rng, 25, jiff::civil::date(2025, 6, 1)).expect("generate");
        assert_eq!(students.len(), 25);

        for student in &students {
            for field in ["first_name", "last_name", "dob", "class", "session", "created_date"] {
                assert!(
                    student.get(field).and_then(Value::as_str).is_some(),
                    "missing {field} in {student:?}"
                );
            }
            assert!(!student.contains_key("id"));
        }
    }

    #[test]
    fn values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let today = jiff::civil::date(2025, 6, 1);
        let students = generate_students(&mut rng, 200, today).expect("generate");

        for student in students {
            let text = |field: &str| {
                student
                    .get(field)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_default()
            };

            let dob: Date = text("dob").parse().expect("dob is a date");
            assert!(dob >= jiff::civil::date(2000, 1, 1) && dob <= jiff::civil::date(2010, 12, 31));

            let created: Date = text("created_date").parse().expect("created is a date");
            assert!(created >= jiff::civil::date(2022, 1, 1) && created <= today);

            let class: u8 = text("class").parse().expect("class is numeric");
            assert!((1..=12).contains(&class));
            assert!(SESSIONS.contains(&text("session").as_str()));
        }
    }

    #[test]
    fn zero_records_is_fine() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_students(&mut rng, 0, today()).expect("generate").is_empty());
    }
}
