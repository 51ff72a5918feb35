use crate::{
    config::date_locale::parse_date,
    error::{RosterError, RosterResult},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudentInterchange")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub class: String,
    pub session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// A student as the API sends it. The id may be under `id`, `_id` or both, as a string or
/// a number; `id` wins when both are present.
#[derive(Deserialize)]
struct StudentInterchange {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<Value>,
    first_name: String,
    last_name: String,
    #[serde(default)]
    dob: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    session: String,
    #[serde(default)]
    created_date: Option<String>,
}

fn id_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(id) => Some(id),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl TryFrom<StudentInterchange> for Student {
    type Error = String;

    fn try_from(
        StudentInterchange {
            id,
            mongo_id,
            first_name,
            last_name,
            dob,
            class,
            session,
            created_date,
        }: StudentInterchange,
    ) -> Result<Self, Self::Error> {
        let id = id_text(id)
            .or_else(|| id_text(mongo_id))
            .ok_or_else(|| "student has no string or numeric `id` or `_id`".to_string())?;

        Ok(Self {
            id,
            first_name,
            last_name,
            dob,
            class,
            session,
            created_date,
        })
    }
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// What the add-student form submits. Every field defaults to empty so that a missing field
/// gets reported by [`FormStudent::validate`] rather than by the form extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormStudent {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub session: String,
}

/// The body of `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub class: String,
    pub session: String,
}

impl FormStudent {
    pub fn validate(self) -> RosterResult<NewStudent> {
        fn required(name: &'static str, value: String) -> RosterResult<String> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(RosterError::InvalidStudent {
                    reason: format!("`{name}` is required"),
                });
            }
            Ok(trimmed.to_string())
        }

        let Self {
            first_name,
            last_name,
            dob,
            class,
            session,
        } = self;

        let new_student = NewStudent {
            first_name: required("first_name", first_name)?,
            last_name: required("last_name", last_name)?,
            dob: required("dob", dob)?,
            class: required("class", class)?,
            session: required("session", session)?,
        };

        if parse_date(&new_student.dob).is_none() {
            return Err(RosterError::InvalidStudent {
                reason: format!("`dob` must be a date, found {:?}", new_student.dob),
            });
        }

        Ok(new_student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> FormStudent {
        FormStudent {
            first_name: "Bob".into(),
            last_name: "Johnson".into(),
            dob: "2001-05-15".into(),
            class: "9".into(),
            session: "2023-2024".into(),
        }
    }

    #[test]
    fn accepts_complete_form_and_trims() {
        let new_student = FormStudent {
            first_name: "  Bob ".into(),
            ..bob()
        }
        .validate()
        .expect("complete form");
        assert_eq!(new_student.first_name, "Bob");
        assert_eq!(new_student.session, "2023-2024");
    }

    #[test]
    fn rejects_missing_fields() {
        let err = FormStudent {
            class: "   ".into(),
            ..bob()
        }
        .validate()
        .expect_err("blank class");
        assert!(err.to_string().contains("class"), "{err}");

        assert!(FormStudent::default().validate().is_err());
    }

    #[test]
    fn rejects_undated_dob() {
        let err = FormStudent {
            dob: "last tuesday".into(),
            ..bob()
        }
        .validate()
        .expect_err("bad dob");
        assert!(err.to_string().contains("dob"), "{err}");
    }

    #[test]
    fn reads_mongo_style_ids() {
        let student: Student = serde_json::from_str(
            r#"{"_id":"65f1","first_name":"Ada","last_name":"Lovelace","dob":"1815-12-10","class":"5A","session":"2024"}"#,
        )
        .expect("valid student");
        assert_eq!(student.id, "65f1");
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert_eq!(student.created_date, None);
    }

    #[test]
    fn prefers_id_when_both_ids_are_present() {
        let student: Student = serde_json::from_str(
            r#"{"_id":"65f1","id":"7","first_name":"Ada","last_name":"Lovelace"}"#,
        )
        .expect("both ids");
        assert_eq!(student.id, "7");
        assert_eq!(student.dob, "");
    }

    #[test]
    fn reads_numeric_ids() {
        let student: Student =
            serde_json::from_str(r#"{"id":42,"first_name":"Ada","last_name":"Lovelace"}"#)
                .expect("numeric id");
        assert_eq!(student.id, "42");

        let student: Student =
            serde_json::from_str(r#"{"_id":7,"id":null,"first_name":"Ada","last_name":"Lovelace"}"#)
                .expect("numeric mongo id");
        assert_eq!(student.id, "7");
    }

    #[test]
    fn rejects_students_without_an_id() {
        assert!(
            serde_json::from_str::<Student>(r#"{"first_name":"Ada","last_name":"Lovelace"}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<Student>(
                r#"{"id":{"$oid":"65f1"},"first_name":"Ada","last_name":"Lovelace"}"#
            )
            .is_err()
        );
    }
}
