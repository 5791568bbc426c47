//! The user record and its JSON wire encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One row of the `users` table.
///
/// `id` and `date_created` are assigned by the store. On caller-built input they
/// default to `0` and `null` and are ignored by inserts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    #[serde(default)]
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_created: Option<DateTime<Utc>>,
}

/// Inbound timestamps are store-owned, so anything that is not RFC 3339 reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        _ => None,
    })
}

/// Body of a delete: only `id` is read; every other field is carried through for the echo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserKey {
    pub id: i32,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The five caller-supplied columns, borrowed from a [`User`].
#[derive(Clone, Copy, Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
    pub sex: Option<&'a str>,
}

impl User {
    pub fn new_fields(&self) -> NewUser<'_> {
        NewUser {
            username: &self.username,
            email: &self.email,
            firstname: self.firstname.as_deref(),
            lastname: self.lastname.as_deref(),
            sex: self.sex.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_with_wire_field_names() {
        let user = User {
            id: 7,
            username: "bash".into(),
            email: "anakobembash@gmail.com".into(),
            firstname: Some("Bashir".into()),
            lastname: None,
            sex: Some("male".into()),
            date_created: None,
        };
        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(
            v,
            json!({
                "id": 7,
                "username": "bash",
                "email": "anakobembash@gmail.com",
                "firstname": "Bashir",
                "lastname": null,
                "sex": "male",
                "date_created": null
            })
        );
    }

    #[test]
    fn store_generated_fields_may_be_omitted() {
        let user: User = serde_json::from_value(json!({
            "username": "teemah",
            "email": "teemah247@gmail.com"
        }))
        .unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.date_created, None);
        assert_eq!(user.firstname, None);
    }

    #[test]
    fn username_and_email_are_required() {
        assert!(serde_json::from_value::<User>(json!({ "email": "x@example.com" })).is_err());
        assert!(serde_json::from_value::<User>(json!({ "username": "x" })).is_err());
    }

    #[test]
    fn timestamp_round_trips_as_rfc3339() {
        let raw = json!({
            "id": 3,
            "username": "wasman",
            "email": "wasman01@gmail.com",
            "firstname": "Abdulwasiu",
            "lastname": "Anakobe",
            "sex": "male",
            "date_created": "2023-02-01T10:20:30.123456Z"
        });
        let user: User = serde_json::from_value(raw).unwrap();
        let created = user.date_created.unwrap();
        assert_eq!(created.timestamp(), 1675246830);

        let back: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn unparseable_timestamp_reads_as_absent() {
        for raw in [json!(""), json!("yesterday"), json!(12345), json!(null)] {
            let user: User = serde_json::from_value(json!({
                "username": "medo",
                "email": "ahmed123@gmail.com",
                "date_created": raw
            }))
            .unwrap();
            assert_eq!(user.date_created, None);
        }
    }

    #[test]
    fn user_key_needs_only_id() {
        let key: UserKey = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(key.id, 3);
        assert!(key.rest.is_empty());

        let key: UserKey = serde_json::from_value(json!({ "id": 4, "username": "zain" })).unwrap();
        assert_eq!(serde_json::to_value(&key).unwrap(), json!({ "id": 4, "username": "zain" }));

        assert!(serde_json::from_value::<UserKey>(json!({ "username": "zain" })).is_err());
    }

    #[test]
    fn new_fields_borrow_the_mutable_columns() {
        let user = User {
            id: 1,
            username: "zain".into(),
            email: "zainyray@gmail.com".into(),
            firstname: Some("Zainab".into()),
            lastname: Some("Idris".into()),
            sex: None,
            date_created: None,
        };
        let f = user.new_fields();
        assert_eq!(f.username, "zain");
        assert_eq!(f.lastname, Some("Idris"));
        assert_eq!(f.sex, None);
    }
}
