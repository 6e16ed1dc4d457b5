use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::record::RecordFilter;
use crate::model::RecordId;

/// Lookup predicates for the users collection. Present fields are ANDed;
/// absent (or empty-string) fields impose no constraint, so an empty filter
/// matches the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub erp_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Lookup predicates for the documents collection. The date bounds apply to
/// the calendar date of `issue_date` and are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

fn drop_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl RecordFilter for UserFilter {
    fn normalized(self) -> Self {
        Self {
            id: self.id,
            erp_id: drop_empty(self.erp_id),
            first_name: drop_empty(self.first_name),
            last_name: drop_empty(self.last_name),
            username: drop_empty(self.username),
        }
    }
}

impl RecordFilter for DocumentFilter {
    fn normalized(self) -> Self {
        Self {
            id: self.id,
            owner_name: drop_empty(self.owner_name),
            bank_name: drop_empty(self.bank_name),
            iban: drop_empty(self.iban),
            from_date: self.from_date,
            to_date: self.to_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_dropped_in_normalization() {
        let filter = UserFilter {
            id: Some(3),
            erp_id: Some(String::new()),
            first_name: Some("Ada".to_string()),
            last_name: None,
            username: Some(String::new()),
        }
        .normalized();

        assert_eq!(filter.id, Some(3));
        assert_eq!(filter.erp_id, None);
        assert_eq!(filter.first_name.as_deref(), Some("Ada"));
        assert_eq!(filter.username, None);
    }

    #[test]
    fn date_bounds_survive_normalization() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filter = DocumentFilter {
            owner_name: Some(String::new()),
            from_date: Some(from),
            ..Default::default()
        }
        .normalized();

        assert_eq!(filter.owner_name, None);
        assert_eq!(filter.from_date, Some(from));
    }

    #[test]
    fn missing_predicates_deserialize_as_none() {
        let filter: UserFilter =
            serde_json::from_str(r#"{"first_name": "Ada", "username": "alovelace"}"#).unwrap();
        assert_eq!(filter.first_name.as_deref(), Some("Ada"));
        assert_eq!(filter.username.as_deref(), Some("alovelace"));
        assert_eq!(filter.id, None);
        assert_eq!(filter.erp_id, None);

        let filter: DocumentFilter =
            serde_json::from_str(r#"{"from_date": "2024-01-01", "iban": "DE02100100109307118603"}"#)
                .unwrap();
        assert_eq!(
            filter.from_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(filter.iban.as_deref(), Some("DE02100100109307118603"));
        assert_eq!(filter.to_date, None);
    }
}
