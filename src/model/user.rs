use serde::{Deserialize, Serialize};

use crate::model::record::Record;
use crate::model::{RecordId, UserFilter};

/// Account-holder record. Every field besides the identifier is optional,
/// and an absent field is distinct from an empty or zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier, immutable after creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Identifier of this person in the external ERP system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erp_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Login secret, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Whether the account holder is currently active. Persisted as a
    /// single-byte code, see `model::policy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Record for User {
    type Filter = UserFilter;

    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn apply_update(&mut self, candidate: Self) {
        if let Some(erp_id) = candidate.erp_id {
            self.erp_id = Some(erp_id);
        }
        if let Some(first_name) = candidate.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = candidate.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(username) = candidate.username {
            self.username = Some(username);
        }
        if let Some(password) = candidate.password {
            self.password = Some(password);
        }
        // The active flag always takes the candidate's value, unset
        // included; its representation cannot tell "omitted" from "false".
        self.active = candidate.active;
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        if let Some(id) = filter.id {
            if self.id != Some(id) {
                return false;
            }
        }
        if let Some(erp_id) = &filter.erp_id {
            if self.erp_id.as_ref() != Some(erp_id) {
                return false;
            }
        }
        if let Some(first_name) = &filter.first_name {
            if self.first_name.as_ref() != Some(first_name) {
                return false;
            }
        }
        if let Some(last_name) = &filter.last_name {
            if self.last_name.as_ref() != Some(last_name) {
                return false;
            }
        }
        if let Some(username) = &filter.username {
            if self.username.as_ref() != Some(username) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> User {
        User {
            id: Some(1),
            erp_id: Some("ERP-7".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: Some("alovelace".to_string()),
            password: Some("secret".to_string()),
            active: Some(true),
        }
    }

    #[test]
    fn update_overwrites_present_fields_and_preserves_absent_ones() {
        let mut stored = stored_user();
        stored.apply_update(User {
            first_name: Some("Augusta".to_string()),
            active: Some(true),
            ..Default::default()
        });

        assert_eq!(stored.first_name.as_deref(), Some("Augusta"));
        // Untouched fields keep their stored values.
        assert_eq!(stored.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(stored.username.as_deref(), Some("alovelace"));
        assert_eq!(stored.password.as_deref(), Some("secret"));
        assert_eq!(stored.erp_id.as_deref(), Some("ERP-7"));
    }

    #[test]
    fn update_never_touches_the_identifier() {
        let mut stored = stored_user();
        stored.apply_update(User {
            id: Some(999),
            username: Some("other".to_string()),
            active: Some(true),
            ..Default::default()
        });

        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.username.as_deref(), Some("other"));
    }

    #[test]
    fn active_flag_always_takes_the_candidate_value() {
        let mut stored = stored_user();
        stored.apply_update(User {
            active: Some(false),
            ..Default::default()
        });
        assert_eq!(stored.active, Some(false));

        // Even an omitted flag overwrites, unlike every other field.
        let mut stored = stored_user();
        stored.apply_update(User::default());
        assert_eq!(stored.active, None);
    }

    #[test]
    fn empty_filter_matches_any_record() {
        assert!(stored_user().matches(&UserFilter::default()));
    }

    #[test]
    fn present_predicates_are_anded() {
        let user = stored_user();
        let matching = UserFilter {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        assert!(user.matches(&matching));

        let mismatched = UserFilter {
            first_name: Some("Ada".to_string()),
            last_name: Some("Byron".to_string()),
            ..Default::default()
        };
        assert!(!user.matches(&mismatched));
    }

    #[test]
    fn omitted_json_fields_deserialize_as_none() {
        let user: User = serde_json::from_str(r#"{"username": "alovelace"}"#).unwrap();
        assert_eq!(user.username.as_deref(), Some("alovelace"));
        assert_eq!(user.first_name, None);
        assert_eq!(user.active, None);
    }
}
