use crate::model::Record;

/// Drop any client-supplied identifier from a create candidate. The storage
/// layer assigns the real one on insert.
pub fn scrub_candidate_id<R: Record>(candidate: &mut R) {
    candidate.clear_id();
}

/// Encode the active flag into its single-byte storage code.
pub fn active_to_code(active: bool) -> u8 {
    if active {
        1
    } else {
        0
    }
}

/// Decode the storage code back into the active flag. Any nonzero code
/// counts as active; only 0 and 1 are ever written.
pub fn active_from_code(code: u8) -> bool {
    code != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn active_flag_round_trips_through_codes() {
        for flag in [true, false] {
            assert_eq!(active_from_code(active_to_code(flag)), flag);
        }
        for code in [0u8, 1u8] {
            assert_eq!(active_to_code(active_from_code(code)), code);
        }
    }

    #[test]
    fn nonzero_codes_decode_as_active() {
        assert!(active_from_code(1));
        assert!(active_from_code(7));
        assert!(!active_from_code(0));
    }

    #[test]
    fn candidate_identifier_is_discarded() {
        let mut candidate = User {
            id: Some(99),
            username: Some("mallory".to_string()),
            ..Default::default()
        };
        scrub_candidate_id(&mut candidate);
        assert_eq!(candidate.id, None);
        assert_eq!(candidate.username.as_deref(), Some("mallory"));
    }
}
