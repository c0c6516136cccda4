use crate::{
    error::{ClinicError, Result},
    models::{DoctorQuery, UpdateDoctor, UpdateTask},
};

/// Largest page size a doctor listing may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Length of a hex encoded object id
const OBJECT_ID_HEX_LEN: usize = 24;

/// Validation utilities for directory requests
pub struct RecordValidator;

impl RecordValidator {
    /// Validate a textual document identifier
    ///
    /// Identifiers must be exactly 24 hexadecimal characters, the textual
    /// form of a storage object id.
    ///
    /// # Returns
    /// * `Ok(())` - If the identifier is well formed
    /// * `Err(ClinicError::InvalidIdentifier)` - Otherwise
    pub fn validate_id(id: &str) -> Result<()> {
        if id.len() != OBJECT_ID_HEX_LEN || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ClinicError::invalid_identifier(id));
        }
        Ok(())
    }

    /// Validate a doctor listing query
    ///
    /// `limit` must be between 1 and [`MAX_PAGE_LIMIT`]; the page number is
    /// not restricted since non-positive pages simply disable the offset.
    pub fn validate_doctor_query(query: &DoctorQuery) -> Result<()> {
        if query.limit < 1 {
            return Err(ClinicError::Validation(
                "limit must be a positive number".to_string(),
            ));
        }

        if query.limit > MAX_PAGE_LIMIT {
            return Err(ClinicError::Validation(format!(
                "limit must be at most {MAX_PAGE_LIMIT}"
            )));
        }

        Ok(())
    }

    pub fn validate_update_task(update: &UpdateTask) -> Result<()> {
        if update.id.trim().is_empty() {
            return Err(ClinicError::empty_field("ID"));
        }
        Self::validate_id(&update.id)
    }

    pub fn validate_update_doctor(update: &UpdateDoctor) -> Result<()> {
        if update.id.trim().is_empty() {
            return Err(ClinicError::empty_field("ID"));
        }
        Self::validate_id(&update.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(RecordValidator::validate_id("64b7f0c2a1b2c3d4e5f60718").is_ok());
        assert!(RecordValidator::validate_id("64B7F0C2A1B2C3D4E5F60718").is_ok());
        assert!(RecordValidator::validate_id("000000000000000000000000").is_ok());
    }

    #[test]
    fn test_invalid_ids() {
        let invalid = [
            "",
            "64b7f0c2",
            "64b7f0c2a1b2c3d4e5f6071",
            "64b7f0c2a1b2c3d4e5f607189",
            "64b7f0c2a1b2c3d4e5f6071g",
            "not-an-object-id-at-all!",
        ];
        for id in invalid {
            let err = RecordValidator::validate_id(id).unwrap_err();
            assert!(
                matches!(err, ClinicError::InvalidIdentifier(_)),
                "expected invalid identifier for {id:?}"
            );
        }
    }

    #[test]
    fn test_validate_doctor_query() {
        assert!(RecordValidator::validate_doctor_query(&DoctorQuery::default()).is_ok());

        let query = DoctorQuery {
            limit: MAX_PAGE_LIMIT,
            page: -1,
            ..Default::default()
        };
        assert!(RecordValidator::validate_doctor_query(&query).is_ok());

        for limit in [0, -5, MAX_PAGE_LIMIT + 1] {
            let query = DoctorQuery {
                limit,
                ..Default::default()
            };
            assert!(RecordValidator::validate_doctor_query(&query)
                .unwrap_err()
                .is_client_error());
        }
    }

    #[test]
    fn test_validate_updates() {
        let update = UpdateTask {
            id: "  ".to_string(),
            title: None,
            body: None,
        };
        assert_eq!(
            RecordValidator::validate_update_task(&update),
            Err(ClinicError::empty_field("ID"))
        );

        let update = UpdateDoctor {
            id: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RecordValidator::validate_update_doctor(&update),
            Err(ClinicError::InvalidIdentifier(_))
        ));
    }
}
