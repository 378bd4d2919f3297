//! Restaurant Model

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    /// Format: "HH:MM-HH:MM" (e.g. "09:00-18:00")
    pub opening_hours: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestaurantCreate {
    pub owner_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(custom(function = validate_opening_hours))]
    pub opening_hours: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Opening hours must be "HH:MM-HH:MM"
pub fn validate_opening_hours(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 11
        && bytes[2] == b':'
        && bytes[8] == b':'
        && bytes[5] == b'-'
        && [0, 1, 3, 4, 6, 7, 9, 10]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("opening_hours_format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_hours_format() {
        assert!(validate_opening_hours("09:00-18:00").is_ok());
        assert!(validate_opening_hours("00:00-23:59").is_ok());
        assert!(validate_opening_hours("9:00-18:00").is_err());
        assert!(validate_opening_hours("09:00 18:00").is_err());
        assert!(validate_opening_hours("open all day").is_err());
    }
}
