//! Project validation
//!
//! Validates the fields collected for a new project and parses the raw
//! status and date strings typed into the shell.

use chrono::NaiveDate;

use crate::application::errors::{AppResult, ApplicationError};
use crate::domain::projects::ProjectStatus;
use crate::error::Error;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;

/// Accepted date layouts, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Validator for project-related operations
pub struct ProjectValidator;

impl ProjectValidator {
    /// Validate a project name
    ///
    /// Rules:
    /// - Required (must not be blank)
    /// - At most 200 characters
    pub fn validate_name(name: &str) -> AppResult<()> {
        Self::require("name", name, MAX_NAME_LEN)
    }

    /// Validate a project description
    ///
    /// Rules:
    /// - Required (must not be blank)
    /// - At most 2000 characters
    pub fn validate_description(description: &str) -> AppResult<()> {
        Self::require("description", description, MAX_DESCRIPTION_LEN)
    }

    /// Parse a date in `YYYY-MM-DD` or `DD/MM/YYYY` form
    pub fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
        let raw = raw.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| {
                ApplicationError::validation(field, Error::InvalidDate(raw.to_string()).to_string())
            })
    }

    /// Parse a status name, key or label
    pub fn parse_status(raw: &str) -> AppResult<ProjectStatus> {
        ProjectStatus::parse(raw)
            .ok_or_else(|| ApplicationError::domain(Error::InvalidStatus(raw.trim().to_string())))
    }

    /// Validate all required project fields at once
    pub fn validate_create(name: &str, description: &str) -> AppResult<()> {
        Self::validate_name(name)?;
        Self::validate_description(description)?;
        Ok(())
    }

    fn require(field: &str, value: &str, max_len: usize) -> AppResult<()> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ApplicationError::validation(
                field,
                format!("Project {} is required", field),
            ));
        }

        if value.chars().count() > max_len {
            return Err(ApplicationError::validation(
                field,
                format!("Project {} must be {} characters or less", field, max_len),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_valid() {
        assert!(ProjectValidator::validate_name("Sales Dashboard").is_ok());
        assert!(ProjectValidator::validate_name("a").is_ok());
        assert!(ProjectValidator::validate_name("Relatório 2024 / Q1").is_ok());
    }

    #[test]
    fn test_validate_name_required() {
        let err = ProjectValidator::validate_name("").unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(ProjectValidator::validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_too_long() {
        let long_name = "a".repeat(201);
        assert!(ProjectValidator::validate_name(&long_name).is_err());
        assert!(ProjectValidator::validate_name(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_description() {
        assert!(ProjectValidator::validate_description("A short description").is_ok());
        assert!(ProjectValidator::validate_description("").is_err());

        let long_desc = "a".repeat(2001);
        assert!(ProjectValidator::validate_description(&long_desc).is_err());
    }

    #[test]
    fn test_validate_create() {
        assert!(ProjectValidator::validate_create("Sales", "Monthly cube").is_ok());

        let err = ProjectValidator::validate_create("Sales", " ").unwrap_err();
        assert_eq!(err.field(), Some("description"));
        let err = ProjectValidator::validate_create("", "").unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(ProjectValidator::parse_date("start", "2024-03-15").unwrap(), expected);
        assert_eq!(ProjectValidator::parse_date("start", "15/03/2024").unwrap(), expected);
        assert_eq!(ProjectValidator::parse_date("start", " 2024-03-15 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        let err = ProjectValidator::parse_date("end", "2024-02-30").unwrap_err();
        assert_eq!(err.field(), Some("end"));
        assert!(ProjectValidator::parse_date("end", "03/15/2024").is_err());
        assert!(ProjectValidator::parse_date("end", "tomorrow").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            ProjectValidator::parse_status("In Progress").unwrap(),
            ProjectStatus::InProgress
        );
        let err = ProjectValidator::parse_status("Done").unwrap_err();
        assert!(err.to_string().contains("Done"));
    }
}
