//! Boundary validation for rows read from the store.
//!
//! Store rows are loosely typed (free-form strings, nullable columns).
//! Converting a row into a domain record goes through a [`RecordCheck`],
//! which yields either the validated value or a [`ValidationError`]
//! naming the record, its id and the offending field.

use std::fmt::Display;

/// A store row failed validation while being converted into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {record} record {id}: {field} {reason}")]
pub struct ValidationError {
    /// Record kind, e.g. `"city"`.
    pub record: &'static str,
    /// Identifier of the offending row.
    pub id: String,
    /// Column that failed validation.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

/// Field checks for a single row.
#[derive(Debug, Clone)]
pub struct RecordCheck {
    record: &'static str,
    id: String,
}

impl RecordCheck {
    /// Starts checking the row of kind `record` identified by `id`.
    #[must_use]
    pub fn new(record: &'static str, id: impl Display) -> Self {
        Self {
            record,
            id: id.to_string(),
        }
    }

    /// Builds a [`ValidationError`] for `field`.
    #[must_use]
    pub fn invalid(&self, field: &'static str, reason: impl Into<String>) -> ValidationError {
        ValidationError {
            record: self.record,
            id: self.id.clone(),
            field,
            reason: reason.into(),
        }
    }

    /// Requires a non-blank string; returns it trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value is empty or whitespace.
    pub fn text(&self, field: &'static str, value: String) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(self.invalid(field, "must not be empty"));
        }
        Ok(trimmed.to_string())
    }

    /// Trims an optional string, mapping blank values to `None`.
    #[must_use]
    pub fn optional_text(&self, value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Requires a latitude in `[-90, 90]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for out-of-range or non-finite values.
    pub fn latitude(&self, value: f64) -> Result<f64, ValidationError> {
        self.in_range("latitude", value, -90.0, 90.0)
    }

    /// Requires a longitude in `[-180, 180]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for out-of-range or non-finite values.
    pub fn longitude(&self, value: f64) -> Result<f64, ValidationError> {
        self.in_range("longitude", value, -180.0, 180.0)
    }

    /// Requires a finite, non-negative amount.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for negative or non-finite values.
    pub fn non_negative(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(self.invalid(field, format!("must be a non-negative number, got {value}")));
        }
        Ok(value)
    }

    /// Requires a two-letter state code; returns it upper-cased.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] unless the value is exactly two ASCII
    /// letters.
    pub fn state_code(&self, value: String) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(self.invalid("state_code", format!("must be two letters, got {trimmed:?}")));
        }
        Ok(trimmed.to_ascii_uppercase())
    }

    /// Requires something that looks like an email address.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value has no `@` with text on
    /// both sides.
    pub fn email(&self, value: String) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(trimmed.to_string())
            }
            _ => Err(self.invalid("email", format!("is not an email address: {trimmed:?}"))),
        }
    }

    /// Parses a status column with `parse`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `parse` does not recognise the
    /// value.
    pub fn status<T>(
        &self,
        value: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ValidationError> {
        parse(value).ok_or_else(|| self.invalid("status", format!("unknown value {value:?}")))
    }

    fn in_range(
        &self,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<f64, ValidationError> {
        if !value.is_finite() || value < min || value > max {
            return Err(self.invalid(field, format!("must be within [{min}, {max}], got {value}")));
        }
        Ok(value)
    }
}
