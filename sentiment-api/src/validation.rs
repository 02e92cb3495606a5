//! Validation Traits
//!
//! Common validation patterns extracted from route handlers.
//! Validation failures are recovered entirely at the boundary: they are
//! rejected with 422 before the orchestrator runs.

use sentiment_core::{TEXT_MAX_CHARS, TEXT_MIN_CHARS};

use crate::error::{ApiError, ApiResult};

/// Trait for validating analysis input text bounds.
///
/// Length is measured in Unicode code points, matching the 1–512 bound the
/// service contract promises.
pub trait ValidateTextBounds {
    /// Validate that the text length is within the accepted bounds.
    ///
    /// # Errors
    /// Returns `ApiError::invalid_range` when out of bounds.
    fn validate_text_bounds(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateTextBounds for str {
    fn validate_text_bounds(&self, field_name: &str) -> ApiResult<()> {
        let chars = self.chars().count();
        if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&chars) {
            return Err(ApiError::invalid_range(
                field_name,
                TEXT_MIN_CHARS,
                TEXT_MAX_CHARS,
            ));
        }
        Ok(())
    }
}

impl ValidateTextBounds for String {
    fn validate_text_bounds(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_text_bounds(field_name)
    }
}

/// Trait for validating numeric ranges.
pub trait ValidateRange {
    /// Validate that the value is positive (> 0).
    fn validate_positive(&self, field_name: &str) -> ApiResult<()>;
}

macro_rules! impl_validate_range {
    ($($t:ty),*) => {
        $(
            impl ValidateRange for $t {
                fn validate_positive(&self, field_name: &str) -> ApiResult<()> {
                    if *self <= 0 as $t {
                        return Err(ApiError::invalid_range(field_name, 1, <$t>::MAX as i64));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_range!(i32, i64, isize);
