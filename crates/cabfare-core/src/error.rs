//! # Error Types
//!
//! Domain-specific error types for cabfare-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Fare calculation (distance, fare, travel)                             │
//! │  └── NONE. Every calculator function is total.                          │
//! │                                                                         │
//! │  Boundary checks (this file)                                           │
//! │  ├── CoreError        - strict parsing of categories / trip types      │
//! │  └── ValidationError  - opt-in input validation                        │
//! │                                                                         │
//! │  quote-cli (separate crate)                                            │
//! │  └── CliError         - config, I/O, output                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors from strict parsing at the edge of the calculator.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Category string is not one of sedan/suv/luxury/mini.
    ///
    /// The calculator itself never sees this: it prices unknown
    /// categories at the sedan rate.
    #[error("Unknown cab category: '{0}'. Valid options: sedan, suv, luxury, mini")]
    UnknownCategory(String),

    /// Trip type string is not one-way or round-trip.
    #[error("Unknown trip type: '{0}'. Valid options: oneWay, roundTrip")]
    UnknownTripType(String),

    /// Cab profile JSON could not be parsed at all.
    #[error("Invalid cab profile: {0}")]
    InvalidProfile(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
