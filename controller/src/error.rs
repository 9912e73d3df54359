// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, DError)]
pub enum ErrorKind {
    #[error("Duplicate key, {0}")]
    DuplicateKey(String),

    #[error("Referenced row doesn't exist, {0}")]
    MissingReference(String),

    #[error("Missing required value, {0}")]
    MissingValue(String),

    #[error("Value out of range, {0}")]
    CheckFailed(String),

    #[error("Failed to cast to some value ({0})")]
    ValueConvert(String),

    #[error("Couldn't cast value to {0}")]
    CastingValue(&'static str),
}

impl ErrorKind {
    /// Whether this error comes from a constraint enforced by the database
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey(_)
                | Self::MissingReference(_)
                | Self::MissingValue(_)
                | Self::CheckFailed(_)
        )
    }
}
