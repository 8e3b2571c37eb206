use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

macro_rules! string_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id_newtype!(CourseId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "creditScore")]
    pub credit_score: i32,
}

impl Course {
    pub fn new(course_id: impl Into<CourseId>, course_name: impl Into<String>, credit_score: i32) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            credit_score,
        }
    }
}

/// Parses the free-text credit score field into an integer.
///
/// Surrounding whitespace is ignored; anything else that `i32` does not
/// accept is reported as [`ErrorCode::InvalidInput`](crate::error::ErrorCode::InvalidInput).
pub fn parse_credit_score(raw: &str) -> Result<i32, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_input("credit score is required"));
    }
    trimmed.parse::<i32>().map_err(|e| {
        ApiError::invalid_input(format!("credit score '{trimmed}' is not an integer: {e}"))
    })
}
