use serde::{Deserialize, Serialize};

use crate::{
    domain::{parse_credit_score, CourseId},
    error::ApiError,
};

/// Credit score as sent by a caller: either a JSON number or the raw text
/// typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreditScoreInput {
    Number(i32),
    Text(String),
}

impl CreditScoreInput {
    pub fn resolve(&self) -> Result<i32, ApiError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => parse_credit_score(raw),
        }
    }
}

impl From<i32> for CreditScoreInput {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCourseRequest {
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "creditScore")]
    pub credit_score: CreditScoreInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "creditScore")]
    pub credit_score: CreditScoreInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCourseResponse {
    pub removed: usize,
}
