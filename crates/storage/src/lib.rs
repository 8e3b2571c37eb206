use std::{fmt, str::FromStr, sync::Arc};

use shared::{
    domain::{Course, CourseId},
    error::{ApiError, ErrorCode},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

mod repository;

pub use repository::CourseRepository;

/// How [`Storage`] treats duplicate and missing course IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoursePolicy {
    /// Duplicates are accepted; update/delete of a missing ID do nothing.
    #[default]
    Lenient,
    /// Duplicates are refused; update/delete of a missing ID fail.
    Strict,
}

impl FromStr for CoursePolicy {
    type Err = StorageError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(StorageError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for CoursePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("course id must not be empty")]
    EmptyId,
    #[error("course '{0}' already exists")]
    DuplicateId(CourseId),
    #[error("course '{0}' not found")]
    NotFound(CourseId),
    #[error("unknown course policy '{0}'")]
    UnknownPolicy(String),
}

impl StorageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyId => ErrorCode::InvalidInput,
            Self::DuplicateId(_) => ErrorCode::DuplicateId,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::UnknownPolicy(_) => ErrorCode::Internal,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(value: StorageError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Shared handle to one [`CourseRepository`]. Each method holds the lock for
/// a single operation, so concurrent callers are fully serialized.
#[derive(Clone)]
pub struct Storage {
    repo: Arc<Mutex<CourseRepository>>,
    policy: CoursePolicy,
}

impl Storage {
    pub fn new(policy: CoursePolicy) -> Self {
        Self {
            repo: Arc::new(Mutex::new(CourseRepository::new())),
            policy,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(CoursePolicy::Lenient)
    }

    pub fn policy(&self) -> CoursePolicy {
        self.policy
    }

    pub async fn health_check(&self) -> Result<()> {
        let repo = self.repo.lock().await;
        debug!(courses = repo.len(), "storage ping");
        Ok(())
    }

    pub async fn add_course(
        &self,
        course_id: CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<Course> {
        // An empty id has no `/courses/:course_id` path, so it could never be
        // edited or deleted again.
        if course_id.as_str().is_empty() {
            return Err(StorageError::EmptyId);
        }
        let mut repo = self.repo.lock().await;
        if self.policy == CoursePolicy::Strict && repo.contains(&course_id) {
            debug!(%course_id, "add refused: duplicate id");
            return Err(StorageError::DuplicateId(course_id));
        }
        let course = repo
            .add_course(course_id, course_name.to_string(), credit_score)
            .clone();
        debug!(course_id = %course.course_id, total = repo.len(), "course added");
        Ok(course)
    }

    /// Returns the updated course, or `None` when nothing matched under the
    /// lenient policy.
    pub async fn update_course(
        &self,
        course_id: &CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<Option<Course>> {
        let mut repo = self.repo.lock().await;
        if !repo.update_course(course_id, course_name.to_string(), credit_score) {
            debug!(%course_id, policy = %self.policy, "update matched no course");
            return match self.policy {
                CoursePolicy::Lenient => Ok(None),
                CoursePolicy::Strict => Err(StorageError::NotFound(course_id.clone())),
            };
        }
        debug!(%course_id, "course updated");
        Ok(repo.find(course_id).cloned())
    }

    pub async fn delete_course(&self, course_id: &CourseId) -> Result<usize> {
        let mut repo = self.repo.lock().await;
        let removed = repo.delete_course(course_id);
        if removed == 0 && self.policy == CoursePolicy::Strict {
            debug!(%course_id, "delete refused: not found");
            return Err(StorageError::NotFound(course_id.clone()));
        }
        debug!(%course_id, removed, total = repo.len(), "course delete");
        Ok(removed)
    }

    pub async fn list_courses(&self) -> Vec<Course> {
        self.repo.lock().await.list_courses().to_vec()
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
