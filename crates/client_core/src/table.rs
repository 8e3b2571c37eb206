//! Headless model of the course form: table rows, one optional selected row
//! and three free-text inputs.

use anyhow::Result;
use shared::{
    domain::{parse_credit_score, Course, CourseId},
    error::{ApiException, ErrorCode},
};
use tracing::debug;

use crate::CourseBackend;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub course_id: String,
    pub course_name: String,
    pub credit_score: String,
}

impl CourseForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn fill_from(&mut self, course: &Course) {
        self.course_id = course.course_id.to_string();
        self.course_name = course.course_name.clone();
        self.credit_score = course.credit_score.to_string();
    }

    fn credit_score(&self) -> Result<i32> {
        parse_credit_score(&self.credit_score).map_err(|e| ApiException::from(e).into())
    }
}

/// One table row as rendered: ID, name, credit score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub course_id: String,
    pub course_name: String,
    pub credit_score: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id.to_string(),
            course_name: course.course_name.clone(),
            credit_score: course.credit_score.to_string(),
        }
    }
}

/// Edit and delete both act on the selected row's course ID; the ID input
/// is only read by [`CourseTable::add`].
pub struct CourseTable<B> {
    backend: B,
    courses: Vec<Course>,
    selected: Option<usize>,
    pub form: CourseForm,
}

impl<B: CourseBackend> CourseTable<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            courses: Vec::new(),
            selected: None,
            form: CourseForm::default(),
        }
    }

    /// Creates the table and fetches the current list.
    pub async fn load(backend: B) -> Result<Self> {
        let mut table = Self::new(backend);
        table.refresh().await?;
        Ok(table)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn rows(&self) -> Vec<CourseRow> {
        self.courses.iter().map(CourseRow::from).collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.selected.and_then(|index| self.courses.get(index))
    }

    /// Selects `index` and copies that row into the form.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let Some(course) = self.courses.get(index) else {
            return Err(ApiException::new(
                ErrorCode::InvalidInput,
                format!("no row {index} in a table of {}", self.courses.len()),
            )
            .into());
        };
        self.form.fill_from(course);
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replaces the rows wholesale with the backend's current list.
    pub async fn refresh(&mut self) -> Result<()> {
        self.courses = self.backend.list_courses().await?;
        if self.selected.is_some_and(|index| index >= self.courses.len()) {
            self.selected = None;
        }
        debug!(rows = self.courses.len(), "course table refreshed");
        Ok(())
    }

    pub async fn add(&mut self) -> Result<()> {
        let credit_score = self.form.credit_score()?;
        self.backend
            .add_course(
                CourseId::new(self.form.course_id.clone()),
                &self.form.course_name,
                credit_score,
            )
            .await?;
        self.refresh().await?;
        self.form.clear();
        Ok(())
    }

    /// Returns `false` without touching the backend when no row is selected.
    pub async fn edit(&mut self) -> Result<bool> {
        let Some(course_id) = self.selected_course().map(|c| c.course_id.clone()) else {
            return Ok(false);
        };
        let credit_score = self.form.credit_score()?;
        self.backend
            .update_course(&course_id, &self.form.course_name, credit_score)
            .await?;
        self.refresh().await?;
        Ok(true)
    }

    /// Returns `false` without touching the backend when no row is selected.
    pub async fn delete(&mut self) -> Result<bool> {
        let Some(course_id) = self.selected_course().map(|c| c.course_id.clone()) else {
            return Ok(false);
        };
        self.backend.delete_course(&course_id).await?;
        self.selected = None;
        self.refresh().await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
