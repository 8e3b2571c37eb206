use shared::domain::{Course, CourseId};

/// Ordered, in-memory course collection. Insertion order is display order.
///
/// Course IDs are not required to be unique here; callers that want
/// uniqueness check [`CourseRepository::contains`] before adding.
#[derive(Debug, Clone, Default)]
pub struct CourseRepository {
    courses: Vec<Course>,
}

impl CourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a course and returns the stored record.
    pub fn add_course(
        &mut self,
        course_id: CourseId,
        course_name: String,
        credit_score: i32,
    ) -> &Course {
        self.courses.push(Course {
            course_id,
            course_name,
            credit_score,
        });
        &self.courses[self.courses.len() - 1]
    }

    /// Overwrites name and score of the first course with `course_id`.
    /// Returns `false` when nothing matched.
    pub fn update_course(
        &mut self,
        course_id: &CourseId,
        course_name: String,
        credit_score: i32,
    ) -> bool {
        match self
            .courses
            .iter_mut()
            .find(|course| &course.course_id == course_id)
        {
            Some(course) => {
                course.course_name = course_name;
                course.credit_score = credit_score;
                true
            }
            None => false,
        }
    }

    /// Removes every course with `course_id` and returns how many went.
    pub fn delete_course(&mut self, course_id: &CourseId) -> usize {
        let before = self.courses.len();
        self.courses.retain(|course| &course.course_id != course_id);
        before - self.courses.len()
    }

    pub fn list_courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, course_id: &CourseId) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| &course.course_id == course_id)
    }

    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.find(course_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
