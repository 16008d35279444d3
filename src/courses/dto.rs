use serde::Deserialize;

use crate::validation::{FieldErrors, RepoError};

const TITLE_MISSING: &str = "Please provide a title";
const DESCRIPTION_MISSING: &str = "Please provide a description";

/// Body of POST /courses. The owner comes from the authenticated user,
/// so a `userId` in the body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Body of PUT /courses/:id. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl NewCourse {
    pub fn validate(&self) -> Result<(&str, &str), RepoError> {
        let mut errors = FieldErrors::new();
        errors.require(self.title.as_deref(), TITLE_MISSING, TITLE_MISSING);
        errors.require(self.description.as_deref(), DESCRIPTION_MISSING, DESCRIPTION_MISSING);
        errors.into_result()?;
        Ok((
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
        ))
    }
}

impl CourseChanges {
    pub fn validate(&self) -> Result<(), RepoError> {
        let mut errors = FieldErrors::new();
        errors.reject_empty(self.title.as_deref(), TITLE_MISSING);
        errors.reject_empty(self.description.as_deref(), DESCRIPTION_MISSING);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_course_requires_title_and_description() {
        let course: NewCourse = serde_json::from_str(r#"{"estimatedTime":"2h"}"#).unwrap();
        match course.validate() {
            Err(RepoError::Validation(msgs)) => {
                assert_eq!(msgs, vec![TITLE_MISSING, DESCRIPTION_MISSING])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn changes_may_omit_required_fields() {
        let changes: CourseChanges = serde_json::from_str(r#"{"materialsNeeded":"pen"}"#).unwrap();
        assert!(changes.validate().is_ok());

        let changes: CourseChanges = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert!(matches!(changes.validate(), Err(RepoError::Validation(_))));
    }
}
