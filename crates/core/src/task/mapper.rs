//! Pure transformations between wire shapes and the stored task document.

use chrono::{NaiveDate, NaiveDateTime, ParseError, Utc};

use super::api::{TaskDetails, TaskRequest, TaskSummary};
use super::model::{Task, TaskStatus};

/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn parse_due_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDateTime::parse_from_str(raw, DUE_DATE_FORMAT).map(|parsed| parsed.date())
}

/// Build a new task document from a create request.
///
/// Status and the deleted flag are forced regardless of what the request
/// carries; creation stamps are taken from the request's owner.
pub fn create_of(request: &TaskRequest) -> Result<Task, ParseError> {
    Ok(Task {
        id: request.id.clone(),
        user_id: request.user_id.clone(),
        title: request.title.clone(),
        description: request.description.clone(),
        due_date: Some(parse_due_date(&request.due_date)?),
        status: Some(TaskStatus::Pending),
        created_date: Some(Utc::now()),
        created_by: request.user_id.clone(),
        last_modified_date: None,
        last_modified_by: None,
        deleted: false,
    })
}

/// Build the replacement document for an update request.
///
/// Carries only the fields present on the request: creation stamps and the
/// deleted flag are not preserved, since the update operation is a
/// full-field replace.
pub fn update_of(request: &TaskRequest) -> Result<Task, ParseError> {
    Ok(Task {
        id: request.id.clone(),
        user_id: request.user_id.clone(),
        title: request.title.clone(),
        description: request.description.clone(),
        due_date: Some(parse_due_date(&request.due_date)?),
        status: request.status,
        created_date: None,
        created_by: None,
        last_modified_date: Some(Utc::now()),
        last_modified_by: request.user_id.clone(),
        deleted: false,
    })
}

/// Abbreviated response shape for list results.
pub fn response_of(task: Task) -> TaskSummary {
    TaskSummary {
        id: task.id,
        title: task.title,
        description: task.description,
    }
}

/// Full response shape for single-item results.
pub fn with_details_of(task: Task) -> TaskDetails {
    TaskDetails {
        id: task.id,
        user_id: task.user_id,
        title: task.title,
        description: task.description,
        due_date: task.due_date,
        status: task.status,
        created_date: task.created_date,
        created_by: task.created_by,
        last_modified_date: task.last_modified_date,
        last_modified_by: task.last_modified_by,
        deleted: task.deleted,
    }
}
