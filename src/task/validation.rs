//! Schema validation for submitted tasks
//!
//! Incoming tasks arrive as loose JSON objects. Each one is checked field by
//! field and either converted into a [`Task`] or rejected with per-field
//! messages, so clients learn everything wrong with a task in one response.

use crate::task::types::*;
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 10;
pub const MIN_DEPENDENCY_ID: i64 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";

/// Validate one raw task and assign it the positional `id`
pub fn validate_task(id: TaskId, raw: &Value) -> Result<Task, FieldErrors> {
    let Some(fields) = raw.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(
            "non_field_errors".to_string(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(raw)
            )],
        );
        return Err(errors);
    };

    let mut errors = FieldErrors::new();

    let title = collect(&mut errors, "title", validate_title(fields));
    let due_date = collect(&mut errors, "due_date", validate_due_date(fields));
    let estimated_hours = collect(
        &mut errors,
        "estimated_hours",
        validate_estimated_hours(fields),
    );
    let importance = collect(&mut errors, "importance", validate_importance(fields));
    let dependencies = collect(&mut errors, "dependencies", validate_dependencies(fields));

    match (title, due_date, estimated_hours, importance, dependencies) {
        (Some(title), Some(due_date), Some(estimated_hours), Some(importance), Some(dependencies))
            if errors.is_empty() =>
        {
            Ok(Task {
                id,
                title,
                due_date: Some(due_date),
                importance,
                estimated_hours,
                dependencies,
            })
        }
        _ => Err(errors),
    }
}

/// Validate every task in submission order, stopping at the first invalid one
pub fn validate_tasks(raw_tasks: &[Value]) -> Result<Vec<Task>, AnalyzeError> {
    if raw_tasks.is_empty() {
        return Err(AnalyzeError::EmptyTaskList);
    }

    raw_tasks
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            validate_task(index as TaskId, raw)
                .map_err(|errors| AnalyzeError::InvalidTaskSchema { index, errors })
        })
        .collect()
}

fn collect<T>(errors: &mut FieldErrors, field: &str, result: Result<T, Vec<String>>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(messages) => {
            errors.insert(field.to_string(), messages);
            None
        }
    }
}

fn required<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value, Vec<String>> {
    match fields.get(name) {
        None => Err(vec![REQUIRED.to_string()]),
        Some(Value::Null) => Err(vec![NOT_NULL.to_string()]),
        Some(value) => Ok(value),
    }
}

fn validate_title(fields: &Map<String, Value>) -> Result<String, Vec<String>> {
    let title = match required(fields, "title")? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return Err(vec!["Not a valid string.".to_string()]),
    };

    if title.is_empty() {
        return Err(vec!["This field may not be blank.".to_string()]);
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(vec![format!(
            "Ensure this field has no more than {} characters.",
            MAX_TITLE_LENGTH
        )]);
    }

    Ok(title)
}

fn validate_due_date(fields: &Map<String, Value>) -> Result<NaiveDate, Vec<String>> {
    let invalid = || {
        vec!["Date has wrong format. Use one of these formats instead: YYYY-MM-DD.".to_string()]
    };

    match required(fields, "due_date")? {
        Value::String(text) => {
            NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

fn validate_estimated_hours(fields: &Map<String, Value>) -> Result<f64, Vec<String>> {
    let hours = match required(fields, "estimated_hours")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|hours| hours.is_finite())
    .ok_or_else(|| vec!["A valid number is required.".to_string()])?;

    if hours <= 0.0 {
        return Err(vec!["Ensure this value is greater than 0.".to_string()]);
    }

    Ok(hours)
}

fn validate_importance(fields: &Map<String, Value>) -> Result<u8, Vec<String>> {
    let importance = parse_integer(required(fields, "importance")?)
        .ok_or_else(|| vec!["A valid integer is required.".to_string()])?;

    check_range(importance, MIN_IMPORTANCE, Some(MAX_IMPORTANCE))?;

    Ok(importance as u8)
}

fn validate_dependencies(fields: &Map<String, Value>) -> Result<Vec<TaskId>, Vec<String>> {
    let items = match fields.get("dependencies") {
        None => return Ok(Vec::new()),
        Some(Value::Null) => return Err(vec![NOT_NULL.to_string()]),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(vec![format!(
                "Expected a list of items but got type \"{}\".",
                json_type_name(other)
            )]);
        }
    };

    let mut dependencies = Vec::with_capacity(items.len());
    let mut messages = Vec::new();

    for (position, item) in items.iter().enumerate() {
        let checked = parse_integer(item)
            .ok_or_else(|| vec!["A valid integer is required.".to_string()])
            .and_then(|id| check_range(id, MIN_DEPENDENCY_ID, None).map(|_| id));

        match checked {
            Ok(id) => dependencies.push(id as TaskId),
            Err(item_messages) => messages.extend(
                item_messages
                    .into_iter()
                    .map(|message| format!("Item {}: {}", position, message)),
            ),
        }
    }

    if messages.is_empty() {
        Ok(dependencies)
    } else {
        Err(messages)
    }
}

/// Integers, integral floats (`5.0`) and numeric strings are accepted
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite() && float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|float| float.is_finite() && float.fract() == 0.0)
                    .map(|float| float as i64)
            })
        }
        _ => None,
    }
}

fn check_range(value: i64, min: i64, max: Option<i64>) -> Result<(), Vec<String>> {
    if value < min {
        return Err(vec![format!(
            "Ensure this value is greater than or equal to {}.",
            min
        )]);
    }

    match max {
        Some(max) if value > max => Err(vec![format!(
            "Ensure this value is less than or equal to {}.",
            max
        )]),
        _ => Ok(()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
