use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{decode, get_optional_str, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{NewStudent, StudentPatch};
use crate::query;
use serde_json::json;

fn students_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let students = state.store.students();
    let mut rows = match get_optional_str(params, "query") {
        Some(term) => query::search_students(students, &term),
        None => students.iter().collect(),
    };
    if params.get("activeOnly").and_then(|v| v.as_bool()).unwrap_or(false) {
        rows = query::active_students(rows);
    }
    Ok(json!({ "students": rows }))
}

fn students_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let mut data: NewStudent = decode(params, None)?;
    data.name = data.name.trim().to_string();
    if data.name.is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let student = state.store.add_student(data);
    Ok(json!({ "student": student }))
}

fn students_update(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let patch: StudentPatch = decode(params, Some("patch"))?;
    match state.store.update_student(&student_id, patch) {
        Some(student) => Ok(json!({ "student": student })),
        None => Err(HandlerErr::not_found("student", &student_id)),
    }
}

fn students_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let summary = state.store.delete_student(&student_id);
    Ok(json!(summary))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => students_list(state, &req.params),
        "students.create" => students_create(state, &req.params),
        "students.update" => students_update(state, &req.params),
        "students.delete" => students_delete(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
