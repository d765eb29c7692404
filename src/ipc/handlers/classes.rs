use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{decode, get_optional_bool, get_optional_str, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{Class, ClassPatch, NewClass, Student};
use crate::{query, stats};
use serde_json::json;

/// Class as shown in listings: the entity plus roster hints for the UI.
fn class_json(class: &Class, students: &[Student]) -> serde_json::Value {
    let mut v = json!(class);
    v["enrolledCount"] = json!(class.enrolled_students.len());
    v["overCapacity"] = json!(class.over_capacity());
    v["enrolledNames"] = json!(query::enrolled_names(students, &class.enrolled_students));
    v
}

fn classes_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let students = state.store.students();
    let classes = match get_optional_str(params, "query") {
        Some(term) => query::search_classes(state.store.classes(), &term),
        None => state.store.classes().iter().collect(),
    };
    let rows: Vec<serde_json::Value> = classes.into_iter().map(|c| class_json(c, students)).collect();
    Ok(json!({ "classes": rows }))
}

fn classes_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let mut data: NewClass = decode(params, None)?;
    data.name = data.name.trim().to_string();
    if data.name.is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let class = state.store.add_class(data);
    Ok(json!({ "class": class_json(&class, state.store.students()) }))
}

fn classes_update(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let patch: ClassPatch = decode(params, Some("patch"))?;
    match state.store.update_class(&class_id, patch) {
        Some(class) => Ok(json!({ "class": class_json(&class, state.store.students()) })),
        None => Err(HandlerErr::not_found("class", &class_id)),
    }
}

fn classes_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    Ok(json!(state.store.delete_class(&class_id)))
}

fn classes_roster(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    if state.store.class(&class_id).is_none() {
        return Err(HandlerErr::not_found("class", &class_id));
    }
    Ok(json!({ "students": stats::class_roster(&state.store, &class_id) }))
}

fn classes_set_enrollment(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let student_id = get_required_str(params, "studentId")?;
    if state.store.student(&student_id).is_none() {
        return Err(HandlerErr::not_found("student", &student_id));
    }
    let Some(current) = state.store.class(&class_id) else {
        return Err(HandlerErr::not_found("class", &class_id));
    };
    // Without an explicit flag the call toggles, like the class form checkbox.
    let enrolled = get_optional_bool(params, "enrolled")?
        .unwrap_or_else(|| !query::is_enrolled(&current.enrolled_students, &student_id));
    match state.store.set_enrollment(&class_id, &student_id, enrolled) {
        Some(class) => Ok(json!({ "class": class_json(&class, state.store.students()) })),
        None => Err(HandlerErr::not_found("class", &class_id)),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "classes.list" => classes_list(state, &req.params),
        "classes.create" => classes_create(state, &req.params),
        "classes.update" => classes_update(state, &req.params),
        "classes.delete" => classes_delete(state, &req.params),
        "classes.roster" => classes_roster(state, &req.params),
        "classes.setEnrollment" => classes_set_enrollment(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
