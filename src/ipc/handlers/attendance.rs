use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_date, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendanceStatus, NewAttendance};
use crate::stats;
use serde_json::json;

fn parse_status(params: &serde_json::Value) -> Result<AttendanceStatus, HandlerErr> {
    let raw = get_required_str(params, "status")?;
    AttendanceStatus::parse(&raw).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: "status must be one of: present, absent, late, excused".to_string(),
        details: Some(json!({ "status": raw })),
    })
}

fn attendance_list(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "records": state.store.attendance() }))
}

fn attendance_mark(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let mark = NewAttendance {
        student_id: get_required_str(params, "studentId")?,
        class_id: get_required_str(params, "classId")?,
        date: get_required_date(params, "date")?,
        status: parse_status(params)?,
        notes: get_optional_str(params, "notes"),
    };
    let outcome = state.store.mark_attendance(mark);
    Ok(json!({
        "outcome": outcome.as_str(),
        "record": outcome.record()
    }))
}

fn attendance_for_class_on_date(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let date = get_required_date(params, "date")?;
    let records = stats::attendance_for_class_on_date(state.store.attendance(), &class_id, &date);
    Ok(json!({ "records": records }))
}

fn attendance_mark_sheet(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let date = get_required_date(params, "date")?;
    let Some(class) = state.store.class(&class_id) else {
        return Err(HandlerErr::not_found("class", &class_id));
    };
    let statuses: Vec<&str> = AttendanceStatus::ALL.iter().map(|s| s.as_str()).collect();
    Ok(json!({
        "class": { "id": class.id, "name": class.name, "instructor": class.instructor },
        "date": date,
        "statuses": statuses,
        "rows": stats::mark_sheet(&state.store, &class_id, &date)
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.list" => attendance_list(state),
        "attendance.mark" => attendance_mark(state, &req.params),
        "attendance.forClassOnDate" => attendance_for_class_on_date(state, &req.params),
        "attendance.markSheet" => attendance_mark_sheet(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
