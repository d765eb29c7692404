use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_date, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::stats;
use serde_json::json;

fn resolve_day(state: &AppState, params: &serde_json::Value) -> Result<String, HandlerErr> {
    Ok(get_optional_date(params, "date")?.unwrap_or_else(|| state.today()))
}

fn stats_student(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    Ok(json!(stats::student_stats(state.store.attendance(), &student_id)))
}

fn stats_class(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    Ok(json!(stats::class_stats(state.store.attendance(), &class_id)))
}

fn stats_overall(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let records = state.store.attendance();
    Ok(json!({
        "attendanceRate": stats::overall_rate(records),
        "totalRecords": records.len()
    }))
}

fn stats_today(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let day = resolve_day(state, params)?;
    let mut v = json!(stats::todays_summary(state.store.attendance(), &day));
    v["date"] = json!(day);
    Ok(v)
}

fn stats_recent_activity(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let limit = match params.get("limit") {
        None | Some(serde_json::Value::Null) => stats::DEFAULT_RECENT_ACTIVITY,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| HandlerErr::bad_params("limit must be a non-negative integer"))?
            as usize,
    };
    Ok(json!({ "activity": stats::recent_activity(&state.store, limit) }))
}

fn dashboard_summary(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let day = resolve_day(state, params)?;
    Ok(json!(stats::dashboard_summary(&state.store, &day)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "stats.student" => stats_student(state, &req.params),
        "stats.class" => stats_class(state, &req.params),
        "stats.overall" => stats_overall(state),
        "stats.today" => stats_today(state, &req.params),
        "stats.recentActivity" => stats_recent_activity(state, &req.params),
        "dashboard.summary" => dashboard_summary(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
