use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_optional_str;
use crate::ipc::types::{AppState, Request};
use crate::report;
use serde_json::json;
use std::path::PathBuf;

fn reports_students(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "rows": report::student_report(&state.store) }))
}

fn reports_export_csv(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let rows = report::student_report(&state.store);
    let csv = report::report_csv(&rows);
    let mut result = json!({
        "csv": csv,
        "rowsExported": rows.len()
    });
    if let Some(out_path) = get_optional_str(params, "outPath") {
        let out = PathBuf::from(&out_path);
        report::write_csv(&out, &csv).map_err(|e| HandlerErr {
            code: "io_failed",
            message: format!("{:#}", e),
            details: Some(json!({ "path": out_path })),
        })?;
        tracing::info!(path = %out.display(), rows = rows.len(), "report exported");
        result["path"] = json!(out_path);
    }
    Ok(result)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "reports.students" => reports_students(state),
        "reports.exportCsv" => reports_export_csv(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
