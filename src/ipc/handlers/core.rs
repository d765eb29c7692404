use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::store::DuplicateMarkPolicy;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let policy = match state.store.duplicate_policy() {
        DuplicateMarkPolicy::KeepFirst => "keepFirst",
        DuplicateMarkPolicy::Replace => "replace",
    };
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "today": state.today(),
            "students": state.store.students().len(),
            "classes": state.store.classes().len(),
            "records": state.store.attendance().len(),
            "duplicateMarkPolicy": policy
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        _ => None,
    }
}
