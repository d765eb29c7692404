use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar(args: &[&str]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_edutrackd");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("EDUTRACK_EMPTY")
        .env_remove("EDUTRACK_TODAY")
        .env_remove("EDUTRACK_IDS")
        .env_remove("EDUTRACK_ON_DUPLICATE_MARK")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn edutrackd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn send(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = send(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

#[test]
fn deleting_student_cascades_to_classes_and_attendance() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&["--today", "2024-12-18"]);

    let summary = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.delete",
        json!({ "studentId": "4" }),
    );
    assert_eq!(summary["removed"], true);
    assert_eq!(summary["enrollmentsRemoved"], 2);
    assert_eq!(summary["recordsRemoved"], 3);

    let classes = request_ok(&mut stdin, &mut reader, "2", "classes.list", json!({}));
    for class in classes["classes"].as_array().expect("classes") {
        let enrolled = class["enrolledStudents"].as_array().expect("enrolled");
        assert!(
            !enrolled.iter().any(|v| v == "4"),
            "student 4 still enrolled in {}",
            class["name"]
        );
    }
    let math = &classes["classes"][0];
    assert_eq!(math["enrolledNames"], json!(["Alice Johnson", "Bob Smith"]));

    let records = request_ok(&mut stdin, &mut reader, "3", "attendance.list", json!({}));
    let records = records["records"].as_array().expect("records");
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|r| r["studentId"] != "4"));

    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "stats.student",
        json!({ "studentId": "4" }),
    );
    assert_eq!(stats["totalClasses"], 0);
    assert_eq!(stats["attendanceRate"], 0);

    // Deleting again is a harmless no-op.
    let again = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.delete",
        json!({ "studentId": "4" }),
    );
    assert_eq!(again["removed"], false);
    assert_eq!(again["recordsRemoved"], 0);
}

#[test]
fn deleting_class_removes_its_records_only() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);

    let summary = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.delete",
        json!({ "classId": "1" }),
    );
    assert_eq!(summary["removed"], true);
    assert_eq!(summary["recordsRemoved"], 6);

    let records = request_ok(&mut stdin, &mut reader, "2", "attendance.list", json!({}));
    let records = records["records"].as_array().expect("records");
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|r| r["classId"] != "1"));

    let students = request_ok(&mut stdin, &mut reader, "3", "students.list", json!({}));
    assert_eq!(students["students"].as_array().map(|a| a.len()), Some(5));

    let roster = send(&mut stdin, &mut reader, "4", "classes.roster", json!({ "classId": "1" }));
    assert_eq!(error_code(&roster), Some("not_found"));
}

#[test]
fn student_update_merges_and_reports_missing() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.update",
        json!({ "studentId": "3", "patch": { "status": "inactive", "phone": "(555) 000-0000" } }),
    );
    assert_eq!(updated["student"]["name"], "Carol Davis");
    assert_eq!(updated["student"]["status"], "inactive");
    assert_eq!(updated["student"]["phone"], "(555) 000-0000");

    let active = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.list",
        json!({ "activeOnly": true }),
    );
    assert_eq!(active["students"].as_array().map(|a| a.len()), Some(4));

    let found = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.list",
        json!({ "query": "DAVIS" }),
    );
    assert_eq!(found["students"][0]["studentId"], "STU003");

    let missing = send(
        &mut stdin,
        &mut reader,
        "4",
        "students.update",
        json!({ "studentId": "nope", "patch": { "name": "X" } }),
    );
    assert_eq!(error_code(&missing), Some("not_found"));

    let blank = send(&mut stdin, &mut reader, "5", "students.create", json!({ "name": "  " }));
    assert_eq!(error_code(&blank), Some("bad_params"));
}
