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

fn request(
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
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar(&["--today", "2024-12-16", "--ids", "sequential"]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["result"]["today"], "2024-12-16");
    assert_eq!(health["result"]["records"], 13);
    assert_eq!(health["result"]["duplicateMarkPolicy"], "keepFirst");

    let _ = request(&mut stdin, &mut reader, "2", "students.list", json!({}));
    let created = request(
        &mut stdin,
        &mut reader,
        "3",
        "students.create",
        json!({ "name": "Smoke Student", "studentId": "STU900" }),
    );
    let student_id = created["result"]["student"]["id"]
        .as_str()
        .expect("student id")
        .to_string();
    assert_eq!(student_id, "100");
    let _ = request(
        &mut stdin,
        &mut reader,
        "4",
        "students.update",
        json!({ "studentId": student_id, "patch": { "grade": "12th Grade" } }),
    );
    let _ = request(&mut stdin, &mut reader, "5", "classes.list", json!({}));
    let class = request(
        &mut stdin,
        &mut reader,
        "6",
        "classes.create",
        json!({ "name": "Smoke Class", "capacity": 10, "enrolledStudents": [student_id] }),
    );
    let class_id = class["result"]["class"]["id"]
        .as_str()
        .expect("class id")
        .to_string();
    let _ = request(
        &mut stdin,
        &mut reader,
        "7",
        "classes.update",
        json!({ "classId": class_id, "patch": { "room": "B2" } }),
    );
    let _ = request(&mut stdin, &mut reader, "8", "classes.roster", json!({ "classId": class_id }));
    let _ = request(
        &mut stdin,
        &mut reader,
        "9",
        "classes.setEnrollment",
        json!({ "classId": class_id, "studentId": "1", "enrolled": true }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "10",
        "attendance.mark",
        json!({ "studentId": student_id, "classId": class_id, "date": "2024-12-16", "status": "present" }),
    );
    let _ = request(&mut stdin, &mut reader, "11", "attendance.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "12",
        "attendance.forClassOnDate",
        json!({ "classId": class_id, "date": "2024-12-16" }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "13",
        "attendance.markSheet",
        json!({ "classId": class_id, "date": "2024-12-16" }),
    );
    let _ = request(&mut stdin, &mut reader, "14", "stats.student", json!({ "studentId": student_id }));
    let _ = request(&mut stdin, &mut reader, "15", "stats.class", json!({ "classId": class_id }));
    let _ = request(&mut stdin, &mut reader, "16", "stats.overall", json!({}));
    let _ = request(&mut stdin, &mut reader, "17", "stats.today", json!({}));
    let _ = request(&mut stdin, &mut reader, "18", "stats.recentActivity", json!({}));
    let _ = request(&mut stdin, &mut reader, "19", "dashboard.summary", json!({}));
    let _ = request(&mut stdin, &mut reader, "20", "reports.students", json!({}));
    let _ = request(&mut stdin, &mut reader, "21", "reports.exportCsv", json!({}));
    let _ = request(&mut stdin, &mut reader, "22", "classes.delete", json!({ "classId": class_id }));
    let _ = request(&mut stdin, &mut reader, "23", "students.delete", json!({ "studentId": student_id }));

    let unknown = {
        writeln!(stdin, "{}", json!({ "id": "24", "method": "nope.nothing" })).expect("write");
        stdin.flush().expect("flush");
        let mut line = String::new();
        reader.read_line(&mut line).expect("read");
        serde_json::from_str::<serde_json::Value>(line.trim()).expect("json")
    };
    assert_eq!(unknown["ok"], false);
    assert_eq!(unknown["error"]["code"], "not_implemented");

    writeln!(stdin, "this is not json").expect("write");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read");
    let bad: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(bad["error"]["code"], "bad_json");

    drop(stdin);
    let status = child.wait().expect("wait");
    assert!(status.success());
}
