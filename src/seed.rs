use crate::ids::IdGenerator;
use crate::model::{AttendanceRecord, AttendanceStatus, Class, Student, StudentStatus};
use crate::store::Store;

/// Demonstration dataset loaded at startup unless `--empty` is given.
pub fn seeded_store(ids: Box<dyn IdGenerator>) -> Store {
    Store::with_data(ids, students(), classes(), attendance())
}

fn student(
    id: &str,
    name: &str,
    email: &str,
    code: &str,
    enrolled: &str,
    phone: &str,
    grade: &str,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        student_id: code.to_string(),
        enrollment_date: enrolled.to_string(),
        phone: phone.to_string(),
        grade: grade.to_string(),
        status: StudentStatus::Active,
    }
}

fn students() -> Vec<Student> {
    vec![
        student("1", "Alice Johnson", "alice.johnson@email.com", "STU001", "2024-09-01", "(555) 123-4567", "10th Grade"),
        student("2", "Bob Smith", "bob.smith@email.com", "STU002", "2024-09-01", "(555) 234-5678", "10th Grade"),
        student("3", "Carol Davis", "carol.davis@email.com", "STU003", "2024-09-05", "(555) 345-6789", "11th Grade"),
        student("4", "David Wilson", "david.wilson@email.com", "STU004", "2024-09-01", "(555) 456-7890", "10th Grade"),
        student("5", "Emma Brown", "emma.brown@email.com", "STU005", "2024-09-03", "(555) 567-8901", "11th Grade"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn class(
    id: &str,
    name: &str,
    subject: &str,
    instructor: &str,
    schedule: &str,
    room: &str,
    capacity: u32,
    enrolled: &[&str],
) -> Class {
    Class {
        id: id.to_string(),
        name: name.to_string(),
        subject: subject.to_string(),
        instructor: instructor.to_string(),
        schedule: schedule.to_string(),
        room: room.to_string(),
        capacity,
        enrolled_students: enrolled.iter().map(|s| s.to_string()).collect(),
        start_date: "2024-09-01".to_string(),
        end_date: "2024-12-15".to_string(),
    }
}

fn classes() -> Vec<Class> {
    vec![
        class("1", "Mathematics 101", "Mathematics", "Dr. Sarah Miller", "Mon, Wed, Fri - 9:00 AM", "Room 101", 30, &["1", "2", "4"]),
        class("2", "English Literature", "English", "Prof. Michael Chen", "Tue, Thu - 10:30 AM", "Room 205", 25, &["1", "3", "5"]),
        class("3", "Chemistry Lab", "Chemistry", "Dr. Lisa Anderson", "Wed - 2:00 PM", "Lab 301", 20, &["2", "3", "4", "5"]),
    ]
}

fn attendance() -> Vec<AttendanceRecord> {
    use AttendanceStatus::*;
    let rows: [(&str, &str, &str, &str, AttendanceStatus, Option<&str>); 13] = [
        ("1", "1", "1", "2024-12-16", Present, None),
        ("2", "2", "1", "2024-12-16", Late, None),
        ("3", "4", "1", "2024-12-16", Present, None),
        ("4", "1", "1", "2024-12-13", Present, None),
        ("5", "2", "1", "2024-12-13", Absent, None),
        ("6", "4", "1", "2024-12-13", Present, None),
        ("7", "1", "2", "2024-12-17", Present, None),
        ("8", "3", "2", "2024-12-17", Present, None),
        ("9", "5", "2", "2024-12-17", Excused, Some("Medical appointment")),
        ("10", "2", "3", "2024-12-18", Present, None),
        ("11", "3", "3", "2024-12-18", Present, None),
        ("12", "4", "3", "2024-12-18", Late, None),
        ("13", "5", "3", "2024-12-18", Absent, None),
    ];
    rows.into_iter()
        .map(|(id, student_id, class_id, date, status, notes)| AttendanceRecord {
            id: id.to_string(),
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            date: date.to_string(),
            status,
            notes: notes.map(|n| n.to_string()),
        })
        .collect()
}
