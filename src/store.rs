//! In-memory entity store.
//!
//! Owns students, classes and attendance records and applies every mutation
//! with its cascade inside a single `&mut self` call, so readers never see a
//! half-applied delete.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::ids::IdGenerator;
use crate::model::{
    AttendanceRecord, Class, ClassPatch, NewAttendance, NewClass, NewStudent, Student,
    StudentPatch,
};
use crate::query;

/// What to do when attendance is marked for a (student, class, date) that
/// already has a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMarkPolicy {
    /// Keep the first mark; later marks are ignored.
    #[default]
    KeepFirst,
    /// Overwrite status and notes of the existing record in place.
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkOutcome {
    Created(AttendanceRecord),
    AlreadyMarked(AttendanceRecord),
    Replaced(AttendanceRecord),
}

impl MarkOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkOutcome::Created(_) => "created",
            MarkOutcome::AlreadyMarked(_) => "alreadyMarked",
            MarkOutcome::Replaced(_) => "replaced",
        }
    }

    pub fn record(&self) -> &AttendanceRecord {
        match self {
            MarkOutcome::Created(r) | MarkOutcome::AlreadyMarked(r) | MarkOutcome::Replaced(r) => r,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeSummary {
    pub removed: bool,
    pub enrollments_removed: usize,
    pub records_removed: usize,
}

pub struct Store {
    students: Vec<Student>,
    classes: Vec<Class>,
    attendance: Vec<AttendanceRecord>,
    ids: Box<dyn IdGenerator>,
    duplicate_policy: DuplicateMarkPolicy,
}

impl Store {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            students: Vec::new(),
            classes: Vec::new(),
            attendance: Vec::new(),
            ids,
            duplicate_policy: DuplicateMarkPolicy::default(),
        }
    }

    /// Build a store around existing collections. Enrollment lists are
    /// normalized against the given students.
    pub fn with_data(
        ids: Box<dyn IdGenerator>,
        students: Vec<Student>,
        classes: Vec<Class>,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        let mut store = Self {
            students,
            classes: Vec::new(),
            attendance,
            ids,
            duplicate_policy: DuplicateMarkPolicy::default(),
        };
        for mut class in classes {
            class.enrolled_students = store.normalize_enrollment(class.enrolled_students);
            store.classes.push(class);
        }
        store
    }

    pub fn set_duplicate_policy(&mut self, policy: DuplicateMarkPolicy) {
        self.duplicate_policy = policy;
    }

    pub fn duplicate_policy(&self) -> DuplicateMarkPolicy {
        self.duplicate_policy
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn add_student(&mut self, data: NewStudent) -> Student {
        let student = Student {
            id: self.ids.next_id(),
            name: data.name,
            email: data.email,
            student_id: data.student_id,
            enrollment_date: data.enrollment_date,
            phone: data.phone,
            grade: data.grade,
            status: data.status,
        };
        info!(student_id = %student.id, "student added");
        self.students.push(student.clone());
        student
    }

    pub fn update_student(&mut self, id: &str, patch: StudentPatch) -> Option<Student> {
        let Some(student) = self.students.iter_mut().find(|s| s.id == id) else {
            debug!(student_id = id, "update of unknown student ignored");
            return None;
        };
        patch.apply(student);
        info!(student_id = id, "student updated");
        Some(student.clone())
    }

    pub fn delete_student(&mut self, id: &str) -> CascadeSummary {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        let removed = self.students.len() != before;

        let mut enrollments_removed = 0;
        for class in &mut self.classes {
            let n = class.enrolled_students.len();
            class.enrolled_students.retain(|sid| sid != id);
            enrollments_removed += n - class.enrolled_students.len();
        }

        let n = self.attendance.len();
        self.attendance.retain(|a| a.student_id != id);
        let records_removed = n - self.attendance.len();

        let summary = CascadeSummary {
            removed,
            enrollments_removed,
            records_removed,
        };
        if removed {
            info!(
                student_id = id,
                enrollments_removed, records_removed, "student deleted"
            );
        } else {
            debug!(student_id = id, "delete of unknown student");
        }
        summary
    }

    pub fn add_class(&mut self, data: NewClass) -> Class {
        let enrolled_students = self.normalize_enrollment(data.enrolled_students);
        let class = Class {
            id: self.ids.next_id(),
            name: data.name,
            subject: data.subject,
            instructor: data.instructor,
            schedule: data.schedule,
            room: data.room,
            capacity: data.capacity,
            enrolled_students,
            start_date: data.start_date,
            end_date: data.end_date,
        };
        info!(class_id = %class.id, enrolled = class.enrolled_students.len(), "class added");
        self.classes.push(class.clone());
        class
    }

    pub fn update_class(&mut self, id: &str, mut patch: ClassPatch) -> Option<Class> {
        let enrollment = patch
            .enrolled_students
            .take()
            .map(|ids| self.normalize_enrollment(ids));
        let Some(class) = self.classes.iter_mut().find(|c| c.id == id) else {
            debug!(class_id = id, "update of unknown class ignored");
            return None;
        };
        patch.apply_fields(class);
        if let Some(ids) = enrollment {
            class.enrolled_students = ids;
        }
        info!(class_id = id, "class updated");
        Some(class.clone())
    }

    pub fn delete_class(&mut self, id: &str) -> CascadeSummary {
        let mut enrollments_removed = 0;
        let before = self.classes.len();
        self.classes.retain(|c| {
            if c.id == id {
                enrollments_removed += c.enrolled_students.len();
                false
            } else {
                true
            }
        });
        let removed = self.classes.len() != before;

        let n = self.attendance.len();
        self.attendance.retain(|a| a.class_id != id);
        let records_removed = n - self.attendance.len();

        if removed {
            info!(class_id = id, records_removed, "class deleted");
        } else {
            debug!(class_id = id, "delete of unknown class");
        }
        CascadeSummary {
            removed,
            enrollments_removed,
            records_removed,
        }
    }

    /// Add or remove one student from a class roster. Returns the updated
    /// class, or `None` when either the class or the student is unknown.
    pub fn set_enrollment(&mut self, class_id: &str, student_id: &str, enrolled: bool) -> Option<Class> {
        if self.student(student_id).is_none() {
            return None;
        }
        let class = self.classes.iter_mut().find(|c| c.id == class_id)?;
        let present = query::is_enrolled(&class.enrolled_students, student_id);
        if enrolled && !present {
            class.enrolled_students.push(student_id.to_string());
        } else if !enrolled && present {
            class.enrolled_students.retain(|s| s != student_id);
        }
        info!(class_id, student_id, enrolled, "enrollment set");
        Some(class.clone())
    }

    pub fn mark_attendance(&mut self, mark: NewAttendance) -> MarkOutcome {
        let existing = self.attendance.iter_mut().find(|a| {
            a.student_id == mark.student_id && a.class_id == mark.class_id && a.date == mark.date
        });
        if let Some(record) = existing {
            return match self.duplicate_policy {
                DuplicateMarkPolicy::KeepFirst => {
                    debug!(
                        record_id = %record.id,
                        kept = record.status.as_str(),
                        ignored = mark.status.as_str(),
                        "attendance already marked"
                    );
                    MarkOutcome::AlreadyMarked(record.clone())
                }
                DuplicateMarkPolicy::Replace => {
                    record.status = mark.status;
                    record.notes = mark.notes;
                    info!(record_id = %record.id, status = record.status.as_str(), "attendance replaced");
                    MarkOutcome::Replaced(record.clone())
                }
            };
        }

        let record = AttendanceRecord {
            id: self.ids.next_id(),
            student_id: mark.student_id,
            class_id: mark.class_id,
            date: mark.date,
            status: mark.status,
            notes: mark.notes,
        };
        info!(
            record_id = %record.id,
            student_id = %record.student_id,
            class_id = %record.class_id,
            date = %record.date,
            status = record.status.as_str(),
            "attendance marked"
        );
        self.attendance.push(record.clone());
        MarkOutcome::Created(record)
    }

    /// Keep known student ids, first occurrence wins.
    fn normalize_enrollment(&self, ids: Vec<String>) -> Vec<String> {
        let known: HashSet<&str> = self.students.iter().map(|s| s.id.as_str()).collect();
        let mut seen: HashSet<String> = HashSet::new();
        ids.into_iter()
            .filter(|id| known.contains(id.as_str()))
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}
