use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    /// Present and late both count toward the attendance rate.
    pub fn counts_as_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            "excused" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub enrollment_date: String,
    pub phone: String,
    pub grade: String,
    pub status: StudentStatus,
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub instructor: String,
    pub schedule: String,
    pub room: String,
    pub capacity: u32,
    pub enrolled_students: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

impl Class {
    /// Capacity is advisory; enrollment past it is allowed and only flagged.
    pub fn over_capacity(&self) -> bool {
        self.enrolled_students.len() > self.capacity as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for `students.create`. Everything but the id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub enrollment_date: String,
    pub phone: String,
    pub grade: String,
    pub status: StudentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub enrollment_date: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub status: Option<StudentStatus>,
}

impl StudentPatch {
    pub fn apply(self, s: &mut Student) {
        if let Some(v) = self.name {
            s.name = v;
        }
        if let Some(v) = self.email {
            s.email = v;
        }
        if let Some(v) = self.student_id {
            s.student_id = v;
        }
        if let Some(v) = self.enrollment_date {
            s.enrollment_date = v;
        }
        if let Some(v) = self.phone {
            s.phone = v;
        }
        if let Some(v) = self.grade {
            s.grade = v;
        }
        if let Some(v) = self.status {
            s.status = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClass {
    pub name: String,
    pub subject: String,
    pub instructor: String,
    pub schedule: String,
    pub room: String,
    pub capacity: u32,
    pub enrolled_students: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub instructor: Option<String>,
    pub schedule: Option<String>,
    pub room: Option<String>,
    pub capacity: Option<u32>,
    pub enrolled_students: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ClassPatch {
    /// Enrollment is left to the store, which normalizes it against known students.
    pub fn apply_fields(&mut self, c: &mut Class) {
        if let Some(v) = self.name.take() {
            c.name = v;
        }
        if let Some(v) = self.subject.take() {
            c.subject = v;
        }
        if let Some(v) = self.instructor.take() {
            c.instructor = v;
        }
        if let Some(v) = self.schedule.take() {
            c.schedule = v;
        }
        if let Some(v) = self.room.take() {
            c.room = v;
        }
        if let Some(v) = self.capacity.take() {
            c.capacity = v;
        }
        if let Some(v) = self.start_date.take() {
            c.start_date = v;
        }
        if let Some(v) = self.end_date.take() {
            c.end_date = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub student_id: String,
    pub class_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}
