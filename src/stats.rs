//! Derived attendance metrics. Everything here is a pure function of the
//! store's current collections.

use serde::Serialize;

use crate::model::{AttendanceRecord, AttendanceStatus, Class, Student};
use crate::store::Store;

pub const DEFAULT_RECENT_ACTIVITY: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_classes: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub attendance_rate: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub date_total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub record_id: String,
    pub student_id: String,
    pub class_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    pub student_name: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSheetRow {
    pub student_id: String,
    pub name: String,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today: String,
    pub total_students: usize,
    pub active_students: usize,
    pub total_classes: usize,
    pub today_summary: TodaySummary,
    pub overall_rate: u32,
    pub total_records: usize,
    pub recent_activity: Vec<ActivityEntry>,
}

/// `round(100 * attended / total)` with halves rounded up; 0 for an empty scope.
pub fn rate_percent(attended: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * attended + total) / (2 * total)) as u32
}

pub fn stats_for<'a, I>(records: I) -> AttendanceStats
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut stats = AttendanceStats::default();
    let mut attended = 0;
    for r in records {
        stats.total_classes += 1;
        if r.status.counts_as_attended() {
            attended += 1;
        }
        match r.status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Absent => stats.absent += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Excused => stats.excused += 1,
        }
    }
    stats.attendance_rate = rate_percent(attended, stats.total_classes);
    stats
}

/// Students enrolled in the class, in enrollment order. Unknown class gives
/// an empty roster.
pub fn class_roster<'a>(store: &'a Store, class_id: &str) -> Vec<&'a Student> {
    let Some(class) = store.class(class_id) else {
        return Vec::new();
    };
    roster_of(store.students(), class)
}

pub fn roster_of<'a>(students: &'a [Student], class: &Class) -> Vec<&'a Student> {
    class
        .enrolled_students
        .iter()
        .filter_map(|id| students.iter().find(|s| &s.id == id))
        .collect()
}

pub fn attendance_for_class_on_date<'a>(
    records: &'a [AttendanceRecord],
    class_id: &str,
    date: &str,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|a| a.class_id == class_id && a.date == date)
        .collect()
}

pub fn student_stats(records: &[AttendanceRecord], student_id: &str) -> AttendanceStats {
    stats_for(records.iter().filter(|a| a.student_id == student_id))
}

pub fn class_stats(records: &[AttendanceRecord], class_id: &str) -> AttendanceStats {
    stats_for(records.iter().filter(|a| a.class_id == class_id))
}

pub fn overall_rate(records: &[AttendanceRecord]) -> u32 {
    stats_for(records).attendance_rate
}

pub fn todays_summary(records: &[AttendanceRecord], today: &str) -> TodaySummary {
    let stats = stats_for(records.iter().filter(|a| a.date == today));
    TodaySummary {
        date_total: stats.total_classes,
        present: stats.present,
        absent: stats.absent,
        late: stats.late,
        excused: stats.excused,
    }
}

/// The last `n` records in insertion order, newest first, joined with names.
/// A deleted student or class leaves the name as `None`.
pub fn recent_activity(store: &Store, n: usize) -> Vec<ActivityEntry> {
    store
        .attendance()
        .iter()
        .rev()
        .take(n)
        .map(|r| ActivityEntry {
            record_id: r.id.clone(),
            student_id: r.student_id.clone(),
            class_id: r.class_id.clone(),
            date: r.date.clone(),
            status: r.status,
            student_name: store.student(&r.student_id).map(|s| s.name.clone()),
            class_name: store.class(&r.class_id).map(|c| c.name.clone()),
        })
        .collect()
}

/// One row per rostered student with that day's mark, if any.
pub fn mark_sheet(store: &Store, class_id: &str, date: &str) -> Vec<MarkSheetRow> {
    let marked = attendance_for_class_on_date(store.attendance(), class_id, date);
    class_roster(store, class_id)
        .into_iter()
        .map(|s| {
            let record = marked.iter().find(|a| a.student_id == s.id);
            MarkSheetRow {
                student_id: s.id.clone(),
                name: s.name.clone(),
                status: record.map(|a| a.status),
                notes: record.and_then(|a| a.notes.clone()),
            }
        })
        .collect()
}

pub fn dashboard_summary(store: &Store, today: &str) -> DashboardSummary {
    let records = store.attendance();
    DashboardSummary {
        today: today.to_string(),
        total_students: store.students().len(),
        active_students: store.students().iter().filter(|s| s.is_active()).count(),
        total_classes: store.classes().len(),
        today_summary: todays_summary(records, today),
        overall_rate: overall_rate(records),
        total_records: records.len(),
        recent_activity: recent_activity(store, DEFAULT_RECENT_ACTIVITY),
    }
}
