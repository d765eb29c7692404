use anyhow::Context;
use serde::Serialize;
use std::path::Path;

use crate::query;
use crate::stats::{self, AttendanceStats};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Good,
    Fair,
    Poor,
}

impl RateBand {
    pub fn for_rate(rate: u32) -> Self {
        if rate >= 90 {
            RateBand::Good
        } else if rate >= 75 {
            RateBand::Fair
        } else {
            RateBand::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateBand::Good => "good",
            RateBand::Fair => "fair",
            RateBand::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportRow {
    pub student_id: String,
    pub code: String,
    pub name: String,
    pub stats: AttendanceStats,
    pub band: RateBand,
}

/// Per-student attendance for every active student, in store order.
pub fn student_report(store: &Store) -> Vec<StudentReportRow> {
    query::active_students(store.students())
        .into_iter()
        .map(|s| {
            let stats = stats::student_stats(store.attendance(), &s.id);
            StudentReportRow {
                student_id: s.id.clone(),
                code: s.student_id.clone(),
                name: s.name.clone(),
                band: RateBand::for_rate(stats.attendance_rate),
                stats,
            }
        })
        .collect()
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn report_csv(rows: &[StudentReportRow]) -> String {
    let mut csv = String::from(
        "student_id,student_name,present,absent,late,excused,total,attendance_rate,band\n",
    );
    for r in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            csv_quote(&r.code),
            csv_quote(&r.name),
            r.stats.present,
            r.stats.absent,
            r.stats.late,
            r.stats.excused,
            r.stats.total_classes,
            r.stats.attendance_rate,
            r.band.as_str()
        ));
    }
    csv
}

pub fn write_csv(path: &Path, csv: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    std::fs::write(path, csv).with_context(|| format!("write report {}", path.display()))
}
