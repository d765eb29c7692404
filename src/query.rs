use crate::model::{Class, Student};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Classes whose name, subject or instructor contains `term`, ignoring case.
/// An empty term matches everything.
pub fn search_classes<'a>(classes: &'a [Class], term: &str) -> Vec<&'a Class> {
    let needle = term.trim().to_lowercase();
    classes
        .iter()
        .filter(|c| {
            contains_ci(&c.name, &needle)
                || contains_ci(&c.subject, &needle)
                || contains_ci(&c.instructor, &needle)
        })
        .collect()
}

/// Students whose name, student code or email contains `term`, ignoring case.
pub fn search_students<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    let needle = term.trim().to_lowercase();
    students
        .iter()
        .filter(|s| {
            contains_ci(&s.name, &needle)
                || contains_ci(&s.student_id, &needle)
                || contains_ci(&s.email, &needle)
        })
        .collect()
}

pub fn active_students<'a, I>(students: I) -> Vec<&'a Student>
where
    I: IntoIterator<Item = &'a Student>,
{
    students.into_iter().filter(|s| s.is_active()).collect()
}

pub fn is_enrolled(enrolled: &[String], student_id: &str) -> bool {
    enrolled.iter().any(|id| id == student_id)
}

/// Names of enrolled students in enrollment order; unknown ids are skipped.
pub fn enrolled_names(students: &[Student], enrolled: &[String]) -> Vec<String> {
    enrolled
        .iter()
        .filter_map(|id| students.iter().find(|s| &s.id == id))
        .map(|s| s.name.clone())
        .collect()
}
