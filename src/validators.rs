//! Pre-submit validation for the task forms. Each check returns
//! `Some(message)` when the input is unusable, `None` when it passes.

pub fn validate_required(value: &str, message: &'static str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

pub fn validate_skills(skills: &[String], message: &'static str) -> Option<String> {
    if skills.is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

pub fn validate_semester_count(count: u32) -> Option<String> {
    if (1..=10).contains(&count) {
        None
    } else {
        Some("Semester count must be between 1 and 10".to_string())
    }
}
