use crate::config::{ShiftPolicy, ShiftWindow};
use crate::model::{Shift, ShiftCategory};

impl ShiftPolicy {
    /// Category of a free-text department string. Total: an empty or
    /// unknown department is non-instructional.
    pub fn category(&self, department: &str) -> ShiftCategory {
        let dept = department.to_lowercase();
        let instructional = self
            .instructional
            .keywords
            .iter()
            .any(|k| dept.contains(&k.to_lowercase()));
        if instructional {
            ShiftCategory::Instructional
        } else {
            ShiftCategory::NonInstructional
        }
    }

    pub fn window(&self, category: ShiftCategory) -> ShiftWindow {
        match category {
            ShiftCategory::Instructional => self.instructional.window(),
            ShiftCategory::NonInstructional => self.non_instructional.clone(),
        }
    }

    pub fn classify(&self, department: &str) -> Shift {
        let category = self.category(department);
        let window = self.window(category);
        Shift {
            category,
            expected_minutes: window.start.minutes(),
            expected_label: window.start.label().to_string(),
        }
    }

    /// Schedule text used when the schedule sheet has nothing for a person,
    /// e.g. `7:50 AM - 3:50 PM (Instructional)`.
    pub fn default_schedule(&self, department: &str) -> String {
        let category = self.category(department);
        let window = self.window(category);
        format!("{} - {} ({category})", window.start, window.end)
    }
}

/// Classify with the standard district rules.
pub fn classify(department: &str) -> Shift {
    ShiftPolicy::default().classify(department)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructional_keywords() {
        for dept in [
            "Instructional Support",
            "STUDENT SUPPORT SERVICES",
            "Curriculum & Assessment",
            "Counseling",
        ] {
            let shift = classify(dept);
            assert_eq!(shift.category, ShiftCategory::Instructional, "{dept}");
            assert_eq!(shift.expected_minutes, 470);
            assert_eq!(shift.expected_label, "7:50 AM");
        }
    }

    #[test]
    fn everything_else_is_non_instructional() {
        for dept in ["Facilities", "", "Transportation", "Non Instruct"] {
            let shift = classify(dept);
            assert_eq!(shift.category, ShiftCategory::NonInstructional, "{dept}");
            assert_eq!(shift.expected_minutes, 510);
            assert_eq!(shift.expected_label, "8:30 AM");
        }
    }

    #[test]
    fn non_instructional_substring_still_contains_instructional() {
        // "Non-Instructional Staff" contains "instructional"
        assert_eq!(classify("Non-Instructional Staff").category, ShiftCategory::Instructional);
    }

    #[test]
    fn default_schedule_labels() {
        let policy = ShiftPolicy::default();
        assert_eq!(policy.default_schedule("Counseling"), "7:50 AM - 3:50 PM (Instructional)");
        assert_eq!(policy.default_schedule("Facilities"), "8:30 AM - 4:30 PM (Non-Instructional)");
    }
}
