//! Dashboard aggregation over fetched records.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::records::{Course, Department, Enrollment, Student};

/// Number of courses listed in the "top courses" chart.
pub const TOP_COURSES: usize = 5;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
}

impl ChartPoint {
    fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Totals and chart series shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_students: usize,
    pub total_departments: usize,
    pub total_courses: usize,
    pub total_enrollments: usize,
    /// One point per department, in department order
    pub students_per_department: Vec<ChartPoint>,
    /// Students with a known enrollment year, ascending by year
    pub students_per_year: Vec<ChartPoint>,
    /// Most-enrolled courses, labelled by name (or code if the course is gone)
    pub top_courses: Vec<ChartPoint>,
    /// Graded enrollments per grade
    pub grade_distribution: Vec<ChartPoint>,
}

impl DashboardSummary {
    /// Aggregate already-fetched records.
    pub fn build(
        students: &[Student],
        departments: &[Department],
        courses: &[Course],
        enrollments: &[Enrollment],
    ) -> Self {
        let students_per_department = departments
            .iter()
            .map(|dept| {
                let count = students
                    .iter()
                    .filter(|s| s.department_id == Some(dept.id))
                    .count();
                ChartPoint::new(dept.name.clone(), count)
            })
            .collect();

        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        for year in students.iter().filter_map(|s| s.enrollment_year) {
            *years.entry(year).or_default() += 1;
        }
        let students_per_year = years
            .into_iter()
            .map(|(year, count)| ChartPoint::new(year.to_string(), count))
            .collect();

        let mut per_course: HashMap<&str, usize> = HashMap::new();
        for enrollment in enrollments {
            *per_course.entry(enrollment.course_code.as_str()).or_default() += 1;
        }
        let mut top_courses: Vec<ChartPoint> = per_course
            .into_iter()
            .map(|(code, count)| {
                let label = courses
                    .iter()
                    .find(|c| c.code == code)
                    .map_or(code, |c| c.name.as_str());
                ChartPoint::new(label, count)
            })
            .collect();
        top_courses.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
        top_courses.truncate(TOP_COURSES);

        let mut grades: BTreeMap<&str, usize> = BTreeMap::new();
        for grade in enrollments.iter().filter_map(|e| e.grade.as_deref()) {
            if !grade.is_empty() {
                *grades.entry(grade).or_default() += 1;
            }
        }
        let grade_distribution = grades
            .into_iter()
            .map(|(grade, count)| ChartPoint::new(grade, count))
            .collect();

        Self {
            total_students: students.len(),
            total_departments: departments.len(),
            total_courses: courses.len(),
            total_enrollments: enrollments.len(),
            students_per_department,
            students_per_year,
            top_courses,
            grade_distribution,
        }
    }

    /// Largest value across the charts, for scaling bars.
    pub fn max_value(points: &[ChartPoint]) -> usize {
        points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(id: u64, dept: Option<u64>, year: Option<i32>) -> Student {
        Student {
            id,
            first_name: format!("S{}", id),
            last_name: "Test".into(),
            email: format!("s{}@example.edu", id),
            phone: None,
            department_id: dept,
            enrollment_year: year,
        }
    }

    fn course(code: &str, name: &str) -> Course {
        Course {
            code: code.into(),
            name: name.into(),
            credits: 3,
            description: None,
            department_id: None,
            faculty_id: None,
        }
    }

    fn enrollment(id: u64, code: &str, grade: Option<&str>) -> Enrollment {
        Enrollment {
            id,
            student_id: 1,
            course_code: code.into(),
            grade: grade.map(String::from),
            enrolled_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = DashboardSummary::build(&[], &[], &[], &[]);
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_students_per_department_and_year() {
        let departments = vec![
            Department {
                id: 1,
                name: "Physics".into(),
                head: None,
            },
            Department {
                id: 2,
                name: "History".into(),
                head: None,
            },
        ];
        let students = vec![
            student(1, Some(1), Some(2023)),
            student(2, Some(1), Some(2021)),
            student(3, None, Some(2023)),
            student(4, Some(9), None),
        ];

        let summary = DashboardSummary::build(&students, &departments, &[], &[]);
        assert_eq!(
            summary.students_per_department,
            vec![ChartPoint::new("Physics", 2), ChartPoint::new("History", 0)]
        );
        assert_eq!(
            summary.students_per_year,
            vec![ChartPoint::new("2021", 1), ChartPoint::new("2023", 2)]
        );
        assert_eq!(summary.total_students, 4);
    }

    #[test]
    fn test_top_courses_limited_and_named() {
        let courses = vec![course("CS101", "Intro to CS"), course("MA201", "Linear Algebra")];
        let mut enrollments = Vec::new();
        let codes = [
            "CS101", "CS101", "CS101", "MA201", "MA201", "GONE", "A1", "B1", "C1",
        ];
        for (i, code) in codes.iter().enumerate() {
            enrollments.push(enrollment(i as u64, code, None));
        }

        let summary = DashboardSummary::build(&[], &[], &courses, &enrollments);
        assert_eq!(summary.top_courses.len(), TOP_COURSES);
        assert_eq!(summary.top_courses[0], ChartPoint::new("Intro to CS", 3));
        assert_eq!(summary.top_courses[1], ChartPoint::new("Linear Algebra", 2));
        // Ties break alphabetically
        assert_eq!(summary.top_courses[2], ChartPoint::new("A1", 1));
        assert_eq!(DashboardSummary::max_value(&summary.top_courses), 3);
    }

    #[test]
    fn test_unknown_course_labelled_by_code() {
        let enrollments = vec![enrollment(1, "GONE", None)];
        let summary = DashboardSummary::build(&[], &[], &[], &enrollments);
        assert_eq!(summary.top_courses, vec![ChartPoint::new("GONE", 1)]);
    }

    #[test]
    fn test_grade_distribution_skips_ungraded() {
        let enrollments = vec![
            enrollment(1, "CS101", Some("A")),
            enrollment(2, "CS101", Some("B")),
            enrollment(3, "CS101", Some("A")),
            enrollment(4, "CS101", None),
        ];
        let summary = DashboardSummary::build(&[], &[], &[], &enrollments);
        assert_eq!(
            summary.grade_distribution,
            vec![ChartPoint::new("A", 2), ChartPoint::new("B", 1)]
        );
        assert_eq!(summary.total_enrollments, 4);
    }
}
