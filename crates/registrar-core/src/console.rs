//! Console: the entry point tying record stores to the query log.
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::{Console, ConsoleConfig};
//!
//! let console = Console::in_memory(ConsoleConfig::default());
//! console.seed_demo().await?;
//!
//! let students = console.students().fetch_all().await?;
//! for entry in console.panel().logs() {
//!     println!("[{}] {}", entry.operation, entry.sql);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::StoreAdapter;
use crate::dashboard::DashboardSummary;
use crate::error::RegistrarResult;
use crate::panel::PanelState;
use crate::query_log::{QueryLogConfig, QueryLogger};
use crate::records::{
    Course, CourseDraft, Department, DepartmentDraft, Enrollment, EnrollmentDraft, Faculty,
    FacultyDraft, Student, StudentDraft,
};
use crate::store::{open_database, Collaborator, MemoryStore, RecordStore, RedbStore};

/// File name of the record database inside the data directory.
pub const DATABASE_FILE: &str = "registrar.redb";

/// Instrumented student records.
pub type StudentAdapter = StoreAdapter<Student, RecordStore<Student>>;
/// Instrumented department records.
pub type DepartmentAdapter = StoreAdapter<Department, RecordStore<Department>>;
/// Instrumented faculty records.
pub type FacultyAdapter = StoreAdapter<Faculty, RecordStore<Faculty>>;
/// Instrumented course records, keyed by course code.
pub type CourseAdapter = StoreAdapter<Course, RecordStore<Course>>;
/// Instrumented enrollment records.
pub type EnrollmentAdapter = StoreAdapter<Enrollment, RecordStore<Enrollment>>;

/// Console configuration.
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Query log settings
    pub query_log: QueryLogConfig,
    /// Where records persist; `None` keeps them in memory
    pub data_dir: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Persist records under `dir`.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Replace the query log settings.
    pub fn with_query_log(mut self, query_log: QueryLogConfig) -> Self {
        self.query_log = query_log;
        self
    }
}

/// Record stores for every kind, one shared query log, and the debugger
/// panel that mirrors it.
pub struct Console {
    logger: Arc<QueryLogger>,
    panel: PanelState,
    students: StudentAdapter,
    departments: DepartmentAdapter,
    faculty: FacultyAdapter,
    courses: CourseAdapter,
    enrollments: EnrollmentAdapter,
}

impl Console {
    /// Build from config: persistent when `data_dir` is set, in memory otherwise.
    pub fn from_config(config: ConsoleConfig) -> RegistrarResult<Self> {
        match config.data_dir.clone() {
            Some(dir) => Self::open(dir, config),
            None => Ok(Self::in_memory(config)),
        }
    }

    /// Console whose records live only as long as the process.
    pub fn in_memory(config: ConsoleConfig) -> Self {
        debug!("creating in-memory console");
        Self::assemble(
            config.query_log,
            RecordStore::Memory(MemoryStore::new()),
            RecordStore::Memory(MemoryStore::new()),
            RecordStore::Memory(MemoryStore::new()),
            RecordStore::Memory(MemoryStore::new()),
            RecordStore::Memory(MemoryStore::new()),
        )
    }

    /// Console whose records persist in `data_dir`. The query log is never
    /// persisted.
    pub fn open(data_dir: impl AsRef<Path>, config: ConsoleConfig) -> RegistrarResult<Self> {
        let path = data_dir.as_ref().join(DATABASE_FILE);
        let db = open_database(&path)?;
        info!(path = %path.display(), "opened record database");

        Ok(Self::assemble(
            config.query_log,
            RecordStore::Persistent(RedbStore::new(Arc::clone(&db))?),
            RecordStore::Persistent(RedbStore::new(Arc::clone(&db))?),
            RecordStore::Persistent(RedbStore::new(Arc::clone(&db))?),
            RecordStore::Persistent(RedbStore::new(Arc::clone(&db))?),
            RecordStore::Persistent(RedbStore::new(db)?),
        ))
    }

    fn assemble(
        query_log: QueryLogConfig,
        students: RecordStore<Student>,
        departments: RecordStore<Department>,
        faculty: RecordStore<Faculty>,
        courses: RecordStore<Course>,
        enrollments: RecordStore<Enrollment>,
    ) -> Self {
        let logger = QueryLogger::new(query_log);
        Self {
            panel: PanelState::new(Arc::clone(&logger)),
            students: StoreAdapter::new(students, Arc::clone(&logger)),
            departments: StoreAdapter::new(departments, Arc::clone(&logger)),
            faculty: StoreAdapter::new(faculty, Arc::clone(&logger)),
            courses: StoreAdapter::new(courses, Arc::clone(&logger)),
            enrollments: StoreAdapter::new(enrollments, Arc::clone(&logger)),
            logger,
        }
    }

    /// The shared query log.
    pub fn logger(&self) -> &Arc<QueryLogger> {
        &self.logger
    }

    /// Debugger panel state.
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Student records; every call is logged.
    pub fn students(&self) -> &StudentAdapter {
        &self.students
    }

    /// Department records.
    pub fn departments(&self) -> &DepartmentAdapter {
        &self.departments
    }

    /// Faculty records.
    pub fn faculty(&self) -> &FacultyAdapter {
        &self.faculty
    }

    /// Course records.
    pub fn courses(&self) -> &CourseAdapter {
        &self.courses
    }

    /// Enrollment records.
    pub fn enrollments(&self) -> &EnrollmentAdapter {
        &self.enrollments
    }

    /// Students whose name or email contains `query` (case-insensitive).
    ///
    /// Logged as a single SELECT; filtering happens on the fetched set.
    pub async fn search_students(&self, query: &str) -> RegistrarResult<Vec<Student>> {
        let students = self.students.fetch_all().await?;
        Ok(students.into_iter().filter(|s| s.matches(query)).collect())
    }

    /// Fetch the records behind the dashboard and aggregate them.
    pub async fn dashboard(&self) -> RegistrarResult<DashboardSummary> {
        let students = self.students.fetch_all().await?;
        let departments = self.departments.fetch_all().await?;
        let courses = self.courses.fetch_all().await?;
        let enrollments = self.enrollments.fetch_all().await?;

        Ok(DashboardSummary::build(
            &students,
            &departments,
            &courses,
            &enrollments,
        ))
    }

    /// Populate an empty console with sample records.
    ///
    /// Returns how many records were created; does nothing (and returns 0)
    /// if any departments already exist.
    pub async fn seed_demo(&self) -> RegistrarResult<usize> {
        if !self.departments.collaborator().fetch_all().await?.is_empty() {
            debug!("records already present; skipping demo seed");
            return Ok(0);
        }

        let mut created = 0;

        let mut dept_ids = Vec::new();
        for (name, head) in DEMO_DEPARTMENTS {
            let dept = self
                .departments
                .create(DepartmentDraft {
                    name: name.to_string(),
                    head: Some(head.to_string()),
                })
                .await?;
            dept_ids.push(dept.id);
        }
        created += dept_ids.len();

        let mut faculty_ids = Vec::new();
        for (i, (first, last, designation)) in DEMO_FACULTY.iter().enumerate() {
            let member = self
                .faculty
                .create(FacultyDraft {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: demo_email(first, last),
                    designation: Some(designation.to_string()),
                    department_id: Some(dept_ids[i % dept_ids.len()]),
                })
                .await?;
            faculty_ids.push(member.id);
        }
        created += faculty_ids.len();

        let mut course_codes = Vec::new();
        for (i, (code, name, credits)) in DEMO_COURSES.iter().enumerate() {
            let course = self
                .courses
                .create(CourseDraft {
                    code: code.to_string(),
                    name: name.to_string(),
                    credits: *credits,
                    description: None,
                    department_id: Some(dept_ids[i % dept_ids.len()]),
                    faculty_id: Some(faculty_ids[i % faculty_ids.len()]),
                })
                .await?;
            course_codes.push(course.code);
        }
        created += course_codes.len();

        let mut student_ids = Vec::new();
        for (i, (first, last, year)) in DEMO_STUDENTS.iter().enumerate() {
            let student = self
                .students
                .create(StudentDraft {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: demo_email(first, last),
                    phone: None,
                    department_id: Some(dept_ids[i % dept_ids.len()]),
                    enrollment_year: Some(*year),
                })
                .await?;
            student_ids.push(student.id);
        }
        created += student_ids.len();

        for (i, student_id) in student_ids.iter().enumerate() {
            for offset in 0..2 {
                let course_code = course_codes[(i + offset) % course_codes.len()].clone();
                let grade = DEMO_GRADES[(i * 2 + offset) % DEMO_GRADES.len()];
                self.enrollments
                    .create(EnrollmentDraft {
                        student_id: *student_id,
                        course_code,
                        grade: grade.map(String::from),
                    })
                    .await?;
                created += 1;
            }
        }

        info!(created, "seeded demo records");
        Ok(created)
    }
}

const DEMO_DEPARTMENTS: [(&str, &str); 3] = [
    ("Computer Science", "Dr. Grace Hopper"),
    ("Mathematics", "Dr. Emmy Noether"),
    ("Physics", "Dr. Lise Meitner"),
];

const DEMO_FACULTY: [(&str, &str, &str); 3] = [
    ("Alan", "Turing", "Professor"),
    ("Katherine", "Johnson", "Associate Professor"),
    ("Richard", "Feynman", "Lecturer"),
];

const DEMO_COURSES: [(&str, &str, u32); 4] = [
    ("CS101", "Introduction to Programming", 4),
    ("MA201", "Linear Algebra", 3),
    ("PH110", "Classical Mechanics", 4),
    ("CS240", "Data Structures", 3),
];

const DEMO_STUDENTS: [(&str, &str, i32); 6] = [
    ("Ada", "Lovelace", 2022),
    ("Charles", "Babbage", 2021),
    ("Mary", "Somerville", 2023),
    ("Niels", "Bohr", 2022),
    ("Sophie", "Germain", 2024),
    ("Srinivasa", "Ramanujan", 2023),
];

const DEMO_GRADES: [Option<&str>; 5] = [Some("A"), Some("B"), Some("A"), None, Some("C")];

fn demo_email(first: &str, last: &str) -> String {
    format!("{}.{}@example.edu", first, last).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_log::{DurationModel, Operation};

    fn console() -> Console {
        Console::in_memory(ConsoleConfig::default().with_query_log(
            QueryLogConfig::default()
                .with_capacity(200)
                .with_duration(DurationModel::Fixed(1.0)),
        ))
    }

    #[test]
    fn test_console_is_shareable() {
        fn check<T: Send + Sync>() {}
        check::<Console>();
    }

    #[tokio::test]
    async fn test_seed_demo_logs_inserts() {
        let console = console();
        let created = console.seed_demo().await.unwrap();
        // 3 departments, 3 faculty, 4 courses, 6 students, 12 enrollments
        assert_eq!(created, 28);

        let stats = console.logger().stats();
        assert_eq!(stats.total, 28);
        assert_eq!(stats.by_operation.get(&Operation::Insert), Some(&28));
        assert_eq!(console.panel().len(), 28);

        // Second seed is a no-op and logs nothing
        assert_eq!(console.seed_demo().await.unwrap(), 0);
        assert_eq!(console.logger().len(), 28);
    }

    #[tokio::test]
    async fn test_search_students_logs_one_select() {
        let console = console();
        console.seed_demo().await.unwrap();
        console.logger().clear();

        let found = console.search_students("LOVELACE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Ada");

        let entries = console.logger().get_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sql, "SELECT * FROM students");
    }

    #[tokio::test]
    async fn test_dashboard_fetches_four_tables() {
        let console = console();
        console.seed_demo().await.unwrap();
        console.logger().clear();

        let summary = console.dashboard().await.unwrap();
        assert_eq!(summary.total_students, 6);
        assert_eq!(summary.total_departments, 3);
        assert_eq!(summary.total_courses, 4);
        assert_eq!(summary.total_enrollments, 12);
        assert_eq!(summary.students_per_department.len(), 3);
        assert_eq!(summary.top_courses.len(), 4);

        let sql: Vec<String> = console
            .logger()
            .get_all()
            .into_iter()
            .rev()
            .map(|e| e.sql)
            .collect();
        assert_eq!(
            sql,
            vec![
                "SELECT * FROM students",
                "SELECT * FROM departments",
                "SELECT * FROM courses",
                "SELECT * FROM enrollments",
            ]
        );
    }
}
