//! Registrar CLI
//!
//! Thin wrapper around registrar-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Load sample departments, faculty, courses, students and enrollments
//! registrar seed
//!
//! # List students, printing the queries the command issued
//! registrar --show-queries student list
//!
//! # Add a student
//! registrar student add --first-name Ada --last-name Lovelace --email ada@example.edu
//!
//! # Change one field
//! registrar student update 1 --enrollment-year 2024
//!
//! # Search by name or email
//! registrar student search lovelace
//!
//! # Aggregated counts
//! registrar dashboard
//!
//! # Export the session's query log as JSON Lines
//! registrar --json-queries course list
//! ```

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use registrar_core::query_log::{render_stats, render_text, to_json_lines};
use registrar_core::{
    ChartPoint, Console, ConsoleConfig, Course, CourseDraft, CoursePatch, DashboardSummary,
    Department, DepartmentDraft, DepartmentPatch, Enrollment, EnrollmentDraft, EnrollmentPatch,
    Faculty, FacultyDraft, FacultyPatch, QueryLogConfig, Resource, Student, StudentDraft,
    StudentPatch,
};

/// Registrar - student and course administration
#[derive(Parser)]
#[command(name = "registrar")]
#[command(version = "0.1.0")]
#[command(about = "Registrar - student and course administration")]
#[command(
    long_about = "Manage students, departments, faculty, courses and enrollments. Every command records the database queries it issues in a session query log."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory (default: ~/.registrar/data)
    #[arg(short, long, global = true, env = "REGISTRAR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long, global = true)]
    in_memory: bool,

    /// Print the queries issued by this command
    #[arg(long, global = true)]
    show_queries: bool,

    /// Print the queries issued by this command as JSON Lines
    #[arg(long, global = true, conflicts_with = "show_queries")]
    json_queries: bool,

    /// Number of query log entries kept
    #[arg(long, global = true, env = "REGISTRAR_LOG_CAPACITY", default_value_t = registrar_core::query_log::DEFAULT_CAPACITY)]
    log_capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Student records
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Department records
    Department {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// Faculty records
    Faculty {
        #[command(subcommand)]
        action: FacultyAction,
    },

    /// Course records
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Enrollment records
    Enrollment {
        #[command(subcommand)]
        action: EnrollmentAction,
    },

    /// Show aggregated counts and charts
    Dashboard,

    /// Load sample records into an empty data directory
    Seed,
}

#[derive(Subcommand)]
enum StudentAction {
    /// List all students
    List,
    /// Show one student
    Show { id: u64 },
    /// Add a student
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
        #[arg(long)]
        enrollment_year: Option<i32>,
    },
    /// Change fields of a student
    Update {
        id: u64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
        #[arg(long)]
        enrollment_year: Option<i32>,
    },
    /// Delete a student
    Delete { id: u64 },
    /// Find students by name or email
    Search { query: String },
}

#[derive(Subcommand)]
enum DepartmentAction {
    /// List all departments
    List,
    /// Show one department
    Show { id: u64 },
    /// Add a department
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        head: Option<String>,
    },
    /// Change fields of a department
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        head: Option<String>,
    },
    /// Delete a department
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum FacultyAction {
    /// List all faculty
    List,
    /// Show one faculty member
    Show { id: u64 },
    /// Add a faculty member
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
    },
    /// Change fields of a faculty member
    Update {
        id: u64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
    },
    /// Delete a faculty member
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum CourseAction {
    /// List all courses
    List,
    /// Show one course
    Show { code: String },
    /// Add a course
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u32,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
        #[arg(long)]
        faculty_id: Option<u64>,
    },
    /// Change fields of a course
    Update {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        credits: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        department_id: Option<u64>,
        #[arg(long)]
        faculty_id: Option<u64>,
    },
    /// Delete a course
    Delete { code: String },
}

#[derive(Subcommand)]
enum EnrollmentAction {
    /// List all enrollments
    List,
    /// Show one enrollment
    Show { id: u64 },
    /// Enroll a student in a course
    Add {
        #[arg(long)]
        student_id: u64,
        #[arg(long)]
        course_code: String,
        #[arg(long)]
        grade: Option<String>,
    },
    /// Change fields of an enrollment
    Update {
        id: u64,
        #[arg(long)]
        student_id: Option<u64>,
        #[arg(long)]
        course_code: Option<String>,
        #[arg(long)]
        grade: Option<String>,
    },
    /// Delete an enrollment
    Delete { id: u64 },
}

/// Initialize logging based on verbosity level
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.registrar/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".registrar")
        .join("data")
}

fn print_list<T: Display>(kind: &str, records: &[T]) {
    if records.is_empty() {
        println!("No {} found.", kind);
        return;
    }
    println!("{} ({}):", capitalize(kind), records.len());
    for record in records {
        println!("  {}", record);
    }
}

fn print_record<T: Display>(heading: &str, record: &T) {
    println!("{}:", heading);
    println!("  {}", record);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Refuse an update that would change nothing.
fn ensure_changes(columns: usize) -> Result<()> {
    if columns == 0 {
        anyhow::bail!("Nothing to update; pass at least one field");
    }
    Ok(())
}

fn print_chart(title: &str, points: &[ChartPoint]) {
    println!("{}:", title);
    if points.is_empty() {
        println!("  (no data)");
        return;
    }
    let width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let max = DashboardSummary::max_value(points).max(1);
    for point in points {
        let bar = "#".repeat((point.value * 30).div_ceil(max));
        println!("  {:<width$}  {:>3} {}", point.label, point.value, bar, width = width);
    }
}

fn print_dashboard(summary: &DashboardSummary) {
    println!("Dashboard");
    println!();
    println!("  Students:    {}", summary.total_students);
    println!("  Departments: {}", summary.total_departments);
    println!("  Courses:     {}", summary.total_courses);
    println!("  Enrollments: {}", summary.total_enrollments);
    println!();
    print_chart("Students per department", &summary.students_per_department);
    println!();
    print_chart("Students per enrollment year", &summary.students_per_year);
    println!();
    print_chart("Top courses by enrollment", &summary.top_courses);
    println!();
    print_chart("Grade distribution", &summary.grade_distribution);
}

async fn run(console: &Console, command: Commands) -> Result<()> {
    match command {
        Commands::Student { action } => match action {
            StudentAction::List => {
                let students = console.students().fetch_all().await?;
                print_list("students", &students);
            }
            StudentAction::Show { id } => {
                let student = console.students().fetch_one(&id).await?;
                print_record("Student", &student);
                if let Some(phone) = &student.phone {
                    println!("  Phone: {}", phone);
                }
                if let Some(dept) = student.department_id {
                    println!("  Department: {}", dept);
                }
            }
            StudentAction::Add {
                first_name,
                last_name,
                email,
                phone,
                department_id,
                enrollment_year,
            } => {
                let student = console
                    .students()
                    .create(StudentDraft {
                        first_name,
                        last_name,
                        email,
                        phone,
                        department_id,
                        enrollment_year,
                    })
                    .await?;
                print_record("Created student", &student);
            }
            StudentAction::Update {
                id,
                first_name,
                last_name,
                email,
                phone,
                department_id,
                enrollment_year,
            } => {
                let patch = StudentPatch {
                    first_name,
                    last_name,
                    email,
                    phone,
                    department_id,
                    enrollment_year,
                };
                ensure_changes(Student::patch_columns(&patch).len())?;
                let student = console.students().update(&id, patch).await?;
                print_record("Updated student", &student);
            }
            StudentAction::Delete { id } => {
                console.students().delete(&id).await?;
                println!("Deleted student {}", id);
            }
            StudentAction::Search { query } => {
                let students = console.search_students(&query).await?;
                print_list("students", &students);
            }
        },

        Commands::Department { action } => match action {
            DepartmentAction::List => {
                let departments = console.departments().fetch_all().await?;
                print_list("departments", &departments);
            }
            DepartmentAction::Show { id } => {
                let dept = console.departments().fetch_one(&id).await?;
                print_record("Department", &dept);
            }
            DepartmentAction::Add { name, head } => {
                let dept = console
                    .departments()
                    .create(DepartmentDraft { name, head })
                    .await?;
                print_record("Created department", &dept);
            }
            DepartmentAction::Update { id, name, head } => {
                let patch = DepartmentPatch { name, head };
                ensure_changes(Department::patch_columns(&patch).len())?;
                let dept = console.departments().update(&id, patch).await?;
                print_record("Updated department", &dept);
            }
            DepartmentAction::Delete { id } => {
                console.departments().delete(&id).await?;
                println!("Deleted department {}", id);
            }
        },

        Commands::Faculty { action } => match action {
            FacultyAction::List => {
                let faculty = console.faculty().fetch_all().await?;
                print_list("faculty", &faculty);
            }
            FacultyAction::Show { id } => {
                let member = console.faculty().fetch_one(&id).await?;
                print_record("Faculty", &member);
            }
            FacultyAction::Add {
                first_name,
                last_name,
                email,
                designation,
                department_id,
            } => {
                let member = console
                    .faculty()
                    .create(FacultyDraft {
                        first_name,
                        last_name,
                        email,
                        designation,
                        department_id,
                    })
                    .await?;
                print_record("Created faculty", &member);
            }
            FacultyAction::Update {
                id,
                first_name,
                last_name,
                email,
                designation,
                department_id,
            } => {
                let patch = FacultyPatch {
                    first_name,
                    last_name,
                    email,
                    designation,
                    department_id,
                };
                ensure_changes(Faculty::patch_columns(&patch).len())?;
                let member = console.faculty().update(&id, patch).await?;
                print_record("Updated faculty", &member);
            }
            FacultyAction::Delete { id } => {
                console.faculty().delete(&id).await?;
                println!("Deleted faculty {}", id);
            }
        },

        Commands::Course { action } => match action {
            CourseAction::List => {
                let courses = console.courses().fetch_all().await?;
                print_list("courses", &courses);
            }
            CourseAction::Show { code } => {
                let course = console.courses().fetch_one(&code).await?;
                print_record("Course", &course);
                if let Some(description) = &course.description {
                    println!("  {}", description);
                }
            }
            CourseAction::Add {
                code,
                name,
                credits,
                description,
                department_id,
                faculty_id,
            } => {
                let course = console
                    .courses()
                    .create(CourseDraft {
                        code,
                        name,
                        credits,
                        description,
                        department_id,
                        faculty_id,
                    })
                    .await?;
                print_record("Created course", &course);
            }
            CourseAction::Update {
                code,
                name,
                credits,
                description,
                department_id,
                faculty_id,
            } => {
                let patch = CoursePatch {
                    name,
                    credits,
                    description,
                    department_id,
                    faculty_id,
                };
                ensure_changes(Course::patch_columns(&patch).len())?;
                let course = console.courses().update(&code, patch).await?;
                print_record("Updated course", &course);
            }
            CourseAction::Delete { code } => {
                console.courses().delete(&code).await?;
                println!("Deleted course {}", code);
            }
        },

        Commands::Enrollment { action } => match action {
            EnrollmentAction::List => {
                let enrollments = console.enrollments().fetch_all().await?;
                print_list("enrollments", &enrollments);
            }
            EnrollmentAction::Show { id } => {
                let enrollment = console.enrollments().fetch_one(&id).await?;
                print_record("Enrollment", &enrollment);
            }
            EnrollmentAction::Add {
                student_id,
                course_code,
                grade,
            } => {
                let enrollment = console
                    .enrollments()
                    .create(EnrollmentDraft {
                        student_id,
                        course_code,
                        grade,
                    })
                    .await?;
                print_record("Created enrollment", &enrollment);
            }
            EnrollmentAction::Update {
                id,
                student_id,
                course_code,
                grade,
            } => {
                let patch = EnrollmentPatch {
                    student_id,
                    course_code,
                    grade,
                };
                ensure_changes(Enrollment::patch_columns(&patch).len())?;
                let enrollment = console.enrollments().update(&id, patch).await?;
                print_record("Updated enrollment", &enrollment);
            }
            EnrollmentAction::Delete { id } => {
                console.enrollments().delete(&id).await?;
                println!("Deleted enrollment {}", id);
            }
        },

        Commands::Dashboard => {
            let summary = console.dashboard().await?;
            print_dashboard(&summary);
        }

        Commands::Seed => {
            let created = console.seed_demo().await?;
            if created == 0 {
                println!("Records already present; nothing seeded.");
            } else {
                println!("Seeded {} records.", created);
            }
        }
    }

    Ok(())
}

/// Print the session's query log, oldest first.
fn print_queries(console: &Console, json: bool) -> Result<()> {
    let mut entries = console.logger().get_all();
    entries.reverse();

    if json {
        let jsonl = to_json_lines(&entries)?;
        if !jsonl.is_empty() {
            println!("{}", jsonl);
        }
    } else {
        println!();
        println!("Queries: {}", render_stats(&console.logger().stats()));
        print!("{}", render_text(&entries));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut config = ConsoleConfig::default()
        .with_query_log(QueryLogConfig::default().with_capacity(cli.log_capacity));
    if !cli.in_memory {
        config = config.with_data_dir(cli.data_dir.unwrap_or_else(default_data_dir));
    }
    let console = Console::from_config(config)?;

    let result = run(&console, cli.command).await;

    if cli.show_queries || cli.json_queries {
        print_queries(&console, cli.json_queries)?;
    }

    result
}
