//! CLI entry point for the gradebook tool.
//!
//! Provides one subcommand per form (add student, subject, grade), the GPA
//! and chart lookups, table listings, and an interactive menu session.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gradebook::config::{Config, DATA_DIR_VAR, env_filter};
use gradebook::input::{GradeForm, StudentForm, SubjectForm};
use gradebook::schema::{Grade, Student, Subject};
use gradebook::session::Session;
use gradebook::{Gradebook, GradebookError, RecordStore, chart, output};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{
    Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Record students, subjects and marks; compute average-marks GPA", long_about = None)]
struct Cli {
    /// Directory holding students.csv, subjects.csv and grades.csv [default: data]
    #[arg(long, global = true, value_name = "DIR", env = DATA_DIR_VAR)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    AddStudent {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Add a subject
    AddSubject {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Add a grade for a student in a subject
    AddGrade {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        subject_code: String,
        /// Marks; must be a number
        #[arg(long, allow_hyphen_values = true)]
        marks: String,
    },
    /// Show the average marks of a student
    Gpa {
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show a bar chart of a student's marks per subject
    Chart {
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        /// Width of the longest bar
        #[arg(
            short,
            long,
            default_value_t = chart::DEFAULT_WIDTH as u16,
            value_parser = clap::value_parser!(u16).range(1..=chart::MAX_WIDTH as i64)
        )]
        width: u16,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print every row of a table
    List {
        #[arg(value_enum)]
        table: TableArg,
    },
    /// Menu-driven session over stdin/stdout
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableArg {
    Students,
    Subjects,
    Grades,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir.clone().filter(|d| !d.as_os_str().is_empty()) {
        config = config.with_data_dir(dir);
    }

    // Logging setup: colored stderr + JSON rolling log file
    let file_appender =
        tracing_appender::rolling::daily(config.log_dir(), config.log_file_name());
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "warn"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    debug!(data_dir = %config.data_dir.display(), "Opening record store");
    let store = RecordStore::open(&config.data_dir)?;
    let book = Gradebook::new(store);

    if let Err(e) = run(&book, cli.command) {
        if e.is_user_error() {
            info!(error = %e, "Operation rejected");
        } else {
            error!(error = %e, "Operation failed");
        }
        eprintln!("Error: {e}");
        drop(file_guard);
        std::process::exit(1);
    }

    Ok(())
}

fn run(book: &Gradebook, command: Commands) -> Result<(), GradebookError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::AddStudent { id, name, email } => {
            book.add_student(&StudentForm { id, name, email })?;
            writeln!(out, "Student added successfully.")?;
        }
        Commands::AddSubject { code, name } => {
            book.add_subject(&SubjectForm { code, name })?;
            writeln!(out, "Subject added successfully.")?;
        }
        Commands::AddGrade {
            student_id,
            subject_code,
            marks,
        } => {
            book.add_grade(&GradeForm {
                student_id,
                subject_code,
                marks,
            })?;
            writeln!(out, "Grade added successfully.")?;
        }
        Commands::Gpa { student_id, json } => {
            let gpa = book.average_marks(&student_id)?;
            output::write_gpa(&mut out, &gpa, json)?;
        }
        Commands::Chart {
            student_id,
            width,
            json,
        } => {
            let rows = book.subject_marks(&student_id)?;
            output::write_chart(&mut out, student_id.trim(), &rows, usize::from(width), json)?;
        }
        Commands::List { table } => match table {
            TableArg::Students => {
                output::write_students(&mut out, &book.store().load::<Student>()?)?
            }
            TableArg::Subjects => {
                output::write_subjects(&mut out, &book.store().load::<Subject>()?)?
            }
            TableArg::Grades => output::write_grades(&mut out, &book.store().load::<Grade>()?)?,
        },
        Commands::Interactive => {
            drop(out);
            let stdin = io::stdin();
            Session::new(book, stdin.lock(), io::stdout()).run()?;
        }
    }

    Ok(())
}
