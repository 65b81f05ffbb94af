//! CLI probe over `student_core`.
//!
//! # Responsibility
//! - Exercise the core end to end: open a store, add and list students.
//! - Keep output machine-readable (one JSON object per line).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use student_core::{CoreConfig, Gender, SqliteStudentStore, Student, StudentService};

#[derive(Debug, Parser)]
#[command(name = "student_cli", version, about = "Student records probe")]
struct Cli {
    /// SQLite database file. Overrides STUDENTS_DB_PATH; in-memory when neither is set.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every stored student.
    List,
    /// Add one student, rejecting a taken email.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// MALE or FEMALE.
        #[arg(long)]
        gender: Gender,
    },
    /// Print the core crate version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env().context("failed to read configuration")?;
    if cli.db.is_some() {
        config.db_path = cli.db;
    }
    config.init_logging()?;

    match cli.command {
        Command::Version => {
            println!("student_core version={}", student_core::core_version());
        }
        Command::List => {
            let conn = config.open_connection().context("failed to open database")?;
            let service = StudentService::new(SqliteStudentStore::try_new(&conn)?);
            for student in service.get_all_students()? {
                println!("{}", serde_json::to_string(&student)?);
            }
        }
        Command::Add {
            name,
            email,
            gender,
        } => {
            let conn = config.open_connection().context("failed to open database")?;
            let service = StudentService::new(SqliteStudentStore::try_new(&conn)?);
            let saved = service.add_student(&Student::new(name, email, gender))?;
            info!("event=cli_add module=cli status=ok");
            println!("{}", serde_json::to_string(&saved)?);
        }
    }

    Ok(())
}
