use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{CourseClient, CourseRow, CourseTable};
use shared::error::ApiException;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage the course list held by a course server")]
struct Args {
    #[arg(long, env = "COURSE_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the course table.
    List,
    /// Append a course.
    Add {
        course_id: String,
        course_name: String,
        credit_score: String,
    },
    /// Change name and credit score of the course on the given row.
    Edit {
        row: usize,
        course_name: String,
        credit_score: String,
    },
    /// Delete every course sharing the ID of the given row.
    Delete { row: usize },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        match err.downcast_ref::<ApiException>() {
            Some(api) => eprintln!("error ({:?}): {}", api.code, api.message),
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let client = CourseClient::new(&args.server_url)?;
    let mut table = CourseTable::load(client).await?;
    debug!(server_url = %args.server_url, rows = table.courses().len(), "loaded course table");

    match args.command {
        Command::List => {}
        Command::Add {
            course_id,
            course_name,
            credit_score,
        } => {
            table.form.course_id = course_id;
            table.form.course_name = course_name;
            table.form.credit_score = credit_score;
            table.add().await?;
        }
        Command::Edit {
            row,
            course_name,
            credit_score,
        } => {
            table.select(display_to_index(row))?;
            table.form.course_name = course_name;
            table.form.credit_score = credit_score;
            table.edit().await?;
        }
        Command::Delete { row } => {
            table.select(display_to_index(row))?;
            table.delete().await?;
        }
    }

    print!("{}", render(&table.rows()));
    Ok(())
}

/// Rows are shown numbered from 1; 0 maps past the end so selection fails.
fn display_to_index(row: usize) -> usize {
    row.checked_sub(1).unwrap_or(usize::MAX)
}

fn render(rows: &[CourseRow]) -> String {
    const HEADERS: [&str; 3] = ["Course ID", "Course Name", "Credit Scores"];
    // `format!` pads by char, so widths are counted the same way.
    let width = |text: &str| text.chars().count();
    let mut widths = HEADERS.map(width);
    for row in rows {
        widths[0] = widths[0].max(width(&row.course_id));
        widths[1] = widths[1].max(width(&row.course_name));
        widths[2] = widths[2].max(width(&row.credit_score));
    }

    let mut out = format!(
        "{:>4}  {:<w0$}  {:<w1$}  {:>w2$}\n",
        "#",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    for (index, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<w0$}  {:<w1$}  {:>w2$}\n",
            index + 1,
            row.course_id,
            row.course_name,
            row.credit_score,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    if rows.is_empty() {
        out.push_str("(no courses)\n");
    }
    out
}
