//! coursecal - convert a printed academic schedule PDF to an ICS calendar
//!
//! Runs the full pipeline: positioned text fragments from the PDF, row
//! reconstruction, course/meeting assembly, event building, iCalendar
//! serialization. A previously dumped row JSON file (`--dump-rows`) is
//! accepted in place of a PDF, which keeps the parser usable where no
//! pdfium library is installed.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use coursecal_calendar::{
    build_events, serialize_calendar, CalendarAttributes, CalendarError, TimestampMode,
};
use coursecal_core::{Course, Row};
use coursecal_parse::assemble_courses;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coursecal", version, about = "Printed schedule PDF to ICS converter")]
struct Cli {
    /// Input file: a schedule PDF, or a row-dump JSON produced by --dump-rows
    input: PathBuf,

    /// Output path (default: input path with .ics extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export only these CRNs (comma-separated); default is all exportable courses
    #[arg(long, value_delimiter = ',')]
    crn: Vec<u32>,

    /// Print resolved courses as JSON instead of writing an ICS file
    #[arg(long)]
    json: bool,

    /// Write the reconstructed rows as JSON and exit
    #[arg(long)]
    dump_rows: bool,

    /// Render exported instants in UTC or as local wall-clock components
    #[arg(long, value_enum, default_value_t = Mode::Utc)]
    timezone_mode: Mode,

    /// Calendar display name (X-WR-CALNAME)
    #[arg(long, default_value = "Class Schedule")]
    calendar_name: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Utc,
    Local,
}

impl From<Mode> for TimestampMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Utc => Self::Utc,
            Mode::Local => Self::Local,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rows = load_rows(&cli.input)?;
    log::info!("reconstructed {} rows", rows.len());

    if cli.dump_rows {
        let json = serde_json::to_string_pretty(&rows)?;
        println!("{json}");
        return Ok(());
    }

    let courses = assemble_courses(&rows);
    if courses.is_empty() {
        bail!(
            "no course table recognized in {} (missing table markers?)",
            cli.input.display()
        );
    }
    log::info!("assembled {} course meetings", courses.len());

    let selected = select_courses(courses, &cli.crn)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    let events = build_events(&selected, cli.timezone_mode.into());
    let calendar = CalendarAttributes::new(cli.calendar_name.as_str());
    let ics = match serialize_calendar(&calendar, &events) {
        Ok(ics) => ics,
        Err(CalendarError::NoEvents) => {
            bail!("none of the selected courses has an exportable meeting")
        }
        Err(e) => bail!("calendar serialization failed: {e}"),
    };

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("ics"));
    fs::write(&output, &ics)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {} events to {}", events.len(), output.display());
    Ok(())
}

/// Load the document's row sequence from a PDF or a row-dump JSON file
fn load_rows(input: &Path) -> Result<Vec<Row>> {
    if input.extension().is_some_and(|ext| ext == "json") {
        let content = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let rows: Vec<Row> =
            serde_json::from_str(&content).context("row-dump JSON is malformed")?;
        return Ok(rows);
    }
    load_pdf_rows(input)
}

#[cfg(feature = "pdf")]
fn load_pdf_rows(input: &Path) -> Result<Vec<Row>> {
    use coursecal_parse::{reconstruct_document, FragmentExtractor};

    let extractor = FragmentExtractor::new()?;
    let pages = extractor
        .extract_document(input)
        .with_context(|| format!("failed to extract text from {}", input.display()))?;
    Ok(reconstruct_document(&pages))
}

#[cfg(not(feature = "pdf"))]
fn load_pdf_rows(input: &Path) -> Result<Vec<Row>> {
    bail!(
        "{}: PDF input requires the `pdf` feature; pass a row-dump JSON file instead",
        input.display()
    )
}

/// Apply the CRN selection.
///
/// An explicit selection is strict: every requested CRN must exist and
/// carry full temporal fields, since the user asked for exactly those
/// courses. With no selection, non-exportable courses are skipped
/// silently downstream.
fn select_courses(courses: Vec<Course>, crns: &[u32]) -> Result<Vec<Course>> {
    if crns.is_empty() {
        return Ok(courses);
    }

    for &crn in crns {
        let matches: Vec<&Course> = courses.iter().filter(|c| c.crn == crn).collect();
        if matches.is_empty() {
            bail!("CRN {crn} not found in the parsed schedule");
        }
        if !matches
            .iter()
            .any(|c| c.is_exportable() && c.until.is_some())
        {
            bail!("CRN {crn} has no meeting with complete day/time/date information");
        }
    }

    Ok(courses
        .into_iter()
        .filter(|c| crns.contains(&c.crn))
        .collect())
}
