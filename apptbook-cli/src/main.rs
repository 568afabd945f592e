use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use apptbook_core::time_codec::{check_date_format, check_meridiem, check_time_format};
use apptbook_core::{Appointment, AppointmentBook, OutputStyle, Renderer, TimeCodec};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apptbook")]
#[command(about = "Build an appointment for an owner and print it")]
struct Cli {
    /// Print a one-line description of the new appointment
    #[arg(long)]
    print: bool,

    /// Write a pretty report of the owner's book to FILE ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pretty: Option<PathBuf>,

    /// IANA time zone the times are in (defaults to the system zone)
    #[arg(long)]
    zone: Option<String>,

    /// Person whose appointment book this is
    owner: String,

    /// What the appointment is
    description: String,

    /// Begin date, M/d/yyyy
    begin_date: String,
    /// Begin time, h:mm
    begin_time: String,
    /// am or pm
    begin_am_pm: String,

    /// End date, M/d/yyyy
    end_date: String,
    /// End time, h:mm
    end_time: String,
    /// am or pm
    end_am_pm: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli, io::stdout().lock())
}

fn run<W: Write>(cli: Cli, mut out: W) -> Result<()> {
    if cli.owner.trim().is_empty() {
        bail!("Owner must not be empty");
    }
    if cli.description.trim().is_empty() {
        bail!("Description must not be empty");
    }

    let codec = match &cli.zone {
        Some(name) => TimeCodec::from_zone_name(name)?,
        None => TimeCodec::system_default(),
    };
    debug!(zone = codec.zone().name(), "using time zone");

    let begin = timestamp("begin", &cli.begin_date, &cli.begin_time, &cli.begin_am_pm)?;
    let end = timestamp("end", &cli.end_date, &cli.end_time, &cli.end_am_pm)?;

    let appointment = Appointment::new(&codec, cli.description.as_str(), &begin, &end)
        .context("Could not create appointment")?;

    if cli.print {
        writeln!(out, "{}", appointment.display_with(&codec))?;
    }

    let mut book = AppointmentBook::new(cli.owner.as_str());
    book.add(appointment);

    if let Some(path) = &cli.pretty {
        let renderer = Renderer::new(codec);
        if path.as_os_str() == "-" {
            renderer.render(book.owner(), &book.sorted(), OutputStyle::Pretty, &mut out)?;
        } else {
            let file = File::create(path)
                .with_context(|| format!("Could not create {}", path.display()))?;
            renderer
                .render(book.owner(), &book.sorted(), OutputStyle::Pretty, file)
                .with_context(|| format!("Could not write {}", path.display()))?;
        }
    }

    Ok(())
}

/// Check each piece separately so the error names the bad argument.
fn timestamp(which: &str, date: &str, time: &str, am_pm: &str) -> Result<String> {
    if !check_date_format(date) {
        bail!("Invalid {which} date '{date}'. Expected M/d/yyyy");
    }
    if !check_time_format(time) {
        bail!("Invalid {which} time '{time}'. Expected h:mm");
    }
    if !check_meridiem(am_pm) {
        bail!("Invalid {which} meridiem '{am_pm}'. Expected am or pm");
    }

    Ok(format!("{date} {time} {am_pm}"))
}
