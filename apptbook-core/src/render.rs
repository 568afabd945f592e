//! Text reports for appointment books.

use std::io::Write;

use serde::Deserialize;

use crate::appointment::Appointment;
use crate::error::{ApptBookError, ApptBookResult};
use crate::time_codec::TimeCodec;

/// How a book is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Owner on the first line, then `description\tbegin\tend` per
    /// appointment using the original input text.
    Plain,
    /// Numbered, human-readable report.
    #[default]
    Pretty,
}

/// Writes books in one [`OutputStyle`], formatting times with its codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    codec: TimeCodec,
}

impl Renderer {
    pub fn new(codec: TimeCodec) -> Self {
        Renderer { codec }
    }

    /// Write `appointments` in the order given, then flush `sink`.
    ///
    /// The sink is consumed and dropped on every path. Lines written before
    /// a failure stay written.
    pub fn render<W: Write>(
        &self,
        owner: &str,
        appointments: &[Appointment],
        style: OutputStyle,
        mut sink: W,
    ) -> ApptBookResult<()> {
        let lines = match style {
            OutputStyle::Pretty => self.pretty_lines(owner, appointments),
            OutputStyle::Plain => plain_lines(owner, appointments),
        };

        for line in lines {
            writeln!(sink, "{line}")?;
        }
        sink.flush()?;

        Ok(())
    }

    pub fn render_to_string(
        &self,
        owner: &str,
        appointments: &[Appointment],
        style: OutputStyle,
    ) -> ApptBookResult<String> {
        let mut buf = Vec::new();
        self.render(owner, appointments, style, &mut buf)?;

        String::from_utf8(buf).map_err(|e| {
            ApptBookError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn pretty_lines(&self, owner: &str, appointments: &[Appointment]) -> Vec<String> {
        let mut lines = vec![
            "1. Appointment Book Information".to_string(),
            format!(" 1) Owner Name: {owner}"),
            String::new(),
            "2. Appointments".to_string(),
        ];

        for (i, appt) in appointments.iter().enumerate() {
            lines.push(format!(" {}) Appointment: {}", i + 1, appt.description()));
            lines.push(format!("    Begin Time:  {}", self.codec.format_pretty(&appt.begin())));
            lines.push(format!("    End Time:    {}", self.codec.format_pretty(&appt.end())));
            lines.push(format!("    Duration:    {} Minutes", appt.duration_in_minutes()));
        }

        lines
    }
}

fn plain_lines(owner: &str, appointments: &[Appointment]) -> Vec<String> {
    std::iter::once(owner.to_string())
        .chain(appointments.iter().map(|appt| {
            format!("{}\t{}\t{}", appt.description(), appt.begin_input(), appt.end_input())
        }))
        .collect()
}
