//! A single appointment.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ApptBookResult;
use crate::time_codec::{Instant, TimeCodec, minutes_between};

/// A description with begin and end instants.
///
/// The raw begin/end text is kept exactly as given so dumps can echo the
/// caller's input. Equality and ordering only look at begin, end and
/// description, in that order.
#[derive(Debug, Clone)]
pub struct Appointment {
    description: String,
    begin: Instant,
    end: Instant,
    begin_input: String,
    end_input: String,
}

impl Appointment {
    /// Parse `begin` and `end` with `codec` and build the appointment.
    ///
    /// `end` is not required to follow `begin`.
    pub fn new(
        codec: &TimeCodec,
        description: impl Into<String>,
        begin: &str,
        end: &str,
    ) -> ApptBookResult<Self> {
        Ok(Appointment {
            description: description.into(),
            begin: codec.parse(begin)?,
            end: codec.parse(end)?,
            begin_input: begin.to_string(),
            end_input: end.to_string(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn begin(&self) -> Instant {
        self.begin
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    /// Begin time exactly as it was passed to [`Appointment::new`].
    pub fn begin_input(&self) -> &str {
        &self.begin_input
    }

    /// End time exactly as it was passed to [`Appointment::new`].
    pub fn end_input(&self) -> &str {
        &self.end_input
    }

    /// Negative when the end precedes the begin.
    pub fn duration_in_minutes(&self) -> i64 {
        minutes_between(&self.begin, &self.end)
    }

    /// `{description} from {begin} until {end}`, times in `codec`'s zone.
    pub fn display_with<'a>(&'a self, codec: &'a TimeCodec) -> AppointmentDisplay<'a> {
        AppointmentDisplay {
            appointment: self,
            codec,
        }
    }
}

/// Short one-line form of an [`Appointment`], see [`Appointment::display_with`].
pub struct AppointmentDisplay<'a> {
    appointment: &'a Appointment,
    codec: &'a TimeCodec,
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Appointment {}

impl PartialOrd for Appointment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Appointment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.description.as_bytes().cmp(other.description.as_bytes()))
    }
}

impl fmt::Display for AppointmentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} until {}",
            self.appointment.description,
            self.codec.format_short(&self.appointment.begin),
            self.codec.format_short(&self.appointment.end)
        )
    }
}
