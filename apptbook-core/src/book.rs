//! Appointments grouped under one owner.

use crate::appointment::Appointment;

/// An owner's appointments.
///
/// Stored in insertion order; callers only ever see them through
/// [`AppointmentBook::sorted`].
#[derive(Debug, Clone)]
pub struct AppointmentBook {
    owner: String,
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new(owner: impl Into<String>) -> Self {
        AppointmentBook {
            owner: owner.into(),
            appointments: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Duplicates are kept.
    pub fn add(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    /// A fresh copy sorted by begin, end, then description.
    pub fn sorted(&self) -> Vec<Appointment> {
        let mut sorted = self.appointments.clone();
        sorted.sort();
        sorted
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
