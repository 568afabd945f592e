//! Core types for apptbook.
//!
//! - `time_codec` parses and formats the short `M/d/yyyy h:mm a` timestamps
//! - `appointment` holds one appointment and its ordering
//! - `book` and `store` group appointments per owner
//! - `render` turns a book into a text report

pub mod appointment;
pub mod book;
pub mod error;
pub mod render;
pub mod store;
pub mod time_codec;

pub use appointment::{Appointment, AppointmentDisplay};
pub use book::AppointmentBook;
pub use error::{ApptBookError, ApptBookResult};
pub use render::{OutputStyle, Renderer};
pub use store::{OwnerStore, SEED_OWNER};
pub use time_codec::{Instant, TimeCodec};
