pub mod appointment;
pub mod client;

pub use appointment::{Appointment, ParseSource, ParsedAppointment};
pub use client::Client;
