pub mod ai;
pub mod appointments;
pub mod calendar;
pub mod clients;
pub mod parsing;
