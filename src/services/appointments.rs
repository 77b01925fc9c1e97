use chrono::Utc;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::Appointment;
use crate::services::clients;
use crate::services::parsing::ParseOutcome;

/// Stores a parsed appointment under a fresh id and updates the client
/// registry to match.
pub fn create_appointment(conn: &Connection, outcome: ParseOutcome) -> anyhow::Result<Appointment> {
    let appointment = Appointment::new(outcome.appointment, outcome.source);

    let mut appointments = queries::load_appointments(conn)?;
    appointments.push(appointment.clone());
    queries::save_appointments(conn, &appointments)?;

    let mut registry = queries::load_clients(conn)?;
    if clients::register_client(&mut registry, &appointment, Utc::now()) {
        queries::save_clients(conn, &registry)?;
    }

    tracing::info!(
        id = %appointment.id,
        source = appointment.source.as_str(),
        "appointment stored"
    );
    Ok(appointment)
}

/// All appointments, soonest first. Unparsable timestamps sort last.
pub fn list_appointments(conn: &Connection) -> anyhow::Result<Vec<Appointment>> {
    let mut appointments = queries::load_appointments(conn)?;
    appointments.sort_by_key(|a| (a.starts_at().is_none(), a.starts_at()));
    Ok(appointments)
}

pub fn get_appointment(conn: &Connection, id: &str) -> anyhow::Result<Option<Appointment>> {
    Ok(queries::load_appointments(conn)?
        .into_iter()
        .find(|a| a.id == id))
}

pub fn delete_appointment(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let mut appointments = queries::load_appointments(conn)?;
    let before = appointments.len();
    appointments.retain(|a| a.id != id);
    if appointments.len() == before {
        return Ok(false);
    }
    queries::save_appointments(conn, &appointments)?;
    tracing::info!(id, "appointment deleted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::extractor::NO_PHONE;
    use crate::models::{ParseSource, ParsedAppointment};

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn outcome(name: &str, phone: &str, datetime: &str) -> ParseOutcome {
        ParseOutcome {
            appointment: ParsedAppointment {
                name: name.to_string(),
                phone: phone.to_string(),
                datetime: datetime.to_string(),
                details: "estimate".to_string(),
            },
            source: ParseSource::Rules,
        }
    }

    #[test]
    fn test_create_registers_client() {
        let conn = setup_db();
        let appt =
            create_appointment(&conn, outcome("John Doe", "720-555-1212", "2026-10-20T15:00:00+00:00"))
                .unwrap();
        assert!(!appt.id.is_empty());

        let clients = queries::load_clients(&conn).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].phone, "720-555-1212");
    }

    #[test]
    fn test_create_without_phone_leaves_registry_alone() {
        let conn = setup_db();
        create_appointment(&conn, outcome("John Doe", NO_PHONE, "2026-10-20T15:00:00+00:00"))
            .unwrap();
        assert_eq!(queries::get_value(&conn, queries::CLIENTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_list_sorted_by_start() {
        let conn = setup_db();
        create_appointment(&conn, outcome("Late", NO_PHONE, "2026-10-22T09:00:00+00:00")).unwrap();
        create_appointment(&conn, outcome("Broken", NO_PHONE, "someday")).unwrap();
        // 08:00 at -06:00 is 14:00 UTC, after the 10:00 UTC one
        create_appointment(&conn, outcome("Middle", NO_PHONE, "2026-10-20T08:00:00-06:00")).unwrap();
        create_appointment(&conn, outcome("Early", NO_PHONE, "2026-10-20T10:00:00+00:00")).unwrap();

        let names: Vec<String> = list_appointments(&conn)
            .unwrap()
            .into_iter()
            .map(|a| a.parsed.name)
            .collect();
        assert_eq!(names, vec!["Early", "Middle", "Late", "Broken"]);
    }

    #[test]
    fn test_get_and_delete() {
        let conn = setup_db();
        let appt =
            create_appointment(&conn, outcome("John", NO_PHONE, "2026-10-20T15:00:00+00:00")).unwrap();

        assert!(get_appointment(&conn, &appt.id).unwrap().is_some());
        assert!(delete_appointment(&conn, &appt.id).unwrap());
        assert!(get_appointment(&conn, &appt.id).unwrap().is_none());
        assert!(!delete_appointment(&conn, &appt.id).unwrap());
    }
}
