use chrono::{DateTime, Utc};

use crate::extractor::{NO_PHONE, UNKNOWN_NAME};
use crate::models::{Appointment, Client};

/// Records `appointment` against the client with the same phone number,
/// adding the client if it is new. Appointments without a phone are ignored.
/// Returns whether the registry changed.
pub fn register_client(
    clients: &mut Vec<Client>,
    appointment: &Appointment,
    now: DateTime<Utc>,
) -> bool {
    let parsed = &appointment.parsed;
    if parsed.phone == NO_PHONE {
        return false;
    }

    if let Some(client) = clients.iter_mut().find(|c| c.phone == parsed.phone) {
        client.appointment_count += 1;
        client.updated_at = now;
        if client.name == UNKNOWN_NAME && parsed.name != UNKNOWN_NAME {
            client.name = parsed.name.clone();
        }
        return true;
    }

    clients.push(Client {
        id: uuid::Uuid::new_v4().to_string(),
        name: parsed.name.clone(),
        phone: parsed.phone.clone(),
        appointment_count: 1,
        created_at: now,
        updated_at: now,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParseSource, ParsedAppointment};

    fn appt(name: &str, phone: &str) -> Appointment {
        Appointment::new(
            ParsedAppointment {
                name: name.to_string(),
                phone: phone.to_string(),
                datetime: "2026-10-20T15:00:00+00:00".to_string(),
                details: "estimate".to_string(),
            },
            ParseSource::Rules,
        )
    }

    #[test]
    fn test_new_client_added() {
        let mut clients = Vec::new();
        assert!(register_client(&mut clients, &appt("John Doe", "720-555-1212"), Utc::now()));
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "John Doe");
        assert_eq!(clients[0].appointment_count, 1);
    }

    #[test]
    fn test_same_phone_counts_again() {
        let mut clients = Vec::new();
        register_client(&mut clients, &appt("John Doe", "720-555-1212"), Utc::now());
        register_client(&mut clients, &appt("Johnny", "720-555-1212"), Utc::now());
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].appointment_count, 2);
        assert_eq!(clients[0].name, "John Doe");
    }

    #[test]
    fn test_unknown_name_filled_in_later() {
        let mut clients = Vec::new();
        register_client(&mut clients, &appt(UNKNOWN_NAME, "720-555-1212"), Utc::now());
        register_client(&mut clients, &appt("John Doe", "720-555-1212"), Utc::now());
        assert_eq!(clients[0].name, "John Doe");
    }

    #[test]
    fn test_no_phone_ignored() {
        let mut clients = Vec::new();
        assert!(!register_client(&mut clients, &appt("John Doe", NO_PHONE), Utc::now()));
        assert!(clients.is_empty());
    }
}
