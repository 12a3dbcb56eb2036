use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Stage a booking is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Completed,
    Cancelled,
}

/// Turf booking owned by a user. Serde names follow the stored document
/// shape, including the capitalized customer fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub turf_name: String,
    #[serde(rename = "Name")]
    pub customer_name: String,
    #[serde(rename = "Email")]
    pub customer_email: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time_slot: String,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turf_image_url: Option<String>,
}

/// User record; bookings ride along inside the row as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    /// Outstanding challenge code; empty until one is issued. A new issuance
    /// overwrites the previous code, which invalidates it.
    pub otp: String,
    pub otp_expiry: Option<OffsetDateTime>,
    pub bookings: Json<Vec<Booking>>,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn booking_serializes_with_document_field_names() {
        let booking = Booking {
            booking_id: "BK-1001".into(),
            turf_name: "Green Arena".into(),
            customer_name: "Asha".into(),
            customer_email: "asha@x.com".into(),
            location: "Chennai".into(),
            date: datetime!(2025-06-01 18:00 UTC),
            time_slot: "18:00-19:00".into(),
            status: BookingStatus::Confirmed,
            turf_image_url: None,
        };

        let json = serde_json::to_value(&booking).expect("serialize");
        assert_eq!(json["bookingId"], "BK-1001");
        assert_eq!(json["turfName"], "Green Arena");
        assert_eq!(json["Name"], "Asha");
        assert_eq!(json["Email"], "asha@x.com");
        assert_eq!(json["timeSlot"], "18:00-19:00");
        assert_eq!(json["status"], "Confirmed");
        assert!(json.get("turfImageUrl").is_none());
    }

    #[test]
    fn user_never_serializes_its_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: Some("asha".into()),
            email: "asha@x.com".into(),
            password_hash: "secret-hash".into(),
            otp: String::new(),
            otp_expiry: None,
            bookings: Json(Vec::new()),
            created_at: datetime!(2025-06-01 12:00 UTC),
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("asha@x.com"));
    }
}
