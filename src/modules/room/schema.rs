use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, Type, Serialize, Deserialize)]
#[sqlx(type_name = "room_property_type")]
pub enum PropertyType {
    #[sqlx(rename = "1 BHK")]
    #[serde(rename = "1 BHK")]
    OneBhk,
    #[sqlx(rename = "2 BHK")]
    #[serde(rename = "2 BHK")]
    TwoBhk,
    #[sqlx(rename = "1 Bed")]
    #[serde(rename = "1 Bed")]
    OneBed,
    #[sqlx(rename = "2 Bed")]
    #[serde(rename = "2 Bed")]
    TwoBed,
    #[sqlx(rename = "3 Bed")]
    #[serde(rename = "3 Bed")]
    ThreeBed,
}

#[derive(Debug, PartialEq, Clone, Type, Serialize, Deserialize)]
#[sqlx(type_name = "room_tenant_preference")]
pub enum TenantPreference {
    Bachelor,
    Family,
    Girls,
    Working,
}

/// A room listing. `images` holds ordered storage object keys of the form
/// `{room_id}/{timestamp}-{index}.{ext}`; public URLs are derived at
/// response time, never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomEntity {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub rent_price: i64,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    pub contact_number: String,
    pub description: String,
    pub owner_id: Uuid,
    pub images: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_serde_uses_display_labels() {
        let json = serde_json::to_string(&PropertyType::TwoBhk).unwrap();
        assert_eq!(json, "\"2 BHK\"");
        let parsed: PropertyType = serde_json::from_str("\"3 Bed\"").unwrap();
        assert_eq!(parsed, PropertyType::ThreeBed);
    }

    #[test]
    fn test_tenant_preference_serde() {
        let parsed: TenantPreference = serde_json::from_str("\"Working\"").unwrap();
        assert_eq!(parsed, TenantPreference::Working);
        assert!(serde_json::from_str::<TenantPreference>("\"Anyone\"").is_err());
    }
}
