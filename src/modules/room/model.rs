use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::room::schema::{PropertyType, RoomEntity, TenantPreference};

#[derive(Deserialize, Validate)]
pub struct NewRoomModel {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
    #[validate(range(min = 0, message = "Rent price cannot be negative"))]
    pub rent_price: i64,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    #[validate(length(min = 10, message = "Contact number must be at least 10 digits long"))]
    pub contact_number: String,
    pub description: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateRoomModel {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    #[validate(range(min = 0, message = "Rent price cannot be negative"))]
    pub rent_price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub tenant_preference: Option<TenantPreference>,
    #[validate(length(min = 10, message = "Contact number must be at least 10 digits long"))]
    pub contact_number: Option<String>,
    pub description: Option<String>,
}

pub struct InsertRoom {
    pub title: String,
    pub location: String,
    pub rent_price: i64,
    pub property_type: PropertyType,
    pub tenant_preference: TenantPreference,
    pub contact_number: String,
    pub description: String,
    pub owner_id: Uuid,
}

pub struct UpdateRoom {
    pub title: Option<String>,
    pub location: Option<String>,
    pub rent_price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub tenant_preference: Option<TenantPreference>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
}

/// Listing-browser filters. All optional, freely combinable; price bounds
/// are inclusive.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    pub location: Option<String>,
    #[validate(range(min = 0, message = "minPrice cannot be negative"))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0, message = "maxPrice cannot be negative"))]
    pub max_price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub tenant_preference: Option<TenantPreference>,
}

#[derive(Serialize)]
pub struct RoomResponse {
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
    pub image_urls: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RoomResponse {
    pub fn from_entity(entity: RoomEntity, public_base_url: &str) -> Self {
        let image_urls =
            entity.images.iter().map(|key| format!("{}/{}", public_base_url, key)).collect();
        RoomResponse {
            id: entity.id,
            title: entity.title,
            location: entity.location,
            rent_price: entity.rent_price,
            property_type: entity.property_type,
            tenant_preference: entity.tenant_preference,
            contact_number: entity.contact_number,
            description: entity.description,
            owner_id: entity.owner_id,
            images: entity.images,
            image_urls,
            created_at: entity.created_at,
        }
    }
}
