use actix_web::{delete, get, post, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::admin::{model, service::AdminService};
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::message::schema::MessageEntity;
use crate::modules::room::schema::RoomEntity;
use crate::modules::user::model::UserResponse;
use crate::utils::ValidatedJson;

#[get("/admins")]
pub async fn get_admins(
    admin_service: web::Data<AdminService>,
) -> Result<success::Success<model::AdminListResponse>, error::Error> {
    let emails = admin_service.get_admins().await?;
    Ok(success::Success::ok(Some(model::AdminListResponse { emails }))
        .message("Admins retrieved successfully"))
}

#[post("/admins")]
pub async fn add_admin(
    admin_service: web::Data<AdminService>,
    body: ValidatedJson<model::AddAdminModel>,
) -> Result<success::Success<model::AdminEntity>, error::Error> {
    let admin = admin_service.add_admin(&body.0.email).await?;
    Ok(success::Success::created(Some(admin)).message("Admin added successfully"))
}

#[delete("/admins/{email}")]
pub async fn remove_admin(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
) -> Result<success::Success<()>, error::Error> {
    admin_service.remove_admin(&path.into_inner()).await?;
    Ok(success::Success::ok(None).message("Admin removed successfully"))
}

#[get("/users")]
pub async fn list_users(
    admin_service: web::Data<AdminService>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let users = admin_service.list_users().await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    admin_service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    admin_service.delete_user(path.into_inner()).await?;
    Ok(success::Success::ok(None).message("User deleted successfully"))
}

#[get("/rooms")]
pub async fn list_rooms(
    admin_service: web::Data<AdminService>,
) -> Result<success::Success<Vec<RoomEntity>>, error::Error> {
    let rooms = admin_service.list_rooms().await?;
    Ok(success::Success::ok(Some(rooms)).message("Rooms retrieved successfully"))
}

#[delete("/rooms/{room_id}")]
pub async fn delete_room(
    admin_service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    admin_service.delete_room(path.into_inner()).await?;
    Ok(success::Success::ok(None).message("Room deleted successfully"))
}

#[get("/conversations")]
pub async fn list_conversations(
    admin_service: web::Data<AdminService>,
) -> Result<success::Success<Vec<ConversationEntity>>, error::Error> {
    let conversations = admin_service.list_conversations().await?;
    Ok(success::Success::ok(Some(conversations)).message("Conversations retrieved successfully"))
}

#[delete("/conversations/{conversation_id}")]
pub async fn delete_conversation(
    admin_service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    admin_service.delete_conversation(path.into_inner()).await?;
    Ok(success::Success::ok(None).message("Conversation deleted successfully"))
}

#[get("/messages")]
pub async fn list_messages(
    admin_service: web::Data<AdminService>,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let messages = admin_service.list_recent_messages().await?;
    Ok(success::Success::ok(Some(messages)).message("Messages retrieved successfully"))
}

#[delete("/messages/{message_id}")]
pub async fn delete_message(
    admin_service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    admin_service.delete_message(path.into_inner()).await?;
    Ok(success::Success::ok(None).message("Message deleted successfully"))
}
