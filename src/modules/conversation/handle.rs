use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::conversation::{model, service::ConversationService};
use crate::utils::ValidatedJson;

#[get("")]
pub async fn get_my_conversations(
    conversation_service: web::Data<ConversationService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<model::ConversationWithUnread>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let conversations = conversation_service.list_for_user(user_id).await?;
    Ok(success::Success::ok(Some(conversations)).message("Conversations retrieved successfully"))
}

#[post("")]
pub async fn create_conversation(
    conversation_service: web::Data<ConversationService>,
    body: ValidatedJson<model::CreateConversationModel>,
    req: HttpRequest,
) -> Result<success::Success<crate::modules::conversation::schema::ConversationEntity>, error::Error>
{
    let user_id = get_claims(&req)?.sub;
    let conversation = conversation_service.get_or_create(body.0.room_id, user_id).await?;
    Ok(success::Success::ok(Some(conversation)).message("Conversation ready"))
}

#[post("/{conversation_id}/read")]
pub async fn mark_conversation_read(
    conversation_service: web::Data<ConversationService>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    conversation_service.mark_as_read(path.into_inner(), user_id).await?;
    Ok(success::Success::ok(None).message("Conversation marked as read"))
}
