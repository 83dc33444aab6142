use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::message::{model, schema::MessageEntity, service::MessageService};
use crate::utils::ValidatedJson;

#[get("/{conversation_id}/messages")]
pub async fn get_messages(
    message_service: web::Data<MessageService>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let messages = message_service.history(path.into_inner(), user_id).await?;
    Ok(success::Success::ok(Some(messages)).message("Messages retrieved successfully"))
}

#[post("/{conversation_id}/messages")]
pub async fn send_message(
    message_service: web::Data<MessageService>,
    path: web::Path<Uuid>,
    body: ValidatedJson<model::SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let message = message_service.send(path.into_inner(), user_id, body.0.message).await?;
    Ok(success::Success::created(Some(message)).message("Message sent"))
}
