use actix_multipart::Multipart;
use actix_web::{HttpRequest, delete, get, patch, post, web};
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::room::{model, service::RoomService, storage::RoomImageStore};
use crate::modules::user::schema::UserRole;
use crate::utils::{Claims, ValidatedJson, ValidatedQuery};

/// Mutations share their paths with public reads, so the owner-role check
/// happens here instead of in a scope-level middleware.
fn require_owner(req: &HttpRequest) -> Result<Claims, error::Error> {
    let claims = get_claims(req)?;
    if claims.role != UserRole::Owner {
        return Err(error::Error::forbidden("Only owners can manage rooms"));
    }
    Ok(claims)
}

#[get("")]
pub async fn list_rooms(
    room_service: web::Data<RoomService>,
    filter: ValidatedQuery<model::RoomFilter>,
) -> Result<success::Success<Vec<model::RoomResponse>>, error::Error> {
    let rooms = room_service.list(filter.0).await?;
    Ok(success::Success::ok(Some(rooms)).message("Rooms retrieved successfully"))
}

#[get("/mine")]
pub async fn my_rooms(
    room_service: web::Data<RoomService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<model::RoomResponse>>, error::Error> {
    let owner_id = get_claims(&req)?.sub;
    let rooms = room_service.my_rooms(owner_id).await?;
    Ok(success::Success::ok(Some(rooms)).message("Rooms retrieved successfully"))
}

#[get("/{room_id}")]
pub async fn get_room(
    room_service: web::Data<RoomService>,
    path: web::Path<Uuid>,
) -> Result<success::Success<model::RoomResponse>, error::Error> {
    let room = room_service.get(path.into_inner()).await?;
    Ok(success::Success::ok(Some(room)).message("Room retrieved successfully"))
}

#[post("")]
pub async fn create_room(
    room_service: web::Data<RoomService>,
    body: ValidatedJson<model::NewRoomModel>,
    req: HttpRequest,
) -> Result<success::Success<model::RoomResponse>, error::Error> {
    let owner_id = require_owner(&req)?.sub;
    let room = room_service.create(owner_id, body.0).await?;
    Ok(success::Success::created(Some(room)).message("Room created successfully"))
}

#[patch("/{room_id}")]
pub async fn update_room(
    room_service: web::Data<RoomService>,
    path: web::Path<Uuid>,
    body: ValidatedJson<model::UpdateRoomModel>,
    req: HttpRequest,
) -> Result<success::Success<model::RoomResponse>, error::Error> {
    let requester_id = require_owner(&req)?.sub;
    let room = room_service.update(path.into_inner(), requester_id, body.0).await?;
    Ok(success::Success::ok(Some(room)).message("Room updated successfully"))
}

#[post("/{room_id}/images")]
pub async fn upload_room_images(
    room_service: web::Data<RoomService>,
    storage: web::Data<RoomImageStore>,
    path: web::Path<Uuid>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<model::RoomResponse>, error::Error> {
    let requester_id = require_owner(&req)?.sub;
    let room_id = path.into_inner();

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(mut field) =
        payload.try_next().await.map_err(|_| error::Error::InternalServer)?
    {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .ok_or_else(|| error::Error::bad_request("Missing filename"))?
            .to_string();

        let mime_type = field.content_type().map(|m| m.to_string()).unwrap_or_else(|| {
            mime_guess::from_path(&filename).first_or_octet_stream().to_string()
        });

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|_| error::Error::InternalServer)? {
            bytes.extend_from_slice(&chunk);
        }

        storage.validate(bytes.len(), &mime_type)?;
        files.push((filename, bytes));
    }

    let room = room_service.attach_images(room_id, requester_id, files).await?;
    Ok(success::Success::ok(Some(room)).message("Images uploaded successfully"))
}

#[delete("/{room_id}")]
pub async fn delete_room(
    room_service: web::Data<RoomService>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let requester_id = require_owner(&req)?.sub;
    room_service.delete(path.into_inner(), requester_id).await?;
    Ok(success::Success::ok(None).message("Room deleted successfully"))
}

/// Serves stored room images when PUBLIC_STORAGE_URL points back at this
/// server (the default). Registered outside /api so it needs no token.
#[get("/storage/room-images/{room_id}/{filename}")]
pub async fn serve_room_image(
    storage: web::Data<RoomImageStore>,
    path: web::Path<(Uuid, String)>,
) -> Result<actix_web::HttpResponse, error::Error> {
    let (room_id, filename) = path.into_inner();
    if filename.contains('/') || filename.contains("..") {
        return Err(error::Error::bad_request("Invalid file name"));
    }

    let key = format!("{}/{}", room_id, filename);
    let bytes = storage
        .load(&key)
        .await
        .map_err(error::Error::from)?
        .ok_or_else(|| error::Error::not_found("Image not found"))?;

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(actix_web::HttpResponse::Ok().content_type(mime.as_ref()).body(bytes))
}
