use actix_web::web::{ServiceConfig, scope};

use crate::modules::room::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/rooms")
            // /mine must register before /{room_id}
            .service(my_rooms)
            .service(list_rooms)
            .service(create_room)
            .service(get_room)
            .service(update_room)
            .service(upload_room_images)
            .service(delete_room),
    );
}
