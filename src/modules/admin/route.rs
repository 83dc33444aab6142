use actix_web::middleware::from_fn;
use actix_web::web::{ServiceConfig, scope};

use crate::middlewares::admin_only;
use crate::modules::admin::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/admin")
            .wrap(from_fn(admin_only))
            .service(get_admins)
            .service(add_admin)
            .service(remove_admin)
            .service(list_users)
            .service(delete_user)
            .service(list_rooms)
            .service(delete_room)
            .service(list_conversations)
            .service(delete_conversation)
            .service(list_messages)
            .service(delete_message),
    );
}
