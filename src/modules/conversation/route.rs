use actix_web::web::{ServiceConfig, scope};

use crate::modules::conversation::handle::*;
use crate::modules::message::handle::{get_messages, send_message};

/// Message routes live under /conversations/{id}, so they register in the
/// same scope; a second scope with the same prefix would shadow this one.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/conversations")
            .service(get_my_conversations)
            .service(create_conversation)
            .service(mark_conversation_read)
            .service(get_messages)
            .service(send_message),
    );
}
