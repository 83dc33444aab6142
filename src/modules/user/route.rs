use actix_web::web::{ServiceConfig, scope};

use crate::modules::user::handle::*;

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/auth").service(sign_up).service(sign_in).service(refresh));
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/users").service(get_profile).service(switch_role).service(sign_out));
}
