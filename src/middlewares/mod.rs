use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::{
    ENV,
    api::error,
    modules::admin::service::AdminService,
    utils::{Claims, TypeClaims},
};

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let auth = req.headers().get("Authorization").and_then(|h| h.to_str().ok());
    let token = match auth.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(t) => t,
        None => {
            return Err(error::Error::unauthorized("Token Invalid or Expired").into());
        }
    };

    let claims = Claims::decode(token, ENV.jwt_secret.as_ref())
        .map_err(|_| error::Error::forbidden("Token Invalid or Expired"))?;

    if claims._type.as_ref() != Some(&TypeClaims::AccessToken) {
        return Err(error::Error::forbidden("Access token required").into());
    }

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_claims(req: &HttpRequest) -> Result<Claims, error::Error> {
    let extensions = req.extensions();

    let claims = extensions
        .get::<Claims>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(claims)
}

/// Admin guard: the allow-list check runs here, at the trust boundary, on
/// every admin request. A client cannot self-grant admin actions.
pub async fn admin_only<B>(req: ServiceRequest, next: Next<B>) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let email = get_claims(req.request())?.email;

    let admin_service = req
        .app_data::<web::Data<AdminService>>()
        .ok_or_else(|| error::Error::InternalServer)?;

    if !admin_service.is_admin(&email).await {
        return Err(error::Error::forbidden("Admin access required").into());
    }

    next.call(req).await
}
