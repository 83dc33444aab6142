use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::ENV;
use crate::api::error;
use crate::configs::RedisCache;

use crate::modules::user::model::{InsertUser, SignInModel, SignUpModel, UserResponse};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserRole;
use crate::utils::{Claims, TypeClaims, hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    cache: Arc<RedisCache>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        cache: Arc<RedisCache>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, cache }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let key = format!("user:{}", id);
        if let Some(cached_user) = self.cache.get::<UserResponse>(&key).await? {
            return Ok(cached_user);
        }
        let user_entity = self.repo.find_by_id(&id).await?;
        if let Some(entity) = user_entity {
            self.cache.set(&key, &UserResponse::from(entity.clone()), 3600).await?;
            Ok(UserResponse::from(entity))
        } else {
            Err(error::SystemError::not_found("User not found"))
        }
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Uuid, error::SystemError> {
        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            username: user.username,
            email: user.email.to_lowercase(),
            hash_password,
            display_name: user.display_name,
            role: user.role,
        };

        let user_id = self.repo.create(&new_user).await?;
        Ok(user_id)
    }

    pub async fn sign_in(&self, user: SignInModel) -> Result<(String, String), error::SystemError> {
        let user_entity = self
            .repo
            .find_by_username(&user.username)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid username or password"))?;

        let valid = verify_password(&user_entity.hash_password, &user.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Invalid username or password"));
        }

        self.issue_tokens(&user_entity.id, &user_entity.role, &user_entity.email).await
    }

    /// Switch between owner and finder. Takes effect in the claims on the
    /// next refresh; the profile cache is dropped right away.
    pub async fn switch_role(&self, id: Uuid, role: UserRole) -> Result<(), error::SystemError> {
        self.repo.set_role(&id, &role).await?;
        self.cache.delete(&format!("user:{}", id)).await?;
        Ok(())
    }

    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
    ) -> Result<(String, String), error::SystemError> {
        let token = refresh_token
            .ok_or_else(|| error::SystemError::unauthorized("Missing refresh token"))?;

        let claims = Claims::decode(&token, ENV.jwt_secret.as_ref())
            .map_err(|_| error::SystemError::unauthorized("Invalid refresh token"))?;

        if claims._type.as_ref() != Some(&TypeClaims::RefreshToken) {
            return Err(error::SystemError::unauthorized("Invalid refresh token"));
        }

        let jti =
            claims.jti.ok_or_else(|| error::SystemError::unauthorized("Invalid refresh token"))?;
        let refresh_key = format!("refresh_token:{jti}");
        let stored: Option<Uuid> = self.cache.get(&refresh_key).await?;
        if stored != Some(claims.sub) {
            return Err(error::SystemError::unauthorized("Refresh session expired"));
        }

        // Session refresh re-reads the profile so a role switch sticks.
        let user_entity = self
            .repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("User no longer exists"))?;

        self.cache.delete(&refresh_key).await?;
        self.issue_tokens(&user_entity.id, &user_entity.role, &user_entity.email).await
    }

    pub async fn sign_out(&self, refresh_token: Option<String>) -> Result<(), error::SystemError> {
        if let Some(token) = refresh_token {
            if let Ok(claims) = Claims::decode(&token, ENV.jwt_secret.as_ref()) {
                if let Some(jti) = claims.jti {
                    self.cache.delete(&format!("refresh_token:{jti}")).await?;
                }
            }
        }
        Ok(())
    }

    async fn issue_tokens(
        &self,
        user_id: &Uuid,
        role: &UserRole,
        email: &str,
    ) -> Result<(String, String), error::SystemError> {
        let access_token = Claims::new(user_id, role, email, ENV.access_token_expiration)
            .with_type(TypeClaims::AccessToken)
            .encode(ENV.jwt_secret.as_ref())?;

        let jti = Uuid::now_v7();
        let refresh_token = Claims::new(user_id, role, email, ENV.refresh_token_expiration)
            .with_jti(jti)
            .with_type(TypeClaims::RefreshToken)
            .encode(ENV.jwt_secret.as_ref())?;

        let refresh_key = format!("refresh_token:{jti}");
        self.cache.set(&refresh_key, user_id, ENV.refresh_token_expiration as usize).await?;

        Ok((access_token, refresh_token))
    }
}
