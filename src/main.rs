use actix::Actor;
use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{RedisCache, connect_database},
    middlewares::authentication,
    modules::{
        admin::{repository_pg::AdminRepositoryPg, service::AdminService},
        conversation::{repository_pg::ConversationRepositoryPg, service::ConversationService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        room::{
            repository_pg::RoomRepositoryPg,
            service::RoomService,
            storage::{RoomImageStore, StorageConfig},
        },
        user::{repository_pg::UserRepositoryPg, service::UserService},
        websocket::{handler::websocket_handler, server::WebSocketServer},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .map_err(|e| std::io::Error::other(format!("Migration error: {e}")))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let ws_server = WebSocketServer::new().start();

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepositoryPg::new(db_pool.clone()));
    let conversation_repo = Arc::new(ConversationRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let admin_repo = Arc::new(AdminRepositoryPg::new(db_pool.clone()));

    let storage = Arc::new(RoomImageStore::new(StorageConfig::default()));

    let user_service =
        UserService::with_dependencies(user_repo.clone(), Arc::new(redis_pool.clone()));
    let room_service = RoomService::with_dependencies(
        room_repo.clone(),
        conversation_repo.clone(),
        message_repo.clone(),
        storage.clone(),
    );
    let conversation_service = ConversationService::with_dependencies(
        conversation_repo.clone(),
        room_repo.clone(),
        storage.clone(),
        Some(ws_server.clone()),
    );
    let message_service = MessageService::with_dependencies(
        message_repo.clone(),
        conversation_repo.clone(),
        Some(ws_server.clone()),
    );
    let admin_service = AdminService::with_dependencies(
        admin_repo,
        user_repo,
        room_repo,
        conversation_repo,
        message_repo,
        room_service.clone(),
    );

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(room_service.clone()))
            .app_data(web::Data::new(conversation_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::from(storage.clone()))
            .app_data(web::Data::new(ws_server.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(modules::room::handle::serve_room_image)
            .route("/ws", web::get().to(websocket_handler))
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::room::route::configure)
                        .configure(modules::conversation::route::configure)
                        .configure(modules::admin::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
