#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, flash_messages, run, session_middleware};

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_files::Files;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::{MIN_SECRET_LEN, ServerConfig};
    use crate::repository::{CharacterReader, GraphqlCharacterRepository};
    use crate::routes::api::api_v1_characters;
    use crate::routes::main::{go_to_page, refresh, search, show_index};
    use crate::services::viewers::ViewerRegistry;

    /// Session cookie carrying the viewer id.
    pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), key)
            .cookie_name("character_browser".to_string())
            .cookie_secure(false) // set to true in prod
            .build()
    }

    pub fn flash_messages(key: Key) -> FlashMessagesFramework {
        let message_store = CookieMessageStore::builder(key).build();
        FlashMessagesFramework::builder(message_store).build()
    }

    /// Registers the HTML and JSON routes.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(web::scope("/api").service(api_v1_characters))
            .service(show_index)
            .service(search)
            .service(go_to_page)
            .service(refresh);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        if server_config.secret.len() < MIN_SECRET_LEN {
            return Err(std::io::Error::other(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        let repo = GraphqlCharacterRepository::connect(
            &server_config.api_url,
            server_config.request_timeout(),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to set up character API: {e}")))?;
        log::info!("Character API: {}", repo.endpoint());
        let repo: Arc<dyn CharacterReader> = Arc::new(repo);

        let registry = web::Data::new(ViewerRegistry::new(server_config.viewer_idle_timeout()));

        // Keys and stores for sessions and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(flash_messages(secret_key.clone()))
                .wrap(session_middleware(secret_key.clone()))
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::from(repo.clone()))
                .app_data(registry.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
