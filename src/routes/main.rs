use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::forms::main::SearchForm;
use crate::repository::CharacterReader;
use crate::routes::{collect_alerts, redirect, render_template, spawn_fetch, viewer_id};
use crate::services::main as main_service;
use crate::services::viewers::{FetchTicket, ViewerRegistry};
use crate::services::{ServiceError, ServiceResult};

#[get("/")]
pub async fn show_index(
    session: Session,
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> actix_web::Result<HttpResponse> {
    let viewer = viewer_id(&session)?;

    match main_service::visit(&registry, viewer) {
        Ok(Some(ticket)) => spawn_fetch(repo, registry.clone(), ticket),
        Ok(None) => {}
        Err(err) => {
            log::error!("Failed to register visit: {err}");
            return Ok(HttpResponse::InternalServerError().finish());
        }
    }

    let data = match main_service::load_index_page(&registry, viewer) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load index page: {err}");
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(&flash_messages));

    if let Some(error) = &data.error {
        context.insert("error", error);
        return Ok(render_template(&tera, "main/error.html", &context));
    }

    context.insert("data", &data);
    Ok(render_template(&tera, "main/index.html", &context))
}

#[post("/search")]
pub async fn search(
    session: Session,
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
    web::Form(form): web::Form<SearchForm>,
) -> actix_web::Result<impl Responder> {
    let viewer = viewer_id(&session)?;
    let result = main_service::search(&registry, viewer, form);
    Ok(start_fetch(repo, registry, result))
}

#[post("/page/{page}")]
pub async fn go_to_page(
    page: web::Path<u32>,
    session: Session,
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
) -> actix_web::Result<impl Responder> {
    let viewer = viewer_id(&session)?;
    let result = main_service::go_to_page(&registry, viewer, page.into_inner());
    Ok(start_fetch(repo, registry, result))
}

#[post("/refresh")]
pub async fn refresh(
    session: Session,
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
) -> actix_web::Result<impl Responder> {
    let viewer = viewer_id(&session)?;
    let result = main_service::refresh(&registry, viewer);
    Ok(start_fetch(repo, registry, result))
}

/// Spawns the fetch of a successful parameter change and sends the viewer back to `/`.
fn start_fetch(
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
    result: ServiceResult<FetchTicket>,
) -> HttpResponse {
    match result {
        Ok(ticket) => {
            spawn_fetch(repo, registry, ticket);
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(format!("Invalid page: {message}")).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to change view parameters: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
