//! HTTP handlers and the helpers they share.

use actix_session::Session;
use actix_web::{HttpResponse, http::header, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};
use uuid::Uuid;

use crate::repository::CharacterReader;
use crate::services::main::execute_fetch;
use crate::services::viewers::{FetchOutcome, FetchTicket, ViewerId, ViewerRegistry};

pub mod api;
pub mod main;

/// Session key holding the viewer id.
pub const VIEWER_SESSION_KEY: &str = "viewer_id";

/// Maps a flash message level to the CSS modifier used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Flash messages as `(content, level)` pairs for the templates.
pub fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Returns the viewer id stored in the session, creating one on first use.
pub fn viewer_id(session: &Session) -> Result<ViewerId, actix_web::Error> {
    if let Some(id) = session.get::<Uuid>(VIEWER_SESSION_KEY)? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(VIEWER_SESSION_KEY, id)?;
    Ok(id)
}

/// Runs the fetch for `ticket` in the background.
pub fn spawn_fetch(
    repo: web::Data<dyn CharacterReader>,
    registry: web::Data<ViewerRegistry>,
    ticket: FetchTicket,
) {
    actix_web::rt::spawn(async move {
        let viewer = ticket.viewer;
        match execute_fetch(repo.get_ref(), registry.get_ref(), ticket).await {
            Ok(FetchOutcome::Applied) => log::debug!("Fetch applied for viewer {viewer}"),
            Ok(FetchOutcome::Superseded) => log::debug!("Fetch superseded for viewer {viewer}"),
            Err(err) => log::error!("Failed to store fetch result for viewer {viewer}: {err}"),
        }
    });
}
