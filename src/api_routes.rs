// api_routes.rs
use std::sync::Mutex;

use actix_web::{web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::input_process::{process_user_input, validate_message};
use crate::response_table::ResponseTable;
use crate::responses::SUGGESTIONS;
use crate::session_manager::SessionManager;

#[derive(Deserialize)]
struct InteractRequest {
    message: String,
    session_id: Option<Uuid>,
}

#[derive(Serialize)]
struct InteractResponse {
    session_id: Uuid,
    reply: String,
}

#[derive(Deserialize)]
struct ResetRequest {
    session_id: Uuid,
}

// Set API Routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/interact", web::post().to(interact_route))
            .route("/suggestions", web::get().to(suggestions_route))
            .route("/reset", web::post().to(reset_route))
            .route("/session/{session_id}", web::get().to(session_route)),
    );
}

/// One chat turn: record the message, think, reply. Replies travel as JSON
/// string values and must be inserted into the page as text, never as markup.
async fn interact_route(
    interact_req: web::Json<InteractRequest>,
    table: web::Data<ResponseTable>,
    session_manager: web::Data<Mutex<SessionManager>>,
) -> HttpResponse {
    let Some(message) = validate_message(&interact_req.message) else {
        return HttpResponse::BadRequest().body("message must not be empty");
    };

    let session_id = {
        let mut manager = session_manager.lock().expect("session lock poisoned");
        match interact_req.session_id {
            Some(id) if manager.contains(&id) => id,
            _ => {
                let id = manager.create_session();
                info!("Created session {}", id);
                id
            }
        }
    };

    let reply =
        process_user_input(message, table.get_ref(), session_manager.get_ref(), session_id).await;
    HttpResponse::Ok().json(InteractResponse { session_id, reply })
}

/// Prompt chips the widget renders under the input box.
async fn suggestions_route() -> HttpResponse {
    HttpResponse::Ok().json(&*SUGGESTIONS)
}

/// Restore a transcript to just the greeting, like the widget's reset button.
async fn reset_route(
    reset_req: web::Json<ResetRequest>,
    session_manager: web::Data<Mutex<SessionManager>>,
) -> HttpResponse {
    let mut manager = session_manager.lock().expect("session lock poisoned");
    if manager.reset_session(&reset_req.session_id) {
        info!("Reset session {}", reset_req.session_id);
        let transcript = manager
            .transcript(&reset_req.session_id)
            .map(|t| t.to_vec())
            .unwrap_or_default();
        HttpResponse::Ok().json(transcript)
    } else {
        HttpResponse::NotFound().body("unknown session")
    }
}

async fn session_route(
    path: web::Path<Uuid>,
    session_manager: web::Data<Mutex<SessionManager>>,
) -> HttpResponse {
    let session_id = path.into_inner();
    let manager = session_manager.lock().expect("session lock poisoned");
    match manager.transcript(&session_id) {
        Some(transcript) => HttpResponse::Ok().json(transcript),
        None => HttpResponse::NotFound().body("unknown session"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{builtin_table, GREETING};
    use crate::selector::select_response;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(builtin_table().unwrap()))
                    .app_data(web::Data::new(Mutex::new(SessionManager::new())))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_interact_rejects_empty_message() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/interact")
            .set_json(serde_json::json!({ "message": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_interact_replies_and_keeps_transcript() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/interact")
            .set_json(serde_json::json!({ "message": "hello" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let table = builtin_table().unwrap();
        assert_eq!(body["reply"].as_str(), Some(select_response(&table, "hello")));

        let session_id = body["session_id"].as_str().unwrap().to_string();
        let req = test::TestRequest::get()
            .uri(&format!("/api/session/{}", session_id))
            .to_request();
        let transcript: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let messages = transcript.as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["content"].as_str(), Some(GREETING));
        assert_eq!(messages[1]["role"].as_str(), Some("user"));
        assert_eq!(messages[2]["role"].as_str(), Some("assistant"));
    }

    #[actix_web::test]
    async fn test_suggestions_are_served() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/suggestions").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let chips = body.as_array().unwrap();
        assert!(!chips.is_empty());
    }

    #[actix_web::test]
    async fn test_reset_unknown_session_is_404() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/reset")
            .set_json(serde_json::json!({ "session_id": Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unknown_session_transcript_is_404() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri(&format!("/api/session/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
