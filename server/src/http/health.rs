//! Simple liveness probe

use actix_web::{get, web, HttpResponse, Responder};

use crate::game::SessionRegistry;

#[get("/healthz")]
pub async fn healthz(registry: web::Data<SessionRegistry>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "sessions": registry.len(),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz);
}
