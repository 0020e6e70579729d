use crate::{game::GameError, http};
use actix_web::{error, web, HttpRequest};

fn invalid_argument(err: impl std::fmt::Display, _req: &HttpRequest) -> error::Error {
    GameError::InvalidArgument(err.to_string()).into()
}

/// Mount every HTTP sub-module under `/api`.
///
/// Extractor failures (bad ids in the path, query or body) are reported with
/// the same `{"kind","error"}` body as engine errors.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::PathConfig::default().error_handler(invalid_argument))
            .app_data(web::QueryConfig::default().error_handler(invalid_argument))
            .app_data(web::JsonConfig::default().error_handler(invalid_argument))
            .configure(http::games::init_routes)
            .configure(http::health::init_routes),
    );
}
