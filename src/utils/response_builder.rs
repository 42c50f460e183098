use actix_web::HttpResponse;
use serde_json::{json, Value};

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Standard `{"error","message"}` body
    #[must_use]
    pub fn error_json(error: &str, message: &str) -> Value {
        json!({
            "error": error,
            "message": message,
        })
    }

    /// 500 with a JSON error body
    #[must_use]
    pub fn server_error(error: &str, message: &str) -> HttpResponse {
        HttpResponse::InternalServerError().json(Self::error_json(error, message))
    }

    /// 200 or 500 carrying an already-built JSON body unchanged
    #[must_use]
    pub fn relay(success: bool, body: &Value) -> HttpResponse {
        if success {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::InternalServerError().json(body)
        }
    }
}
