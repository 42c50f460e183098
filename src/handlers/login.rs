use crate::login::LoginPassThrough;
use crate::models::LoginRequest;
use crate::utils::response_builder::ResponseBuilder;
use actix_web::{web, HttpResponse, Result};

/// Login handler: relays a username/password login to the new user pool
///
/// # Errors
/// Never fails on provider errors; those are relayed as a 500 response
pub async fn login(
    body: web::Json<LoginRequest>,
    pass_through: web::Data<LoginPassThrough>,
) -> Result<HttpResponse> {
    let outcome = pass_through.forward(&body).await;
    Ok(ResponseBuilder::relay(outcome.is_success(), &outcome.body))
}
