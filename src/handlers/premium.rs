// src/handlers/premium.rs
use log::warn;
use warp::{Filter, Rejection};

use super::error::ApiError;
use crate::services::auth;

/// Gate a route on the identity provider's `premium` claim. Missing or
/// invalid tokens map to 401, non-subscribers to 403.
pub fn require_premium(secret: String) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and_then(move |header: Option<String>| {
            let secret = secret.clone();
            async move {
                let header = header.ok_or_else(|| {
                    warp::reject::custom(ApiError::unauthorized("Missing bearer token"))
                })?;
                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    warp::reject::custom(ApiError::unauthorized("Malformed authorization header"))
                })?;
                let claims = auth::decode_claims(token, &secret).map_err(|e| {
                    warn!("Rejected bearer token: {}", e);
                    warp::reject::custom(ApiError::unauthorized("Invalid bearer token"))
                })?;
                if !claims.premium {
                    return Err(warp::reject::custom(ApiError::forbidden(
                        "Subscription required",
                    )));
                }
                Ok(())
            }
        })
        .untuple_one()
}
