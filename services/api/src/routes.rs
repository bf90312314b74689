//! HTTP routes
//!
//! ```text
//! GET    /                                  service status
//! GET    /health                            "OK"
//! GET    /users?limit&offset                POST /users
//! GET    /users/:id                         PUT  /users/:id    DELETE /users/:id
//! GET    /users/filter/admins               GET  /users/filter/blacklisted
//! GET    /users/userAndProfile/:id
//! GET    /profiles?limit&offset             POST /profiles
//! GET    /profiles/:id                      PUT  /profiles/:id DELETE /profiles/:id
//! GET    /profiles/username/:username
//! GET    /enemies                           POST /enemies
//! GET    /enemies/:id                       PUT  /enemies/:id  DELETE /enemies/:id
//! ```

use std::collections::HashMap;
use std::convert::Infallible;

use bestiary_types::FieldSet;
use bestiary_validation::validate_limit_offset;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::error::{ApiError, ErrorBody, Result};
use crate::state::AppState;
use crate::{enemies, profiles, users};

const MAX_BODY_BYTES: u64 = 64 * 1024;

type Query = HashMap<String, String>;

/// `{message}` acknowledgement, with the new id on creation
#[derive(Debug, Serialize)]
struct Ack {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
}

/// Every route, with rejections rendered as JSON
pub fn routes(state: AppState) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    home()
        .or(user_routes(state.clone()))
        .unify()
        .or(profile_routes(state.clone()))
        .unify()
        .or(enemy_routes(state))
        .unify()
        .recover(handle_rejection)
        .unify()
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body() -> impl Filter<Extract = (Value,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn home() -> BoxedFilter<(Response,)> {
    let status = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "running",
            "service": "bestiary-api",
            "version": env!("CARGO_PKG_VERSION")
        }))
        .into_response()
    });

    let health = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK).into_response());

    status.or(health).unify().boxed()
}

fn user_routes(state: AppState) -> BoxedFilter<(Response,)> {
    let list = warp::path!("users")
        .and(warp::get())
        .and(warp::query::<Query>())
        .and(with_state(state.clone()))
        .map(|query: Query, state: AppState| {
            render(page(&query).map(|p| users::list_users(&state, p)), StatusCode::OK)
        });

    let admins = warp::path!("users" / "filter" / "admins")
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: AppState| json(&users::list_admins(&state), StatusCode::OK));

    let blacklisted = warp::path!("users" / "filter" / "blacklisted")
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: AppState| json(&users::list_blacklisted(&state), StatusCode::OK));

    let with_profile = warp::path!("users" / "userAndProfile" / u64)
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|id, state: AppState| render(users::user_with_profile(&state, id), StatusCode::OK));

    let get = warp::path!("users" / u64)
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|id, state: AppState| render(users::get_user(&state, id), StatusCode::OK));

    let create = warp::path!("users")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|fields| users::create_user(&state, fields));
            acknowledge(result.map(|u| Some(u.id)), "User created", StatusCode::CREATED)
        });

    let update = warp::path!("users" / u64)
        .and(warp::put())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|id, body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|patch| users::update_user(&state, id, patch));
            acknowledge(result.map(|_| None), "User updated", StatusCode::OK)
        });

    let delete = warp::path!("users" / u64)
        .and(warp::delete())
        .and(with_state(state))
        .map(|id, state: AppState| {
            acknowledge(
                users::delete_user(&state, id).map(|_| None),
                "User deleted",
                StatusCode::OK,
            )
        });

    list.or(admins)
        .unify()
        .or(blacklisted)
        .unify()
        .or(with_profile)
        .unify()
        .or(get)
        .unify()
        .or(create)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

fn profile_routes(state: AppState) -> BoxedFilter<(Response,)> {
    let list = warp::path!("profiles")
        .and(warp::get())
        .and(warp::query::<Query>())
        .and(with_state(state.clone()))
        .map(|query: Query, state: AppState| {
            render(
                page(&query).map(|p| profiles::list_profiles(&state, p)),
                StatusCode::OK,
            )
        });

    let by_username = warp::path!("profiles" / "username" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|username: String, state: AppState| {
            let username = decode_segment(&username);
            render(
                profiles::get_profile_by_username(&state, &username),
                StatusCode::OK,
            )
        });

    let get = warp::path!("profiles" / u64)
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|id, state: AppState| render(profiles::get_profile(&state, id), StatusCode::OK));

    let create = warp::path!("profiles")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|fields| profiles::create_profile(&state, fields));
            acknowledge(result.map(|p| Some(p.id)), "Profile created", StatusCode::CREATED)
        });

    let update = warp::path!("profiles" / u64)
        .and(warp::put())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|id, body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|patch| profiles::update_profile(&state, id, patch));
            acknowledge(result.map(|_| None), "Profile updated", StatusCode::OK)
        });

    let delete = warp::path!("profiles" / u64)
        .and(warp::delete())
        .and(with_state(state))
        .map(|id, state: AppState| {
            acknowledge(
                profiles::delete_profile(&state, id).map(|_| None),
                "Profile deleted",
                StatusCode::OK,
            )
        });

    list.or(by_username)
        .unify()
        .or(get)
        .unify()
        .or(create)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

fn enemy_routes(state: AppState) -> BoxedFilter<(Response,)> {
    let list = warp::path!("enemies")
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: AppState| json(&enemies::list_enemies(&state), StatusCode::OK));

    let get = warp::path!("enemies" / u64)
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|id, state: AppState| render(enemies::get_enemy(&state, id), StatusCode::OK));

    let create = warp::path!("enemies")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|fields| enemies::create_enemy(&state, fields));
            acknowledge(
                result.map(|e| Some(e.id)),
                "Enemy created successfully",
                StatusCode::CREATED,
            )
        });

    let update = warp::path!("enemies" / u64)
        .and(warp::put())
        .and(json_body())
        .and(with_state(state.clone()))
        .map(|id, body: Value, state: AppState| {
            let result = FieldSet::from_value(body)
                .map_err(ApiError::from)
                .and_then(|patch| enemies::update_enemy(&state, id, patch));
            acknowledge(result.map(|_| None), "Enemy updated", StatusCode::OK)
        });

    let delete = warp::path!("enemies" / u64)
        .and(warp::delete())
        .and(with_state(state))
        .map(|id, state: AppState| {
            acknowledge(
                enemies::delete_enemy(&state, id).map(|_| None),
                "Enemy deleted",
                StatusCode::OK,
            )
        });

    list.or(get)
        .unify()
        .or(create)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

fn page(query: &Query) -> Result<bestiary_validation::Pagination> {
    Ok(validate_limit_offset(
        query.get("limit").map(String::as_str),
        query.get("offset").map(String::as_str),
    )?)
}

fn json<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

fn render<T: Serialize>(result: Result<T>, status: StatusCode) -> Response {
    match result {
        Ok(value) => json(&value, status),
        Err(err) => failure(err),
    }
}

fn acknowledge(result: Result<Option<u64>>, message: &'static str, status: StatusCode) -> Response {
    match result {
        Ok(id) => json(&Ack { message, id }, status),
        Err(err) => failure(err),
    }
}

fn failure(err: ApiError) -> Response {
    if err.status().is_server_error() {
        error!("request failed: {}", err);
    }
    err.into_response()
}

/// Path segments arrive percent-encoded
fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Renders warp's own rejections (unknown path, bad JSON, wrong method) as JSON
async fn handle_rejection(err: Rejection) -> std::result::Result<Response, Infallible> {
    let (status, message, code) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found", "not_found")
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (
            StatusCode::BAD_REQUEST,
            "Request body must be valid JSON",
            "invalid_body",
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
            "payload_too_large",
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content-Length header is required",
            "length_required",
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Request body must be JSON",
            "unsupported_media_type",
        )
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            "Limit and offset must be valid integers",
            "wrong_type",
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            "method_not_allowed",
        )
    } else {
        warn!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "internal",
        )
    };

    Ok(json(&ErrorBody { message, code }, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("ada"), "ada");
        assert_eq!(decode_segment("the%20countess"), "the countess");
        assert_eq!(decode_segment("100%"), "100%");
        assert_eq!(decode_segment("%zz"), "%zz");
        assert_eq!(decode_segment("ada%21"), "ada!");
        assert_eq!(decode_segment("Ren%C3%A9e"), "Renée");
    }
}
