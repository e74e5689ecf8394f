//! Member handlers: login, logout, registration and profile.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use utoipa;

use super::AppState;
use crate::member::{LoginOutcome, MemberService};
use crate::web::dto::{
    ApiResponse, JoinForm, LoginForm, LoginResponse, LogoutResponse, MemberInfo, OverlapIdQuery,
    OverlapIdResponse, PassCheckQuery, PassCheckResponse, ValidatedForm,
};
use crate::web::error::ApiError;
use crate::web::middleware::SessionMember;

fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/members/login - Log in and start a session.
#[utoipa::path(
    post,
    path = "/api/members/login",
    tag = "members",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No member with that id")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let outcome = MemberService::new(&state.db)
        .login(&form.user_id, &form.pass)
        .await?;

    let member = match outcome {
        LoginOutcome::Success(member) => member,
        LoginOutcome::NotFound => return Err(ApiError::not_found("No member with that id")),
        LoginOutcome::BadPassword => return Err(ApiError::unauthorized("Wrong password")),
    };

    let session = {
        let mut sessions = state.sessions.write().await;
        // Opportunistic sweep of stale sessions on each login
        sessions.cleanup();
        sessions.create(member.clone())
    };

    let jar = jar.add(session_cookie(&state.session_cookie_name, session.token));
    Ok((jar, Json(ApiResponse::new(LoginResponse::new(member)))))
}

/// POST /api/members/logout - End the current session.
#[utoipa::path(
    post,
    path = "/api/members/logout",
    tag = "members",
    responses(
        (status = 200, description = "Session ended, cookie cleared", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<LogoutResponse>>) {
    let token = jar
        .get(&state.session_cookie_name)
        .map(|cookie| cookie.value().to_string());

    let logged_out = match token {
        Some(token) => state.sessions.write().await.logout(&token),
        None => false,
    };

    let jar = jar.remove(Cookie::build((state.session_cookie_name.clone(), "")).path("/"));
    (jar, Json(ApiResponse::new(LogoutResponse { logged_out })))
}

/// POST /api/members - Register a new member.
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "members",
    request_body(content = JoinForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Member registered", body = MemberInfo),
        (status = 409, description = "Member id already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn join(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<JoinForm>,
) -> Result<(StatusCode, Json<ApiResponse<MemberInfo>>), ApiError> {
    let member = MemberService::new(&state.db)
        .add_member(&form.into_member_form())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(member.into()))))
}

/// GET /api/members/overlap-id-check - Check whether a member id is taken.
#[utoipa::path(
    get,
    path = "/api/members/overlap-id-check",
    tag = "members",
    params(OverlapIdQuery),
    responses(
        (status = 200, description = "Check result", body = OverlapIdResponse)
    )
)]
pub async fn overlap_id_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverlapIdQuery>,
) -> Result<Json<ApiResponse<OverlapIdResponse>>, ApiError> {
    let overlap = MemberService::new(&state.db)
        .overlap_id_check(&query.id)
        .await?;

    Ok(Json(ApiResponse::new(OverlapIdResponse {
        id: query.id,
        overlap,
    })))
}

/// GET /api/members/pass-check - Verify a member's current password.
#[utoipa::path(
    get,
    path = "/api/members/pass-check",
    tag = "members",
    params(PassCheckQuery),
    responses(
        (status = 200, description = "Check result", body = PassCheckResponse)
    )
)]
pub async fn pass_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PassCheckQuery>,
) -> Result<Json<ApiResponse<PassCheckResponse>>, ApiError> {
    let result = MemberService::new(&state.db)
        .member_pass_check(&query.id, &query.pass)
        .await?;

    Ok(Json(ApiResponse::new(PassCheckResponse { result })))
}

/// GET /api/members/me - Get the logged-in member.
#[utoipa::path(
    get,
    path = "/api/members/me",
    tag = "members",
    responses(
        (status = 200, description = "Session member", body = MemberInfo),
        (status = 401, description = "Login required")
    )
)]
pub async fn me(session: SessionMember) -> Json<ApiResponse<MemberInfo>> {
    Json(ApiResponse::new(session.member.into()))
}

/// PUT /api/members/me - Update the logged-in member's profile.
///
/// The password is re-hashed on every update and the session snapshot is
/// refreshed.
#[utoipa::path(
    put,
    path = "/api/members/me",
    tag = "members",
    request_body(content = JoinForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated member", body = MemberInfo),
        (status = 401, description = "Login required"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    session: SessionMember,
    ValidatedForm(form): ValidatedForm<JoinForm>,
) -> Result<Json<ApiResponse<MemberInfo>>, ApiError> {
    let mut form = form.into_member_form();
    form.id = session.member.id.clone();

    let member = MemberService::new(&state.db)
        .update_member(&session.member.id, &form)
        .await?;

    let refreshed = state.sessions.write().await.refresh_member(&member);
    tracing::debug!(member_id = %member.id, sessions = refreshed, "Session snapshot refreshed");

    Ok(Json(ApiResponse::new(member.into())))
}
