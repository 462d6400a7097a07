use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::utils::jwt::{self, ADMIN_ROLE};

/// A request that carried a valid admin token.
///
/// Taking this as a handler argument gates the handler: extraction fails with
/// 401 for a missing or invalid token and 403 for a non-admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub user_id: Uuid,
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req).map_err(Into::into))
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalServerError("Application state missing".to_string()))?;

    let token = req.headers().get("Authorization")
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.split_whitespace().nth(1))
        .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

    let claims = jwt::validate_token(token, &state.jwt_secret)
        .map_err(|err| AppError::Unauthorized(err.to_string()))?;

    if claims.role != ADMIN_ROLE {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    Ok(AdminUser { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};

    use crate::test_support::{TestContext, TEST_SECRET};

    async fn whoami(admin: AdminUser) -> HttpResponse {
        HttpResponse::Ok().body(admin.user_id.to_string())
    }

    async fn status_for(ctx: &TestContext, authorization: Option<String>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(ctx.state.clone())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn admin_token_yields_the_user_id() {
        let ctx = TestContext::new();
        let (status, body) = status_for(&ctx, Some(ctx.admin_bearer())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ctx.admin_id.to_string());
    }

    #[actix_web::test]
    async fn missing_or_invalid_token_is_unauthorized() {
        let ctx = TestContext::new();

        assert_eq!(status_for(&ctx, None).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&ctx, Some("Bearer garbage".into())).await.0, StatusCode::UNAUTHORIZED);

        let foreign = jwt::generate_token(&ctx.admin_id.to_string(), ADMIN_ROLE, "someone-else");
        assert_eq!(status_for(&ctx, Some(format!("Bearer {}", foreign))).await.0, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_admin_role_is_forbidden() {
        let ctx = TestContext::new();
        let token = jwt::generate_token(&ctx.admin_id.to_string(), "user", TEST_SECRET);

        let (status, _) = status_for(&ctx, Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn non_uuid_subject_is_unauthorized() {
        let ctx = TestContext::new();
        let token = jwt::generate_token("not-a-uuid", ADMIN_ROLE, TEST_SECRET);

        let (status, _) = status_for(&ctx, Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
