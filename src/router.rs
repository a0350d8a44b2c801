use axum::http::Method;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::departments::router::init_departments_router;
use crate::modules::lecturers::router::init_lecturers_router;
use crate::modules::lessons::router::{init_lesson_parts_router, init_lessons_router};
use crate::modules::marks::router::init_marks_router;
use crate::modules::materials::router::init_materials_router;
use crate::modules::news::router::init_news_router;
use crate::modules::notifications::router::init_notifications_router;
use crate::modules::settings::router::init_settings_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/users", init_users_router(state.clone()))
                .nest("/departments", init_departments_router(state.clone()))
                .nest("/subjects", init_subjects_router(state.clone()))
                .nest("/lessons", init_lessons_router(state.clone()))
                .nest("/lesson-parts", init_lesson_parts_router(state.clone()))
                .nest("/materials", init_materials_router(state.clone()))
                .nest("/marks", init_marks_router(state.clone()))
                .nest("/news", init_news_router(state.clone()))
                .nest("/notifications", init_notifications_router(state.clone()))
                .nest("/settings", init_settings_router(state.clone()))
                .nest("/students", init_students_router(state.clone()))
                .nest("/lecturers", init_lecturers_router()),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(logging_middleware))
}
