use std::sync::Arc;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use movievault_backend::api::{AuditApi, AuthApi, HealthApi, MoviesApi, ProfileApi, UsersApi};
use movievault_backend::app_data::AppData;
use movievault_backend::config::{self, Settings};
use movievault_backend::seed;
use movievault_backend::services::{
    IdentityService, MovieService, PrivilegedGuard, RoleReconciler, UserService,
};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Failed to load settings");

    let db = config::database::connect(&settings)
        .await
        .expect("Failed to connect to database");

    let app_data = Arc::new(AppData::init(db, &settings));

    seed::seed(&app_data, &settings)
        .await
        .expect("Failed to seed database");

    // Service layer wiring
    let guard = Arc::new(PrivilegedGuard::new(
        app_data.user_store.clone(),
        app_data.role_store.clone(),
    ));
    let role_reconciler = Arc::new(RoleReconciler::new(app_data.db.clone()));

    let identity_service = Arc::new(IdentityService::new(
        app_data.user_store.clone(),
        app_data.role_store.clone(),
        app_data.token_service.clone(),
        app_data.audit_recorder.clone(),
    ));
    let movie_service = Arc::new(MovieService::new(
        app_data.movie_store.clone(),
        app_data.audit_recorder.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        app_data.user_store.clone(),
        app_data.role_store.clone(),
        role_reconciler,
        app_data.audit_recorder.clone(),
    ));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(identity_service, app_data.token_service.clone()),
            MoviesApi::new(movie_service, guard.clone(), app_data.token_service.clone()),
            UsersApi::new(user_service, guard, app_data.token_service.clone()),
            AuditApi::new(app_data.audit_store.clone(), app_data.token_service.clone()),
            ProfileApi::new(app_data.user_store.clone(), app_data.token_service.clone()),
        ),
        "MovieVault API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger", settings.bind_addr);

    Server::new(TcpListener::bind(settings.bind_addr.clone()))
        .run(app)
        .await
}
