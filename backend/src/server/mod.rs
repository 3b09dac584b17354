//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use shuttle_pool::Trace;
use shuttle_pool::domain::ports::SnapshotStore;
use shuttle_pool::domain::{AccountDirectory, BookingLedger, ContactDesk, PricingRule};
use shuttle_pool::inbound::http::health::{HealthState, live, ready};
use shuttle_pool::inbound::http::session_config::{SessionSettings, session_middleware};
use shuttle_pool::inbound::http::state::HttpState;
use shuttle_pool::inbound::http::{configure_api, json_config};
use shuttle_pool::outbound::notification::TracingNotificationDispatcher;
use shuttle_pool::outbound::storage::FileSnapshotStore;

/// Load both collections from `store` and bundle the services.
///
/// # Errors
/// Returns [`io::Error`] when the stored documents cannot be read or the
/// bootstrap administrator cannot be persisted.
async fn build_http_state(
    store: Arc<dyn SnapshotStore>,
    pricing: PricingRule,
) -> io::Result<HttpState> {
    let clock = Arc::new(DefaultClock);
    let accounts = AccountDirectory::bootstrap(store.clone(), clock.clone())
        .await
        .map_err(|err| io::Error::other(format!("account directory unavailable: {err}")))?;
    let bookings = BookingLedger::load(store, clock, pricing)
        .await
        .map_err(|err| io::Error::other(format!("booking ledger unavailable: {err}")))?;
    Ok(HttpState::new(
        Arc::new(accounts),
        Arc::new(bookings),
        ContactDesk,
        Arc::new(TracingNotificationDispatcher::new()),
    ))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session_middleware(&session))
        .configure(configure_api);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server over the file-backed store.
///
/// Signal handling is left to the caller so it can flip the health state to
/// draining before stopping the server.
///
/// # Errors
/// Propagates [`io::Error`] when the data directory cannot be opened, the
/// stored documents cannot be loaded, or binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        data_dir,
        pricing,
    } = config;

    let store = FileSnapshotStore::open(&data_dir)?;
    info!(data_dir = %store.root().display(), "opened snapshot store");
    let http_state = web::Data::new(build_http_state(Arc::new(store), pricing).await?);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;
    use shuttle_pool::domain::{BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_PASSWORD};
    use shuttle_pool::outbound::storage::InMemorySnapshotStore;

    use super::*;

    async fn deps() -> AppDependencies {
        let http_state = build_http_state(
            Arc::new(InMemorySnapshotStore::new()),
            PricingRule::default(),
        )
        .await
        .expect("state builds");
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(http_state),
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
            },
        }
    }

    #[actix_web::test]
    async fn liveness_endpoint_is_mounted() {
        let app = test::init_service(build_app(deps().await)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn bootstrap_admin_can_log_in() {
        let app = test::init_service(build_app(deps().await)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({
                    "email": BOOTSTRAP_ADMIN_EMAIL,
                    "password": BOOTSTRAP_ADMIN_PASSWORD,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
    }

    #[tokio::test]
    async fn unreadable_documents_fail_startup() {
        let store = InMemorySnapshotStore::new();
        store
            .set("ajm-users", "not json")
            .await
            .expect("seed corrupt document");
        let result = build_http_state(Arc::new(store), PricingRule::default()).await;
        assert!(result.is_err());
    }
}
