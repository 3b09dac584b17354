//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Days;
use mockable::Clock;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use crate::domain::ports::{ACCOUNTS_KEY, NotificationDispatcher, SnapshotStore};
use crate::domain::{
    Account, AccountDirectory, BookingLedger, ContactDesk, DATE_FORMAT, NotificationIntent,
    PricingRule, Registration, Role,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure_api, json_config};
use crate::test_support::{MutableClock, ToggleStore};

pub const DRIVER_EMAIL: &str = "driver@x.com";
pub const DRIVER_PASSWORD: &str = "driver123";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

#[derive(Default)]
pub struct RecordingDispatcher(Mutex<Vec<NotificationIntent>>);

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, intent: &NotificationIntent) {
        match self.0.lock() {
            Ok(mut intents) => intents.push(intent.clone()),
            Err(_) => panic!("dispatcher mutex"),
        }
    }
}

/// Services wired over an in-memory store and a fixed clock.
pub struct TestContext {
    pub clock: Arc<MutableClock>,
    dispatcher: Arc<RecordingDispatcher>,
    state: web::Data<HttpState>,
}

impl TestContext {
    /// Fresh context holding only the bootstrap administrator.
    pub async fn new() -> Self {
        Self::build(ToggleStore::default()).await
    }

    /// Context whose directory also holds an approved driver.
    pub async fn with_driver() -> Self {
        let clock = MutableClock::default();
        let driver = Account::provisioned(
            Registration {
                name: "Dana Driver".to_owned(),
                email: DRIVER_EMAIL.to_owned(),
                password: Zeroizing::new(DRIVER_PASSWORD.to_owned()),
                organization: "Airport Joint Mobility".to_owned(),
                phone: None,
            },
            Role::Driver,
            clock.utc(),
        );
        let accounts = vec![Account::bootstrap_admin(clock.utc()), driver];
        let store = ToggleStore::default();
        store.seed(
            ACCOUNTS_KEY,
            &serde_json::to_string(&accounts).expect("encode accounts"),
        );
        Self::build(store).await
    }

    async fn build(store: ToggleStore) -> Self {
        let store: Arc<dyn SnapshotStore> = Arc::new(store);
        let clock = Arc::new(MutableClock::default());
        let accounts = AccountDirectory::bootstrap(store.clone(), clock.clone())
            .await
            .expect("directory bootstraps");
        let bookings = BookingLedger::load(store, clock.clone(), PricingRule::default())
            .await
            .expect("ledger loads");
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let state = HttpState::new(
            Arc::new(accounts),
            Arc::new(bookings),
            ContactDesk,
            dispatcher.clone(),
        );
        Self {
            clock,
            dispatcher,
            state: web::Data::new(state),
        }
    }

    pub fn state(&self) -> web::Data<HttpState> {
        self.state.clone()
    }

    /// Kinds of every intent dispatched so far, oldest first.
    pub fn dispatched_kinds(&self) -> Vec<String> {
        match self.dispatcher.0.lock() {
            Ok(intents) => intents
                .iter()
                .map(|intent| intent.kind().as_str().to_owned())
                .collect(),
            Err(_) => panic!("dispatcher mutex"),
        }
    }

    /// Initialise the full `/api/v1` surface over this context.
    pub async fn api(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(self.state())
                .app_data(json_config())
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    }

    /// Booking payload `days` calendar days after the clock's local date.
    pub fn booking_body(&self, days: u64, time: &str) -> Value {
        let date = self
            .clock
            .local()
            .date_naive()
            .checked_add_days(Days::new(days))
            .expect("date in range");
        json!({
            "date": date.format(DATE_FORMAT).to_string(),
            "time": time,
            "movementType": "to-airport",
            "address": "1 Main St",
            "passengers": 1,
            "luggage": 1,
            "carpoolOpen": true,
        })
    }
}

/// Sign in through the API and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login for {email} should succeed");
    session_cookie(&res)
}

/// Register and approve a rider, returning the session cookie.
pub async fn approved_rider<S, B>(app: &S, admin: &Cookie<'static>, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({
                "name": email,
                "email": email,
                "password": "pw",
                "organization": "Acme",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    let id = body["data"]["id"].as_str().expect("account id").to_owned();

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{id}/approve"))
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    login(app, email, "pw").await
}
