//! Public contact form.
//!
//! ```text
//! POST /api/v1/contact {"name":..,"email":..,"subject":..,"message":..}
//! ```

use actix_web::{HttpResponse, post, web};
use serde_json::json;

use crate::domain::ContactInquiry;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Accept an inquiry. No session is required.
#[post("/contact")]
pub async fn submit_inquiry(
    state: web::Data<HttpState>,
    payload: web::Json<ContactInquiry>,
) -> ApiResult<HttpResponse> {
    let intent = state.contact.submit(payload.into_inner())?;
    state.notify(&intent);
    Ok(HttpResponse::Accepted().json(json!({ "notification": intent })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::TestContext;

    #[actix_web::test]
    async fn accepted_inquiries_are_dispatched() {
        let ctx = TestContext::new().await;
        let app = test::init_service(
            App::new()
                .app_data(ctx.state())
                .service(web::scope("/api/v1").service(submit_inquiry)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(json!({
                    "name": "Alice",
                    "email": "alice@x.com",
                    "subject": "Pickup point",
                    "message": "Where do I meet the driver?",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::ACCEPTED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["notification"]["kind"], "contact-received");
        assert_eq!(ctx.dispatched_kinds(), vec!["contact-received".to_owned()]);
    }

    #[actix_web::test]
    async fn incomplete_inquiries_are_rejected() {
        let ctx = TestContext::new().await;
        let app = test::init_service(
            App::new()
                .app_data(ctx.state())
                .service(web::scope("/api/v1").service(submit_inquiry)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(json!({ "name": "Alice", "email": "alice@x.com" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(ctx.dispatched_kinds().is_empty());
    }
}
