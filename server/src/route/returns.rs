use application::service::ReturnRentalService;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Modules};
use crate::request::{RentalTransformer, ReturnRequest};
use crate::response::RentalPresenter;

pub trait ReturnRouter {
    fn route_returns(self) -> Self;
}

impl<M: Modules> ReturnRouter for Router<AppModule<M>> {
    fn route_returns(self) -> Self {
        self.route(
            "/returns",
            post(
                |State(module): State<AppModule<M>>,
                 _: Authenticated,
                 WithRejection(Json(req), _): WithRejection<
                    Json<ReturnRequest>,
                    ErrorStatus,
                >| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.services().return_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::testing::{request, TestApp};

    async fn post_return(
        app: &TestApp,
        token: Option<&str>,
        payload: Value,
    ) -> (StatusCode, Value) {
        app.send(request(Method::POST, "/api/returns", token, Some(payload)))
            .await
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        app.rent_since(OffsetDateTime::now_utc()).await;

        let (status, _) = post_return(&app, None, app.payload()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post_return(&app, Some(""), app.payload()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.stock().await, 1);
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        app.rent_since(OffsetDateTime::now_utc()).await;

        let (status, _) = post_return(&app, Some("a"), app.payload()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_is_checked_before_body() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;

        let (status, _) = post_return(&app, None, json!({ "movieId": "" })).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_ids_are_bad_request() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        let token = app.token();

        let payload = json!({ "movieId": app.movie_id() });
        let (status, _) = post_return(&app, Some(&token), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let payload = json!({ "customerId": app.customer_id(), "movieId": "" });
        let (status, _) = post_return(&app, Some(&token), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let payload = json!({ "customerId": 1, "movieId": app.movie_id() });
        let (status, _) = post_return(&app, Some(&token), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn no_rental_is_not_found() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        app.rent_since(OffsetDateTime::now_utc()).await;

        let payload = json!({ "customerId": Uuid::new_v4(), "movieId": app.movie_id() });
        let (status, _) = post_return(&app, Some(&app.token()), payload).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn processed_rental_is_bad_request() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        app.rent_since(OffsetDateTime::now_utc() - Duration::days(1))
            .await;
        let token = app.token();

        let (status, first) = post_return(&app, Some(&token), app.payload()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_return(&app, Some(&token), app.payload()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/rentals/{}", first["id"].as_str().unwrap());
        let (_, stored) = app.send(request(Method::GET, &uri, None, None)).await;
        assert_eq!(stored["rentalFee"], first["rentalFee"]);
        assert_eq!(stored["dateReturned"], first["dateReturned"]);
        assert_eq!(app.stock().await, 2);
    }

    #[tokio::test]
    async fn rental_returned_earlier_is_left_untouched() {
        let now = OffsetDateTime::now_utc();
        let app = TestApp::new(now).await;
        let returned_at = now - Duration::days(1);
        let closed = app
            .rent_since(now - Duration::days(4))
            .await
            .close(returned_at)
            .unwrap();
        app.save(&closed).await;

        let (status, _) = post_return(&app, Some(&app.token()), app.payload()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/rentals/{}", closed.id().as_ref());
        let (_, stored) = app.send(request(Method::GET, &uri, None, None)).await;
        let date_returned = OffsetDateTime::parse(
            stored["dateReturned"].as_str().unwrap(),
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        assert_eq!(date_returned, returned_at);
        assert_eq!(stored["rentalFee"].as_f64(), Some(6.0));
        assert_eq!(app.stock().await, 1);
    }

    #[tokio::test]
    async fn week_old_rental_returned_seconds_later_costs_fourteen() {
        let now = OffsetDateTime::now_utc();
        let app = TestApp::new(now + Duration::seconds(2)).await;
        app.rent_since(now - Duration::days(7)).await;

        let (status, body) = post_return(&app, Some(&app.token()), app.payload()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rentalFee"].as_f64(), Some(14.0));
    }

    #[tokio::test]
    async fn valid_return_closes_rental() {
        let now = OffsetDateTime::now_utc();
        let app = TestApp::new(now).await;
        app.rent_since(now - Duration::days(7)).await;

        let (status, body) = post_return(&app, Some(&app.token()), app.payload()).await;

        assert_eq!(status, StatusCode::OK);
        let date_returned = OffsetDateTime::parse(
            body["dateReturned"].as_str().unwrap(),
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        assert!(OffsetDateTime::now_utc() - date_returned < Duration::seconds(10));
        assert_eq!(body["rentalFee"].as_f64(), Some(14.0));
        assert_eq!(app.stock().await, 2);

        let keys = ["dateOut", "dateReturned", "rentalFee", "customer", "movie"];
        for key in keys {
            assert!(body.get(key).is_some(), "missing {key} in {body}");
        }
        assert_eq!(body["customer"]["id"], json!(app.customer_id()));
        assert_eq!(body["movie"]["id"], json!(app.movie_id()));
    }

    #[tokio::test]
    async fn bearer_header_is_accepted() {
        let app = TestApp::new(OffsetDateTime::now_utc()).await;
        app.rent_since(OffsetDateTime::now_utc()).await;

        let mut req = request(Method::POST, "/api/returns", None, Some(app.payload()));
        let bearer = format!("Bearer {}", app.token());
        req.headers_mut()
            .insert("authorization", bearer.parse().unwrap());
        let (status, body) = app.send(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rentalFee"].as_f64(), Some(2.0));
    }
}
