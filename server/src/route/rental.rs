use application::service::{CheckoutRentalService, GetRentalService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Modules};
use crate::request::{CheckoutRequest, GetRentalRequest, RentalTransformer};
use crate::response::{CheckoutPresenter, RentalPresenter, RentalResponse};

pub trait RentalRouter {
    fn route_rentals(self) -> Self;
}

impl<M: Modules> RentalRouter for Router<AppModule<M>> {
    fn route_rentals(self) -> Self {
        self.route(
            "/rentals",
            get(|State(module): State<AppModule<M>>| async move {
                Controller::new((), RentalPresenter)
                    .bypass(|| async move { module.services().get_all_rentals().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<M>>,
                 _: Authenticated,
                 WithRejection(Json(req), _): WithRejection<
                    Json<CheckoutRequest>,
                    ErrorStatus,
                >| async move {
                    Controller::new(RentalTransformer, CheckoutPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.services().checkout_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule<M>>, Path(id): Path<String>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .try_intake(GetRentalRequest::new(id))?
                        .handle(|dto| async move { module.services().get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(RentalResponse::into_response).unwrap_or_else(|| {
                                (
                                    StatusCode::NOT_FOUND,
                                    "The rental with the given ID was not found.",
                                )
                                    .into_response()
                            })
                        })
                },
            ),
        )
    }
}
