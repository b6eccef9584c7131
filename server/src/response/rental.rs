use application::transfer::{CustomerSnapshotDto, MovieSnapshotDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
}

impl From<CustomerSnapshotDto> for CustomerResponse {
    fn from(CustomerSnapshotDto { id, name, phone }: CustomerSnapshotDto) -> Self {
        Self { id, name, phone }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    daily_rental_rate: Decimal,
}

impl From<MovieSnapshotDto> for MovieResponse {
    fn from(
        MovieSnapshotDto {
            id,
            title,
            daily_rental_rate,
        }: MovieSnapshotDto,
    ) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    customer: CustomerResponse,
    movie: MovieResponse,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<Decimal>,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer: value.customer.into(),
            movie: value.movie.into(),
            date_out: value.date_out,
            date_returned: value.date_returned,
            rental_fee: value.rental_fee,
        }
    }
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedRentalResponse(RentalResponse);

impl IntoResponse for CreatedRentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct RentalPresenter;

impl Exhaust<RentalDto> for RentalPresenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentalResponse::from(input)
    }
}

impl Exhaust<Option<RentalDto>> for RentalPresenter {
    type To = Option<RentalResponse>;
    fn emit(&self, input: Option<RentalDto>) -> Self::To {
        input.map(RentalResponse::from)
    }
}

impl Exhaust<Vec<RentalDto>> for RentalPresenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json(input.into_iter().map(RentalResponse::from).collect())
    }
}

pub struct CheckoutPresenter;

impl Exhaust<RentalDto> for CheckoutPresenter {
    type To = CreatedRentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        CreatedRentalResponse(RentalResponse::from(input))
    }
}
