use application::transfer::{CheckoutRentalDto, GetRentalDto, ReturnRentalDto};
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::TryIntake;

// Ids stay strings here so that empty and malformed values are reported the
// same way as missing ones.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    customer_id: Option<String>,
    movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    customer_id: Option<String>,
    movie_id: Option<String>,
}

#[derive(Debug)]
pub struct GetRentalRequest {
    id: String,
}

impl GetRentalRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

fn parse_id(field: &str, value: Option<String>) -> error_stack::Result<Uuid, KernelError> {
    let value = value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Report::new(KernelError::Validation).attach_printable(format!("{field} is required"))
        })?;
    Uuid::parse_str(value)
        .change_context_lazy(|| KernelError::Validation)
        .attach_printable_lazy(|| format!("{field} is not a valid id: {value}"))
}

pub struct Transformer;

impl TryIntake<ReturnRequest> for Transformer {
    type To = ReturnRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: ReturnRequest) -> Result<Self::To, Self::Error> {
        Ok(ReturnRentalDto {
            customer_id: parse_id("customerId", input.customer_id)?,
            movie_id: parse_id("movieId", input.movie_id)?,
        })
    }
}

impl TryIntake<CheckoutRequest> for Transformer {
    type To = CheckoutRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CheckoutRequest) -> Result<Self::To, Self::Error> {
        Ok(CheckoutRentalDto {
            customer_id: parse_id("customerId", input.customer_id)?,
            movie_id: parse_id("movieId", input.movie_id)?,
        })
    }
}

impl TryIntake<GetRentalRequest> for Transformer {
    type To = GetRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetRentalRequest) -> Result<Self::To, Self::Error> {
        Ok(GetRentalDto {
            id: parse_id("id", Some(input.id))?,
        })
    }
}
