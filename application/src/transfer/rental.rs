use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    CustomerSnapshot, DestructCustomerSnapshot, DestructMovieSnapshot, DestructRental,
    DestructReturned, MovieSnapshot, Rental,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSnapshotDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

impl From<CustomerSnapshot> for CustomerSnapshotDto {
    fn from(value: CustomerSnapshot) -> Self {
        let DestructCustomerSnapshot { id, name, phone } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSnapshotDto {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: Decimal,
}

impl From<MovieSnapshot> for MovieSnapshotDto {
    fn from(value: MovieSnapshot) -> Self {
        let DestructMovieSnapshot {
            id,
            title,
            daily_rental_rate,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            daily_rental_rate: daily_rental_rate.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer: CustomerSnapshotDto,
    pub movie: MovieSnapshotDto,
    pub date_out: OffsetDateTime,
    pub date_returned: Option<OffsetDateTime>,
    pub rental_fee: Option<Decimal>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            customer,
            movie,
            date_out,
            returned,
        } = value.into_destruct();
        let (date_returned, rental_fee) = match returned {
            Some(returned) => {
                let DestructReturned {
                    date_returned,
                    rental_fee,
                } = returned.into_destruct();
                (Some(date_returned.into()), Some(rental_fee.into()))
            }
            None => (None, None),
        };
        Self {
            id: id.into(),
            customer: customer.into(),
            movie: movie.into(),
            date_out: date_out.into(),
            date_returned,
            rental_fee,
        }
    }
}

pub struct GetRentalDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct ReturnRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

pub struct CheckoutRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}
