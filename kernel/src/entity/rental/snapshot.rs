use destructure::Destructure;
use vodca::References;

use crate::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Movie, MovieId,
    MovieTitle,
};

/// Customer details copied into a rental at checkout.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CustomerSnapshot {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
}

impl CustomerSnapshot {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone) -> Self {
        Self { id, name, phone }
    }
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self::new(
            customer.id().clone(),
            customer.name().clone(),
            customer.phone().clone(),
        )
    }
}

/// Movie details copied into a rental at checkout. The rate here is what the
/// rental is charged, whatever the movie costs later.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct MovieSnapshot {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl MovieSnapshot {
    pub fn new(id: MovieId, title: MovieTitle, daily_rental_rate: DailyRentalRate) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

impl From<&Movie> for MovieSnapshot {
    fn from(movie: &Movie) -> Self {
        Self::new(
            movie.id().clone(),
            movie.title().clone(),
            movie.daily_rental_rate().clone(),
        )
    }
}
