use std::cmp::Reverse;

use error_stack::Report;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{CustomerId, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<InMemoryTransaction> for InMemoryRentalRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.collections().rentals.get(id.as_ref()).cloned())
    }

    async fn find_by_customer_and_movie(
        &self,
        con: &mut InMemoryTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let found = con
            .collections()
            .rentals
            .values()
            .filter(|rental| {
                rental.customer().id() == customer_id && rental.movie().id() == movie_id
            })
            .min_by_key(|rental| (!rental.is_active(), *rental.date_out().as_ref()))
            .cloned();
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con
            .collections()
            .rentals
            .values()
            .cloned()
            .collect::<Vec<_>>();
        rentals.sort_by_key(|rental| Reverse(*rental.date_out().as_ref()));
        Ok(rentals)
    }
}

#[async_trait::async_trait]
impl RentalModifier<InMemoryTransaction> for InMemoryRentalRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        con.collections()
            .rentals
            .insert(*rental.id().as_ref(), rental.clone());
        Ok(())
    }

    async fn mark_returned(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if rental.is_active() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Rental {} is still open", rental.id().as_ref())));
        }
        let rentals = &mut con.collections().rentals;
        match rentals.get(rental.id().as_ref()) {
            Some(stored) if stored.is_active() => {
                rentals.insert(*rental.id().as_ref(), rental.clone());
                Ok(())
            }
            Some(_) => Err(Report::new(KernelError::AlreadyProcessed).attach_printable(format!(
                "Rental {} is not active anymore",
                rental.id().as_ref()
            ))),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Rental {} does not exist", rental.id().as_ref()))),
        }
    }
}
