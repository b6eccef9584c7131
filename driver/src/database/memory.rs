use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery};
use kernel::interface::update::{
    DependOnCustomerModifier, DependOnMovieModifier, DependOnRentalModifier,
};
use kernel::prelude::entity::{Customer, Movie, Rental};
use kernel::KernelError;

pub use self::{customer::*, movie::*, rental::*};

mod customer;
mod movie;
mod rental;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct Collections {
    customers: HashMap<Uuid, Customer>,
    movies: HashMap<Uuid, Movie>,
    rentals: HashMap<Uuid, Rental>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    collections: Arc<Mutex<Collections>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Holds the store exclusively. Writes go to a staged copy that replaces the
/// shared state on commit.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Collections>,
    staged: Collections,
}

impl InMemoryTransaction {
    fn collections(&mut self) -> &mut Collections {
        &mut self.staged
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        tracing::debug!("Discarding in-memory transaction");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryTransaction> for InMemoryDatabase {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.collections).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }
}

impl DependOnCustomerQuery<InMemoryTransaction> for InMemoryDatabase {
    type CustomerQuery = InMemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &InMemoryCustomerRepository
    }
}

impl DependOnCustomerModifier<InMemoryTransaction> for InMemoryDatabase {
    type CustomerModifier = InMemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &InMemoryCustomerRepository
    }
}

impl DependOnMovieQuery<InMemoryTransaction> for InMemoryDatabase {
    type MovieQuery = InMemoryMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &InMemoryMovieRepository
    }
}

impl DependOnMovieModifier<InMemoryTransaction> for InMemoryDatabase {
    type MovieModifier = InMemoryMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &InMemoryMovieRepository
    }
}

impl DependOnRentalQuery<InMemoryTransaction> for InMemoryDatabase {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier<InMemoryTransaction> for InMemoryDatabase {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &InMemoryRentalRepository
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone, IsGold};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryCustomerRepository, InMemoryDatabase};

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("name"),
            CustomerPhone::new("phone"),
            IsGold::new(false),
        )
    }

    #[tokio::test]
    async fn committed_writes_are_visible() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let customer = customer();

        let mut con = db.transact().await?;
        InMemoryCustomerRepository.create(&mut con, &customer).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryCustomerRepository
            .find_by_id(&mut con, customer.id())
            .await?;
        assert_eq!(found, Some(customer));
        Ok(())
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let customer = customer();

        let mut con = db.transact().await?;
        InMemoryCustomerRepository.create(&mut con, &customer).await?;
        drop(con);

        let mut con = db.transact().await?;
        InMemoryCustomerRepository.create(&mut con, &customer).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryCustomerRepository
            .find_by_id(&mut con, customer.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
