use crate::database::Transaction;
use crate::entity::{CustomerId, MovieId, Rental, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Picks the earliest active rental of the pair, falling back to a returned
    /// one when none is active. Implementations lock the row for the rest of the
    /// transaction where the store supports it.
    async fn find_by_customer_and_movie(
        &self,
        con: &mut Connection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Newest checkout first.
    async fn find_all(&self, con: &mut Connection) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery<Connection: Transaction>: Sync + Send + 'static {
    type RentalQuery: RentalQuery<Connection>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
