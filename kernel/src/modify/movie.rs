use crate::database::Transaction;
use crate::entity::{Movie, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(&self, con: &mut Connection, movie: &Movie)
        -> error_stack::Result<(), KernelError>;

    /// Returns `false` when no such movie exists.
    async fn increment_stock(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;

    /// Fails with [`KernelError::OutOfStock`] instead of going below zero.
    async fn decrement_stock(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMovieModifier<Connection: Transaction>: 'static + Sync + Send {
    type MovieModifier: MovieModifier<Connection>;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
