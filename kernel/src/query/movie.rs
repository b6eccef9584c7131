use crate::database::Transaction;
use crate::entity::{Movie, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError>;
}

pub trait DependOnMovieQuery<Connection: Transaction>: Sync + Send + 'static {
    type MovieQuery: MovieQuery<Connection>;
    fn movie_query(&self) -> &Self::MovieQuery;
}
