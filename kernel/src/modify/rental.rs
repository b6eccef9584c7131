use crate::database::Transaction;
use crate::entity::Rental;
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(&self, con: &mut Connection, rental: &Rental)
        -> error_stack::Result<(), KernelError>;

    /// Stores the return of a closed rental. Only applies while the stored
    /// record is still active, otherwise fails with [`KernelError::AlreadyProcessed`].
    async fn mark_returned(
        &self,
        con: &mut Connection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier<Connection: Transaction>: 'static + Sync + Send {
    type RentalModifier: RentalModifier<Connection>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
