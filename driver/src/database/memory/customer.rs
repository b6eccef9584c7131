use kernel::interface::query::CustomerQuery;
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{Customer, CustomerId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery<InMemoryTransaction> for InMemoryCustomerRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.collections().customers.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl CustomerModifier<InMemoryTransaction> for InMemoryCustomerRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        con.collections()
            .customers
            .insert(*customer.id().as_ref(), customer.clone());
        Ok(())
    }
}
