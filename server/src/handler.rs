use std::ops::Deref;
use std::sync::Arc;

use application::service::{CheckoutRentalService, GetRentalService, ReturnRentalService};
use driver::clock::SystemClock;
use driver::database::{PostgresDatabase, PostgresTransaction};
use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery};
use kernel::interface::update::{DependOnMovieModifier, DependOnRentalModifier};
use kernel::KernelError;

use crate::auth::TokenAuthority;
use crate::config::AppConfig;

/// Everything a route needs from the application.
pub trait Modules: 'static + Sync + Send {
    type Transaction: Transaction;
    type Services: ReturnRentalService<Self::Transaction>
        + CheckoutRentalService<Self::Transaction>
        + GetRentalService<Self::Transaction>;

    fn services(&self) -> &Self::Services;
    fn authority(&self) -> &TokenAuthority;
}

pub struct AppModule<M>(Arc<M>);

impl<M> AppModule<M> {
    pub fn new(module: M) -> Self {
        Self(Arc::new(module))
    }
}

impl<M> Clone for AppModule<M> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<M> Deref for AppModule<M> {
    type Target = M;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D, K> {
    database: D,
    clock: K,
    authority: TokenAuthority,
}

impl<D, K> Handler<D, K> {
    pub fn new(database: D, clock: K, authority: TokenAuthority) -> Self {
        Self {
            database,
            clock,
            authority,
        }
    }
}

impl Handler<PostgresDatabase, SystemClock> {
    pub async fn init(config: &AppConfig) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        let authority = TokenAuthority::new(config.jwt_private_key().as_bytes(), *config.token_ttl());

        Ok(Self::new(database, SystemClock, authority))
    }
}

impl Modules for Handler<PostgresDatabase, SystemClock> {
    type Transaction = PostgresTransaction;
    type Services = Self;

    fn services(&self) -> &Self::Services {
        self
    }

    fn authority(&self) -> &TokenAuthority {
        &self.authority
    }
}

impl<C, D, K> DependOnDatabaseConnection<C> for Handler<D, K>
where
    C: Transaction,
    D: DatabaseConnection<C>,
    K: Clock,
{
    type DatabaseConnection = D;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl<D, K> DependOnClock for Handler<D, K>
where
    D: 'static + Sync + Send,
    K: Clock,
{
    type Clock = K;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

macro_rules! delegate_to_database {
    ($($depend:ident => $assoc:ident, $getter:ident;)*) => {
        $(
            impl<C, D, K> $depend<C> for Handler<D, K>
            where
                C: Transaction,
                D: $depend<C>,
                K: Clock,
            {
                type $assoc = D::$assoc;
                fn $getter(&self) -> &Self::$assoc {
                    self.database.$getter()
                }
            }
        )*
    };
}

delegate_to_database! {
    DependOnCustomerQuery => CustomerQuery, customer_query;
    DependOnMovieQuery => MovieQuery, movie_query;
    DependOnMovieModifier => MovieModifier, movie_modifier;
    DependOnRentalQuery => RentalQuery, rental_query;
    DependOnRentalModifier => RentalModifier, rental_modifier;
}

#[cfg(test)]
impl Modules for Handler<driver::database::InMemoryDatabase, driver::clock::FixedClock> {
    type Transaction = driver::database::InMemoryTransaction;
    type Services = Self;

    fn services(&self) -> &Self::Services {
        self
    }

    fn authority(&self) -> &TokenAuthority {
        &self.authority
    }
}
