use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery, MovieQuery,
    RentalQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{CustomerId, DateOut, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::transfer::{CheckoutRentalDto, GetRentalDto, RentalDto, ReturnRentalDto};

#[async_trait::async_trait]
pub trait GetRentalService<Connection: Transaction>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnRentalQuery<Connection>
{
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self.rental_query().find_by_id(&mut connection, &id).await?;

        Ok(rental.map(RentalDto::from))
    }

    async fn get_all_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rentals = self.rental_query().find_all(&mut connection).await?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<Connection: Transaction, T> GetRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnRentalQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CheckoutRentalService<Connection: Transaction>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnClock
    + DependOnCustomerQuery<Connection>
    + DependOnMovieQuery<Connection>
    + DependOnRentalModifier<Connection>
    + DependOnMovieModifier<Connection>
{
    async fn checkout_rental(
        &self,
        dto: CheckoutRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(dto.customer_id))
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("Invalid customer {}", dto.customer_id))
            })?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &MovieId::new(dto.movie_id))
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("Invalid movie {}", dto.movie_id))
            })?;
        if !movie.is_in_stock() {
            return Err(Report::new(KernelError::OutOfStock)
                .attach_printable(format!("Movie {} is not in stock", dto.movie_id)));
        }

        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer,
            &movie,
            DateOut::new(self.clock().now()),
        );
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        self.movie_modifier()
            .decrement_stock(&mut connection, movie.id())
            .await?;

        connection.commit().await?;
        tracing::info!(
            "Checked out movie {} to customer {} as rental {}",
            dto.movie_id,
            dto.customer_id,
            rental.id().as_ref()
        );

        Ok(RentalDto::from(rental))
    }
}

impl<Connection: Transaction, T> CheckoutRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnClock
        + DependOnCustomerQuery<Connection>
        + DependOnMovieQuery<Connection>
        + DependOnRentalModifier<Connection>
        + DependOnMovieModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService<Connection: Transaction>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnClock
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
    + DependOnMovieModifier<Connection>
{
    /// Closes the customer's rental of the movie and puts the copy back in
    /// stock. Both writes share one transaction.
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let movie_id = MovieId::new(dto.movie_id);
        let rental = self
            .rental_query()
            .find_by_customer_and_movie(&mut connection, &customer_id, &movie_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!(
                    "No rental of movie {} by customer {}",
                    dto.movie_id, dto.customer_id
                ))
            })?;

        let rental = rental.close(self.clock().now())?;
        self.rental_modifier()
            .mark_returned(&mut connection, &rental)
            .await?;

        let restocked = self
            .movie_modifier()
            .increment_stock(&mut connection, rental.movie().id())
            .await?;
        if !restocked {
            tracing::warn!(
                "Movie {} of rental {} no longer exists, stock was not updated",
                dto.movie_id,
                rental.id().as_ref()
            );
        }

        connection.commit().await?;
        tracing::info!("Processed return of rental {}", rental.id().as_ref());

        Ok(RentalDto::from(rental))
    }
}

impl<Connection: Transaction, T> ReturnRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnClock
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
        + DependOnMovieModifier<Connection>
{
}
