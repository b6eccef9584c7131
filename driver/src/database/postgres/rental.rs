use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, DateOut,
    DateReturned, MovieId, MovieSnapshot, MovieTitle, Rental, RentalFee, RentalId, Returned,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<PostgresTransaction> for PostgresRentalRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con.connection(), id)
            .await
            .convert_error()
    }

    async fn find_by_customer_and_movie(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_customer_and_movie(con.connection(), customer_id, movie_id)
            .await
            .convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con.connection())
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl RentalModifier<PostgresTransaction> for PostgresRentalRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con.connection(), rental)
            .await
            .convert_error()
    }

    async fn mark_returned(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        let Some(returned) = rental.returned() else {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Rental {} is still open", rental.id().as_ref())));
        };
        let affected = PgRentalInternal::mark_returned(con.connection(), rental.id(), returned)
            .await
            .convert_error()?;
        if affected == 0 {
            return Err(Report::new(KernelError::AlreadyProcessed).attach_printable(format!(
                "Rental {} is not active anymore",
                rental.id().as_ref()
            )));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_phone: String,
    movie_id: Uuid,
    movie_title: String,
    movie_daily_rental_rate: Decimal,
    date_out: OffsetDateTime,
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<Decimal>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        let returned = value
            .date_returned
            .zip(value.rental_fee)
            .map(|(date_returned, fee)| {
                Returned::new(DateReturned::new(date_returned), RentalFee::new(fee))
            });
        Rental::new(
            RentalId::new(value.id),
            CustomerSnapshot::new(
                CustomerId::new(value.customer_id),
                CustomerName::new(value.customer_name),
                CustomerPhone::new(value.customer_phone),
            ),
            MovieSnapshot::new(
                MovieId::new(value.movie_id),
                MovieTitle::new(value.movie_title),
                DailyRentalRate::new(value.movie_daily_rental_rate),
            ),
            DateOut::new(value.date_out),
            returned,
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            FROM
                rentals
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Rental::from))
    }

    async fn find_by_customer_and_movie(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            FROM
                rentals
            WHERE
                customer_id = $1 AND movie_id = $2
            ORDER BY
                date_returned IS NULL DESC, date_out
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Rental::from))
    }

    async fn find_all(con: &mut PgConnection) -> Result<Vec<Rental>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            FROM
                rentals
            ORDER BY
                date_out DESC
            "#,
        )
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> Result<(), sqlx::Error> {
        let returned = rental.returned().as_ref();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.customer().id().as_ref())
        .bind(rental.customer().name().as_ref())
        .bind(rental.customer().phone().as_ref())
        .bind(rental.movie().id().as_ref())
        .bind(rental.movie().title().as_ref())
        .bind(rental.movie().daily_rental_rate().as_ref())
        .bind(rental.date_out().as_ref())
        .bind(returned.map(|returned| *returned.date_returned().as_ref()))
        .bind(returned.map(|returned| *returned.rental_fee().as_ref()))
        .execute(con)
        .await?;
        Ok(())
    }

    async fn mark_returned(
        con: &mut PgConnection,
        id: &RentalId,
        returned: &Returned,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET date_returned = $2, rental_fee = $3
            WHERE id = $1 AND date_returned IS NULL
            "#,
        )
        .bind(id.as_ref())
        .bind(returned.date_returned().as_ref())
        .bind(returned.rental_fee().as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected())
    }
}
