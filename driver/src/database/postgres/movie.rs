use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{
    DailyRentalRate, Movie, MovieGenre, MovieId, MovieTitle, NumberInStock,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery<PostgresTransaction> for PostgresMovieRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con.connection(), id)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl MovieModifier<PostgresTransaction> for PostgresMovieRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::create(con.connection(), movie)
            .await
            .convert_error()
    }

    async fn increment_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let affected = PgMovieInternal::increment_stock(con.connection(), id)
            .await
            .convert_error()?;
        Ok(affected > 0)
    }

    async fn decrement_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        let affected = PgMovieInternal::decrement_stock(con.connection(), id)
            .await
            .convert_error()?;
        if affected == 0 {
            return Err(Report::new(KernelError::OutOfStock)
                .attach_printable(format!("Movie {} has no copy left", id.as_ref())));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    genre_name: String,
    number_in_stock: i32,
    daily_rental_rate: Decimal,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieTitle::new(value.title),
            MovieGenre::new(value.genre_name),
            NumberInStock::new(value.number_in_stock),
            DailyRentalRate::new(value.daily_rental_rate),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(con: &mut PgConnection, id: &MovieId) -> Result<Option<Movie>, sqlx::Error> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Movie::from))
    }

    async fn create(con: &mut PgConnection, movie: &Movie) -> Result<(), sqlx::Error> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO movies (id, title, genre_name, number_in_stock, daily_rental_rate)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn increment_stock(con: &mut PgConnection, id: &MovieId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + 1
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected())
    }

    async fn decrement_stock(con: &mut PgConnection, id: &MovieId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock - 1
            WHERE id = $1 AND number_in_stock > 0
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::MovieQuery;
    use kernel::interface::update::MovieModifier;
    use kernel::prelude::entity::{
        DailyRentalRate, Movie, MovieGenre, MovieId, MovieTitle, NumberInStock,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresMovieRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn stock_moves_by_one() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = MovieId::new(Uuid::new_v4());
        let movie = Movie::new(
            id.clone(),
            MovieTitle::new("title"),
            MovieGenre::new("genre"),
            NumberInStock::new(1),
            DailyRentalRate::new(Decimal::from(2)),
        );
        PostgresMovieRepository.create(&mut con, &movie).await?;

        assert!(PostgresMovieRepository.increment_stock(&mut con, &id).await?);
        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.unwrap().number_in_stock(), &NumberInStock::new(2));

        PostgresMovieRepository.decrement_stock(&mut con, &id).await?;
        PostgresMovieRepository.decrement_stock(&mut con, &id).await?;
        let error = PostgresMovieRepository
            .decrement_stock(&mut con, &id)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::OutOfStock);

        let missing = MovieId::new(Uuid::new_v4());
        assert!(!PostgresMovieRepository.increment_stock(&mut con, &missing).await?);
        Ok(())
    }
}
