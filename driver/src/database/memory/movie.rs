use error_stack::Report;
use rust_decimal::Decimal;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{DestructMovie, Movie, MovieId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryMovieRepository;

#[async_trait::async_trait]
impl MovieQuery<InMemoryTransaction> for InMemoryMovieRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.collections().movies.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl MovieModifier<InMemoryTransaction> for InMemoryMovieRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        if movie.daily_rental_rate().as_ref() <= &Decimal::ZERO {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Daily rental rate must be positive"));
        }
        if movie.number_in_stock().as_ref() < &0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Number in stock must not be negative"));
        }
        con.collections()
            .movies
            .insert(*movie.id().as_ref(), movie.clone());
        Ok(())
    }

    async fn increment_stock(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let movies = &mut con.collections().movies;
        let Some(movie) = movies.get(id.as_ref()) else {
            return Ok(false);
        };
        let number_in_stock = movie.number_in_stock().increment()?;
        let DestructMovie {
            id,
            title,
            genre,
            daily_rental_rate,
            ..
        } = movie.clone().into_destruct();
        let restocked = Movie::new(id, title, genre, number_in_stock, daily_rental_rate);
        movies.insert(*restocked.id().as_ref(), restocked);
        Ok(true)
    }

    async fn decrement_stock(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        let movies = &mut con.collections().movies;
        let Some(movie) = movies.get(id.as_ref()) else {
            return Err(Report::new(KernelError::OutOfStock)
                .attach_printable(format!("Movie {} does not exist", id.as_ref())));
        };
        let Some(number_in_stock) = movie.number_in_stock().decrement() else {
            return Err(Report::new(KernelError::OutOfStock)
                .attach_printable(format!("Movie {} has no copy left", id.as_ref())));
        };
        let DestructMovie {
            id,
            title,
            genre,
            daily_rental_rate,
            ..
        } = movie.clone().into_destruct();
        let movie = Movie::new(id, title, genre, number_in_stock, daily_rental_rate);
        movies.insert(*movie.id().as_ref(), movie);
        Ok(())
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

    use crate::database::memory::{InMemoryDatabase, InMemoryMovieRepository};

    #[tokio::test]
    async fn stock_never_goes_negative() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = MovieId::new(Uuid::new_v4());
        let movie = Movie::new(
            id.clone(),
            MovieTitle::new("title"),
            MovieGenre::new("genre"),
            NumberInStock::new(1),
            DailyRentalRate::new(Decimal::from(2)),
        );
        InMemoryMovieRepository.create(&mut con, &movie).await?;

        InMemoryMovieRepository.decrement_stock(&mut con, &id).await?;
        let error = InMemoryMovieRepository
            .decrement_stock(&mut con, &id)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::OutOfStock);

        assert!(InMemoryMovieRepository.increment_stock(&mut con, &id).await?);
        let found = InMemoryMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.unwrap().number_in_stock(), &NumberInStock::new(1));

        let missing = MovieId::new(Uuid::new_v4());
        assert!(!InMemoryMovieRepository.increment_stock(&mut con, &missing).await?);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_movies_the_schema_would_reject() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let movie = |stock: i32, rate: Decimal| {
            Movie::new(
                MovieId::new(Uuid::new_v4()),
                MovieTitle::new("title"),
                MovieGenre::new("genre"),
                NumberInStock::new(stock),
                DailyRentalRate::new(rate),
            )
        };

        for invalid in [
            movie(1, Decimal::ZERO),
            movie(1, Decimal::new(-150, 2)),
            movie(-1, Decimal::from(2)),
        ] {
            let error = InMemoryMovieRepository
                .create(&mut con, &invalid)
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Validation);
            let found = InMemoryMovieRepository
                .find_by_id(&mut con, invalid.id())
                .await?;
            assert!(found.is_none());
        }

        InMemoryMovieRepository
            .create(&mut con, &movie(0, Decimal::new(1, 2)))
            .await?;
        Ok(())
    }
}
