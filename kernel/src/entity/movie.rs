mod daily_rental_rate;
mod genre;
mod id;
mod number_in_stock;
mod title;

pub use self::{daily_rental_rate::*, genre::*, id::*, number_in_stock::*, title::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    genre: MovieGenre,
    number_in_stock: NumberInStock,
    daily_rental_rate: DailyRentalRate,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        genre: MovieGenre,
        number_in_stock: NumberInStock,
        daily_rental_rate: DailyRentalRate,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        *self.number_in_stock.as_ref() > 0
    }
}
