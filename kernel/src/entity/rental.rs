mod date_out;
mod date_returned;
mod id;
mod rental_days;
mod rental_fee;
mod returned;
mod snapshot;

pub use self::{
    date_out::*, date_returned::*, id::*, rental_days::*, rental_fee::*, returned::*, snapshot::*,
};
use crate::entity::{Customer, Movie};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer: CustomerSnapshot,
    movie: MovieSnapshot,
    date_out: DateOut,
    returned: Option<Returned>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: CustomerSnapshot,
        movie: MovieSnapshot,
        date_out: DateOut,
        returned: Option<Returned>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            date_out,
            returned,
        }
    }

    /// Opens an active rental, copying what it needs from the customer and movie.
    pub fn checkout(id: RentalId, customer: &Customer, movie: &Movie, date_out: DateOut) -> Self {
        Self::new(
            id,
            CustomerSnapshot::from(customer),
            MovieSnapshot::from(movie),
            date_out,
            None,
        )
    }

    pub fn is_active(&self) -> bool {
        self.returned.is_none()
    }

    /// Closes an active rental at `now`, charging the daily rate captured at checkout
    /// for every started day.
    pub fn close(self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        if let Some(returned) = &self.returned {
            return Err(Report::new(KernelError::AlreadyProcessed).attach_printable(format!(
                "Rental {} was returned at {}",
                self.id.as_ref(),
                returned.date_returned().as_ref()
            )));
        }
        let days = RentalDays::between(&self.date_out, &now);
        let fee = RentalFee::calculate(&days, self.movie.daily_rental_rate());
        Ok(Self {
            returned: Some(Returned::new(DateReturned::new(now), fee)),
            ..self
        })
    }
}
