use destructure::Destructure;
use vodca::References;

use crate::entity::{DateReturned, RentalFee};

/// Set exactly once, when the rental is closed.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Returned {
    date_returned: DateReturned,
    rental_fee: RentalFee,
}

impl Returned {
    pub fn new(date_returned: DateReturned, rental_fee: RentalFee) -> Self {
        Self {
            date_returned,
            rental_fee,
        }
    }
}
