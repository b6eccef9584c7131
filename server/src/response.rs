mod rental;

pub use self::rental::{CheckoutPresenter, RentalPresenter, RentalResponse};
