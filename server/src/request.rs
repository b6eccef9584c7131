mod rental;

pub use self::rental::{
    CheckoutRequest, GetRentalRequest, Transformer as RentalTransformer, ReturnRequest,
};
