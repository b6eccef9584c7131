use rust_decimal::Decimal;
use vodca::{AsRefln, Fromln};

use crate::entity::{DailyRentalRate, RentalDays};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct RentalFee(Decimal);

impl RentalFee {
    pub fn new(fee: impl Into<Decimal>) -> Self {
        Self(fee.into())
    }

    pub fn calculate(days: &RentalDays, rate: &DailyRentalRate) -> Self {
        Self(Decimal::from(*days.as_ref()) * *rate.as_ref())
    }
}
