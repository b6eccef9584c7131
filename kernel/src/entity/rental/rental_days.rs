use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln};

use crate::entity::DateOut;

#[derive(Debug, Clone, PartialEq, Eq, Fromln, AsRefln)]
pub struct RentalDays(i64);

impl RentalDays {
    /// Whole days elapsed between checkout and `now`, never less than one.
    pub fn between(date_out: &DateOut, now: &OffsetDateTime) -> Self {
        let elapsed = *now - *date_out.as_ref();
        Self((elapsed.whole_seconds() / Duration::DAY.whole_seconds()).max(1))
    }
}
