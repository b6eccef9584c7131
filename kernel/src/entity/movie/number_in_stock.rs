use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct NumberInStock(i32);

impl NumberInStock {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn increment(&self) -> error_stack::Result<Self, KernelError> {
        self.0.checked_add(1).map(Self).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Stock of {} cannot grow any further", self.0))
        })
    }

    /// `None` when nothing is left to take out.
    pub fn decrement(&self) -> Option<Self> {
        (self.0 > 0).then(|| Self(self.0 - 1))
    }
}
