use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct IsGold(bool);

impl IsGold {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
