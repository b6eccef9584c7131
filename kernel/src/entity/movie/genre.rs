use vodca::{AsRefln, Fromln};

/// Genre embedded in the movie record by name.
#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct MovieGenre(String);

impl MovieGenre {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
