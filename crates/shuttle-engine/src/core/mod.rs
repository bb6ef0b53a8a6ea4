pub use self::{geometry::*, layout::*};

pub(crate) mod geometry;
pub(crate) mod layout;
