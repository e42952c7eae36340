use super::*;

mod layer;
mod portrait;

pub use self::{layer::*, portrait::*};
