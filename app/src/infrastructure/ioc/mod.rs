mod boilerplate;
mod container;

use service::prelude::*;

pub use self::container::Container;

impl Container {
    pub fn new() -> Self {
        Container::builder().wannier90(Wannier90CalculationState::new()).build()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
