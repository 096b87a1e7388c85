pub mod folder;
pub mod wannier90;

pub mod prelude {
    #[rustfmt::skip]
    pub use super::{
        folder::MemoryFolder,
        wannier90::{Wannier90Calculation, Wannier90CalculationState},
    };
}
