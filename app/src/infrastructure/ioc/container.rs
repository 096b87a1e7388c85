use service::prelude::Wannier90CalculationState;
use typed_builder::TypedBuilder;

#[derive(derive_more::AsRef, TypedBuilder)]
pub struct Container {
    #[as_ref]
    pub(super) wannier90: Wannier90CalculationState,
}
