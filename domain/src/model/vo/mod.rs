pub mod parameter;
pub mod projection;

#[rustfmt::skip]
pub use self::{
    parameter::ParameterValue,
    projection::{Projection, ProjectionSite},
};
