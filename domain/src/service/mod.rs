mod calc_job_preparer;
mod folder;

#[rustfmt::skip]
pub use self::{
    calc_job_preparer::{CalcJobPlugin, CalcJobPreparer, SelectCalcJobPreparer},
    folder::{InputFolder, SandboxFolder},
};
