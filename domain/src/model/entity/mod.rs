pub mod calc_info;
pub mod calc_job;
pub mod code;
pub mod kpoints;
pub mod structure;

#[rustfmt::skip]
pub use self::{
    calc_info::{CalcInfo, CodeInfo, LocalCopy, RemoteCopy},
    calc_job::{CalcJobInputs, CalcOptions, Metadata, RemoteFolder, Resources, Settings},
    code::Code,
    kpoints::{KpointPath, KpointsMesh},
    structure::{Site, Structure},
};
