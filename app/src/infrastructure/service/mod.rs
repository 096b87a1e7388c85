mod local_copy;

pub use self::local_copy::stage_local_copies;
