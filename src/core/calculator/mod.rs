pub mod drift;
pub mod sessions;
