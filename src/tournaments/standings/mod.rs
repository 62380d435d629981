pub mod compute;
pub mod export;
