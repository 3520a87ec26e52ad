// prism/src/lib.rs

pub mod cache;
pub mod domain;
pub mod ports;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
