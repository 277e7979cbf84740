use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to query network interfaces: {}", _0)]
    InterfaceQuery(#[from] nix::Error),
    #[error("failed to write output: {}", _0)]
    Output(#[from] io::Error),
    #[error("failed to set up logger: {}", _0)]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
