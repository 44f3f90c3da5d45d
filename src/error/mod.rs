mod discovery;
mod io;
mod process;

pub use discovery::DiscoveryError;
pub use io::IoError;
pub use process::ProcessError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

pub type Result<T> = std::result::Result<T, Error>;
