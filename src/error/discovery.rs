use thiserror::Error;

use crate::discovery::MAX_LINE_LEN;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("line {line} is too long ({len} bytes, limit {limit})")]
    LineTooLong {
        line: usize,
        len: usize,
        limit: usize,
    },
}

impl DiscoveryError {
    pub fn line_too_long(line: usize, len: usize) -> Self {
        Self::LineTooLong {
            line,
            len,
            limit: MAX_LINE_LEN,
        }
    }
}
