//! Netlink error types

use std::io;

use thiserror::Error;

/// Errors raised while talking to the kernel over rtnetlink.
#[derive(Error, Debug)]
pub enum NetlinkError {
    /// Socket-level failure
    #[error("netlink socket error: {0}")]
    Io(#[from] io::Error),

    /// Kernel rejected the request
    #[error("kernel returned error: {}", io::Error::from_raw_os_error(*errno))]
    Kernel {
        /// Positive errno value
        errno: i32,
    },

    /// No interface with the requested index
    #[error("link not found: index {index}")]
    LinkNotFound {
        /// Interface index requested
        index: u32,
    },

    /// Reply could not be parsed
    #[error("malformed netlink message: {0}")]
    Malformed(String),

    /// Reply ended before the expected message arrived
    #[error("netlink reply ended without a response")]
    NoResponse,
}
