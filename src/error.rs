/// Error types for the ipsearch library.
///
/// Searching itself never fails; only building a misconfigured
/// [`Finder`](crate::Finder) does.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Neither IPv4 nor IPv6 was selected for extraction.
    #[error("no address family selected")]
    NoFamilies,
}

/// Convenience type alias for Results using the library error.
pub type Result<T> = std::result::Result<T, Error>;
