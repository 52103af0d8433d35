/// Result alias for `drift`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by snapshot construction, detection, centrality and threshold validation.
///
/// Classification itself is infallible; these only surface from the checked
/// entry points and the collaborators around it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Snapshot times were not strictly increasing.
    #[error("snapshot times out of order at position {position}")]
    UnorderedSnapshots {
        /// Index of the first snapshot whose time does not exceed its predecessor.
        position: usize,
    },

    /// A label vector referenced a node the graph does not have.
    #[error("node {node} out of range for {len} nodes")]
    NodeOutOfRange {
        /// Offending node index.
        node: usize,
        /// Number of nodes available.
        len: usize,
    },

    /// A power iteration hit its iteration cap before converging.
    #[error("{algorithm} did not converge within {iterations} iterations")]
    NotConverged {
        /// Algorithm that stopped early.
        algorithm: &'static str,
        /// Iterations performed.
        iterations: usize,
    },
}
