/// Errors surfaced by the containers in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tree has no nodes, so there is no root entry to look at.
    #[error("empty tree")]
    EmptyTree,
    /// An index-based access on a [`CheckedVec`](crate::CheckedVec) landed
    /// past the end.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The container length at the time of the access.
        len: usize,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_messages() {
        assert_eq!(Error::EmptyTree.to_string(), "empty tree");
        assert_eq!(
            Error::OutOfRange { index: 7, len: 3 }.to_string(),
            "index 7 out of range for length 3"
        );
    }
}
