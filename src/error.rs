use thiserror::Error;

/// LlrbError enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Error, PartialEq)]
pub enum LlrbError<K> {
    /// Fatal case, a red link follows another red link.
    #[error("consecutive red links")]
    ConsecutiveReds,
    /// Fatal case, a red link is leaning right.
    #[error("red link leaning right")]
    RightLeaningRed,
    /// Fatal case, root of the tree is not black.
    #[error("root is not black")]
    RedRoot,
    /// Fatal case, number of black links differ between the left and
    /// right subtree of a node.
    #[error("unbalanced blacks, left: {left} right: {right}")]
    UnbalancedBlacks { left: usize, right: usize },
    /// Fatal case, index entries are not in sort-order. Carries the
    /// child key followed by its parent key.
    #[error("sort error, {0:?} misplaced under {1:?}")]
    SortError(K, K),
    /// Returned by create() API when key is already present.
    #[error("key {0:?} already present")]
    OverwriteKey(K),
}
