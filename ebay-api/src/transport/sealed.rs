//! Sealed marker for [`Transport`](super::Transport) implementations.

pub(crate) mod private {
    /// Implemented only inside this crate.
    pub trait Sealed {}
}
