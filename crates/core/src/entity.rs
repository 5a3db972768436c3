//! Identity for catalog products and quote lines.

/// Something identified by a stable key (a catalog product, a quote line).
///
/// Two values with the same `id()` describe the same thing even when their other
/// attributes differ, e.g. a quote line holding an older product snapshot.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether `self` and `other` share an identity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
