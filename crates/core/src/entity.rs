//! Identity for records the stores deduplicate on.

use core::fmt::Debug;
use core::hash::Hash;

/// A record with a stable identifier.
///
/// The cart keys its lines by the product's id, so two snapshots of the same
/// product (e.g. before and after a price change) share one line.
pub trait Entity {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}
