//! A stable sort for co-indexed arrays, built from primitive loads, stores,
//! comparisons, and loops.
//!
//! N buffers of identical length form one logical record per position; the
//! engine reorders whole records along one axis of a row-major shape, using
//! a caller-supplied comparator and caller-allocated scratch buffers. The
//! algorithm is a hybrid: blocks of [`merge_sort::MAX_INSERTION`] records are
//! insertion sorted, then runs of doubling length are merged bottom-up,
//! ping-ponging between the output and scratch buffers ([`Bank`]) instead of
//! allocating per pass.
//!
//! The sort never allocates, never recurses, and never calls an existing
//! sort routine; hosts that only provide indexed load/store over fixed-size
//! buffers can drive it through the [`RecordSet`] trait.
//!
//! ```
//! use cosort::Channel;
//!
//! // Sort keys and carry the payload along, ordering by key only.
//! let keys = [2i32, 2, 1];
//! let payload = ["b", "a", "c"];
//!
//! let mut keys_out = [0i32; 3];
//! let mut keys_scratch = [0i32; 3];
//! let mut payload_out = [""; 3];
//! let mut payload_scratch = [""; 3];
//!
//! let mut set = (
//!     Channel::new(&keys, &mut keys_out, &mut keys_scratch),
//!     Channel::new(&payload, &mut payload_out, &mut payload_scratch),
//! );
//! cosort::sort_by(&mut set, |a, b| a.0.cmp(&b.0));
//!
//! assert_eq!(keys_out, [1, 2, 2]);
//! // Stable: "b" preceded "a" in the input and still does.
//! assert_eq!(payload_out, ["c", "b", "a"]);
//! ```

use std::cmp::Ordering;

pub mod axis;
pub mod merge_sort;
pub mod patterns;
pub mod record;

pub use record::{Bank, Channel, Lane, RecordSet};

/// Sorts a 1-D record set, ordering records by `Ord`.
///
/// The sorted records are left in the output buffers. Stable and
/// *O*(*n* log *n*) worst-case.
#[inline]
pub fn sort<R>(set: &mut R)
where
    R: RecordSet,
    R::Record: Ord,
{
    let len = set.len();
    axis::sort_axis(set, &[len], 0);
}

/// Sorts a 1-D record set with a comparator function.
///
/// The comparator must define a total ordering on the records; records that
/// compare equal keep their relative input order. The sorted records are
/// left in the output buffers.
#[inline]
pub fn sort_by<R, F>(set: &mut R, compare: F)
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> Ordering,
{
    let len = set.len();
    axis::sort_axis_by(set, &[len], 0, compare);
}
