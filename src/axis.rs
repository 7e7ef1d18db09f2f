//! Multi-axis driver: runs the lane engine once per combination of the
//! non-sort-axis indices of a row-major shape, then copies scratch-resident
//! results back into the output buffers.

use std::cmp::Ordering;

use crate::merge_sort::sort_lane;
use crate::record::{Bank, Lane, RecordSet};

/// Sorts `set` along `axis` of the row-major `shape`, ordering records by
/// `Ord`.
///
/// Every 1-D lane along `axis` is sorted independently; lanes do not
/// interact. The sorted data is always left in the output buffers,
/// regardless of which bank the engine finished in.
///
/// Panics if `axis` is out of range or the shape does not describe
/// `set.len()` records.
#[inline]
pub fn sort_axis<R>(set: &mut R, shape: &[usize], axis: usize)
where
    R: RecordSet,
    R::Record: Ord,
{
    sort_axis_impl(set, shape, axis, &mut |a, b| a.lt(b));
}

/// Sorts `set` along `axis` of the row-major `shape` with a comparator
/// function.
///
/// The comparator must define a total ordering on the records; records that
/// compare equal keep their relative input order within each lane.
#[inline]
pub fn sort_axis_by<R, F>(set: &mut R, shape: &[usize], axis: usize, mut compare: F)
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> Ordering,
{
    sort_axis_impl(set, shape, axis, &mut |a, b| compare(a, b) == Ordering::Less);
}

#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn sort_axis_impl<R, F>(set: &mut R, shape: &[usize], axis: usize, is_less: &mut F)
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    assert!(axis < shape.len(), "sort axis {axis} out of range for rank {}", shape.len());
    assert_eq!(
        shape.iter().product::<usize>(),
        set.len(),
        "shape does not match the record count"
    );

    let strides = row_major_strides(shape);

    // One lane per combination of the non-sort-axis indices. The combinations
    // are enumerated as a mixed-radix ordinal; the order is arbitrary but
    // deterministic, as each lane sorts independently.
    let lane_count: usize = shape
        .iter()
        .enumerate()
        .filter(|&(dim, _)| dim != axis)
        .map(|(_, &extent)| extent)
        .product();

    for ordinal in 0..lane_count {
        let lane = lane_for(shape, &strides, axis, ordinal);
        if sort_lane(set, lane, is_less) == Bank::Scratch {
            copy_lane_to_output(set, lane);
        }
    }
}

/// Element strides of a row-major layout: the last axis is contiguous.
fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for dim in (0..shape.len().saturating_sub(1)).rev() {
        strides[dim] = strides[dim + 1] * shape[dim + 1];
    }
    strides
}

/// Decodes `ordinal` into one index per non-sort axis and accumulates the
/// lane's base offset. The sort axis contributes the lane stride and length.
fn lane_for(shape: &[usize], strides: &[usize], axis: usize, mut ordinal: usize) -> Lane {
    let mut base = 0;
    for dim in (0..shape.len()).rev() {
        if dim == axis {
            continue;
        }
        base += (ordinal % shape[dim]) * strides[dim];
        ordinal /= shape[dim];
    }

    Lane {
        base,
        stride: strides[axis],
        len: shape[axis],
    }
}

/// Copies one lane from the scratch bank into the output bank.
fn copy_lane_to_output<R: RecordSet>(set: &mut R, lane: Lane) {
    for i in 0..lane.len {
        let record = set.load(Bank::Scratch, lane.offset(i));
        set.store(Bank::Output, lane.offset(i), record);
    }
}
