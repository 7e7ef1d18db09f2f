//! Bottom-up stable merge sort over one lane of a record set.
//!
//! The engine is built from primitive loads, stores, comparisons, and loops
//! only: no recursion, no allocation, no call into an existing sort routine.
//! Short blocks are insertion sorted from the input buffers into the output
//! bank, then pairs of sorted runs of doubling length are merged back and
//! forth between the output and scratch banks. [`sort_lane`] reports the bank
//! the fully sorted lane ended up in.

use crate::record::{Bank, Lane, RecordSet};

/// Lanes up to this length are handled by the insertion sort alone, and the
/// merge passes seed their runs at this block length.
///
/// This is a tuning parameter, not a correctness requirement; use
/// [`sort_lane_with_block`] to override it.
pub const MAX_INSERTION: usize = 16;

////////////////////////////////////////////////////////////////////////////////
// Binary search locator
////////////////////////////////////////////////////////////////////////////////

/// Finds the insertion index for `pivot` within the sorted lane range
/// `[lo, hi)` of `bank`.
///
/// Returns the first index whose element the pivot strictly precedes, so a
/// pivot equal to existing elements is placed after them. Together with the
/// tie rule of `merge` this keeps the sort stable end to end.
///
/// `is_less(a, b)` must answer "does `a` strictly precede `b`"; the pivot is
/// always passed as the first argument. Never reads outside `[lo, hi)`.
fn insertion_point<R, F>(
    set: &R,
    lane: Lane,
    bank: Bank,
    lo: usize,
    hi: usize,
    pivot: &R::Record,
    is_less: &mut F,
) -> usize
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    let mut left = lo;
    let mut right = hi;

    while left < right {
        let mid = (left + right) >> 1;
        let probe = set.load(bank, lane.offset(mid));
        if is_less(pivot, &probe) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }

    left
}

////////////////////////////////////////////////////////////////////////////////
// Insertion sort stage
////////////////////////////////////////////////////////////////////////////////

/// Sorts the lane range `[lo, hi)` from the input buffers into the output
/// bank. Stable: records that compare equal keep their input order.
///
/// Each record is located in the already-sorted output prefix via binary
/// search, the tail of the prefix is shifted one slot to the right back to
/// front (a backward memmove over load/store primitives), and the record is
/// stored into the gap.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn insertion_sort<R, F>(set: &mut R, lane: Lane, lo: usize, hi: usize, is_less: &mut F)
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    debug_assert!(lo < hi && hi <= lane.len);

    // The first record is trivially sorted.
    let first = set.load_input(lane.offset(lo));
    set.store(Bank::Output, lane.offset(lo), first);

    for start in lo + 1..hi {
        let pivot = set.load_input(lane.offset(start));
        let index = insertion_point(set, lane, Bank::Output, lo, start, &pivot, is_less);

        // Shift [index, start) one slot right, back to front so no record is
        // overwritten before it has been moved.
        let mut i = start;
        while i > index {
            let moved = set.load(Bank::Output, lane.offset(i - 1));
            set.store(Bank::Output, lane.offset(i), moved);
            i -= 1;
        }

        set.store(Bank::Output, lane.offset(index), pivot);
    }
}

////////////////////////////////////////////////////////////////////////////////
// Pairwise merge stage
////////////////////////////////////////////////////////////////////////////////

/// Merges the sorted lane ranges `[lo, mid)` and `[mid, hi)` of the `read`
/// bank into `[lo, hi)` of the opposite bank.
///
/// The right element is emitted only when it strictly precedes the left one;
/// ties go to the left run, so records that compare equal keep their relative
/// order across the merge. Both input ranges must already be sorted.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn merge<R, F>(
    set: &mut R,
    lane: Lane,
    read: Bank,
    lo: usize,
    mid: usize,
    hi: usize,
    is_less: &mut F,
) where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    debug_assert!(lo <= mid && mid <= hi && hi <= lane.len);

    let write = read.other();
    let mut i_out = lo;
    let mut i0 = lo;
    let mut i1 = mid;

    while i0 < mid && i1 < hi {
        let left = set.load(read, lane.offset(i0));
        let right = set.load(read, lane.offset(i1));

        // Consume the lesser side. If equal, prefer the left run to maintain
        // stability.
        if is_less(&right, &left) {
            set.store(write, lane.offset(i_out), right);
            i1 += 1;
        } else {
            set.store(write, lane.offset(i_out), left);
            i0 += 1;
        }
        i_out += 1;
    }

    // At most one of the runs has leftover records; copy them verbatim. A run
    // with no partner (mid == hi) lands here directly, which is what carries
    // it into the write bank for the next pass.
    let (mut rest, rest_end) = if i0 < mid { (i0, mid) } else { (i1, hi) };
    while rest < rest_end {
        let leftover = set.load(read, lane.offset(rest));
        set.store(write, lane.offset(i_out), leftover);
        rest += 1;
        i_out += 1;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Bottom-up orchestrator
////////////////////////////////////////////////////////////////////////////////

/// Sorts one lane, seeding runs of [`MAX_INSERTION`] records.
///
/// Returns the bank holding the sorted lane: [`Bank::Output`] after an even
/// number of merge passes (including none), [`Bank::Scratch`] after an odd
/// number. The caller is responsible for copying the lane back when the
/// result ends up in scratch; [`crate::axis::sort_axis_by`] does exactly
/// that.
#[inline]
pub fn sort_lane<R, F>(set: &mut R, lane: Lane, is_less: &mut F) -> Bank
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    sort_lane_with_block(set, lane, MAX_INSERTION, is_less)
}

/// [`sort_lane`] with an explicit insertion-sort block length.
///
/// `block` must be at least 1. A lane of up to `block` records never enters
/// the merge loop and is reported in [`Bank::Output`].
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn sort_lane_with_block<R, F>(set: &mut R, lane: Lane, block: usize, is_less: &mut F) -> Bank
where
    R: RecordSet,
    F: FnMut(&R::Record, &R::Record) -> bool,
{
    assert!(block > 0);

    let size = lane.len;

    // Sort each block of `block` records from the input buffers into the
    // output bank. An empty lane skips both this and the merge loop.
    let mut start = 0;
    while start < size {
        let end = usize::min(start + block, size);
        insertion_sort(set, lane, start, end, is_less);
        start = end;
    }

    // Merge pairs of adjacent runs of doubling length, ping-ponging between
    // the banks. `read` doubles as the parity bit: it names the bank the
    // latest complete pass wrote, which after the loop is where the sorted
    // lane lives.
    let mut run_len = block;
    let mut read = Bank::Output;
    while run_len < size {
        let mut start = 0;
        while start < size {
            let mid = usize::min(start + run_len, size);
            let end = usize::min(start + 2 * run_len, size);
            merge(set, lane, read, start, mid, end, is_less);
            start = end;
        }

        read = read.other();
        run_len *= 2;
    }

    read
}
