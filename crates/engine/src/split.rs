//! Even splitting of an item price across its participants.
//!
//! Plain integer division cannot keep the per-item sum invariant (splitting
//! 50.99 two ways loses a cent), so the remainder of `price % n` cents is
//! handed out one cent each to the first `price % n` participants. The
//! resulting shares always sum to exactly the price.

use crate::MoneyCents;

/// Splits `price` evenly across `participant_count` shares.
///
/// Returns one amount per participant, in participant order; the first
/// `price % n` shares carry one extra cent. An empty participant set yields
/// no shares (callers decide whether that is an error).
pub(crate) fn split_evenly(price: MoneyCents, participant_count: usize) -> Vec<MoneyCents> {
    if participant_count == 0 {
        return Vec::new();
    }
    let count = participant_count as i64;
    let base = price.cents().div_euclid(count);
    let remainder = price.cents().rem_euclid(count);
    (0..count)
        .map(|position| MoneyCents::new(base + i64::from(position < remainder)))
        .collect()
}
