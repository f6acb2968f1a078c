//! Offset resolution for linear layout.
//!
//! Members are placed in ascending sequence order, each at the lowest offset that is a multiple
//! of its own total length and does not overlap any member placed before it. Because every
//! length is a power of two, a later small member may fill a hole left by the alignment of an
//! earlier larger one:
//!
//! ```text
//! seq 1: u8   -> [0, 1)
//! seq 2: u32  -> [4, 8)     aligned up past byte 1
//! seq 3: u16  -> [2, 4)     fills the hole
//! ```
//!
//! The block length is the smallest power of two covering the highest placed byte.

use crate::{
    model::Member,
    utils::{align_up, is_power_of_two_in_range, next_power_of_two},
    validation::{
        config::MAX_LENGTH,
        report::{ResolvedLayout, ResolvedOffset},
    },
};

/// Resolver for linear layout offsets.
pub struct LinearLayout;

impl LinearLayout {
    /// Places `members` and returns the resolved layout.
    ///
    /// Members whose total length is not a power of two in `1..=MAX_LENGTH` are left out.
    /// Equal sequences keep their input order. The block length is bounded only by the number
    /// of members: callers compare it against their maximum and report members that end
    /// beyond it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // offsets are >= 0
    pub fn resolve<'a>(members: impl IntoIterator<Item = &'a Member>) -> ResolvedLayout {
        let mut members: Vec<&Member> = members
            .into_iter()
            .filter(|member| {
                is_power_of_two_in_range(member.total_length(), 1, i64::from(MAX_LENGTH))
            })
            .collect();
        members.sort_by_key(|member| member.sequence);

        let mut placed: Vec<(i64, i64)> = Vec::with_capacity(members.len());
        let mut offsets = Vec::with_capacity(members.len());
        let mut end = 0_i64;

        for member in members {
            let length = member.total_length();
            let mut candidate = 0_i64;

            while let Some(&(_, blocking_end)) = placed
                .iter()
                .find(|&&(start, stop)| start < candidate + length && candidate < stop)
            {
                candidate = align_up(blocking_end, length);
            }

            placed.push((candidate, candidate + length));
            end = end.max(candidate + length);

            offsets.push(ResolvedOffset {
                name: member.name.clone(),
                sequence: member.sequence,
                offset: candidate as usize,
                length: length as usize,
            });
        }

        ResolvedLayout {
            block_length: next_power_of_two(end) as usize,
            offsets,
        }
    }
}
