//! Check candidate time ranges against a venue's existing ranges.
//!
//! Callers read the existing ranges right before writing and reject the write
//! when a collision comes back. Nothing here guards against a concurrent
//! writer inserting between the read and the write.

use serde::Serialize;

use crate::overlap::overlaps;
use crate::time::TimeRange;

/// Outcome of checking one candidate range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionCheck {
    pub has_collision: bool,
    /// The first existing range that overlaps the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_range: Option<TimeRange>,
}

/// Outcome of checking a batch of candidate ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCollisionCheck {
    pub has_collision: bool,
    /// Every conflict found, in discovery order. Not deduplicated.
    pub conflicting_ranges: Vec<TimeRange>,
}

/// Find the first range in `existing` that overlaps `new_range`.
///
/// The scan stops at the first hit, so the order of `existing` decides which
/// conflict is reported when there are several.
pub fn check_collision(new_range: &TimeRange, existing: &[TimeRange]) -> CollisionCheck {
    match existing.iter().find(|range| overlaps(new_range, range)) {
        Some(conflict) => {
            tracing::debug!(candidate = %new_range, existing = %conflict, "time range collision");
            CollisionCheck {
                has_collision: true,
                conflicting_range: Some(conflict.clone()),
            }
        }
        None => CollisionCheck {
            has_collision: false,
            conflicting_range: None,
        },
    }
}

/// Check a batch of candidate ranges against `existing` and against each other.
///
/// First every candidate is checked against `existing`, collecting the
/// conflicting existing range. Then every pair `(i, j)` with `i < j` inside
/// `new_ranges` is compared, and `new_ranges[j]` is collected when the pair
/// overlaps.
pub fn check_multiple_collisions(
    new_ranges: &[TimeRange],
    existing: &[TimeRange],
) -> MultiCollisionCheck {
    let mut conflicting_ranges = Vec::new();

    for candidate in new_ranges {
        if let Some(conflict) = check_collision(candidate, existing).conflicting_range {
            conflicting_ranges.push(conflict);
        }
    }

    for (i, a) in new_ranges.iter().enumerate() {
        for b in &new_ranges[i + 1..] {
            if overlaps(a, b) {
                tracing::debug!(first = %a, second = %b, "collision within batch");
                conflicting_ranges.push(b.clone());
            }
        }
    }

    MultiCollisionCheck {
        has_collision: !conflicting_ranges.is_empty(),
        conflicting_ranges,
    }
}
