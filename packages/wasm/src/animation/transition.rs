//! Carrying on-screen state from a previous flat list into a new one.
//!
//! Nodes are matched by `(label, depth)` by default, taking the first old
//! entry that matches. Labels need not be unique, so no key index is built
//! and first-match order is part of the contract. The cost is O(n·m), which
//! is fine for treemap-sized inputs.
//!
//! Old entries with no counterpart are simply dropped. A caller that wants
//! removed nodes to fade out keeps them in the next tree with value 0.

use serde::{Deserialize, Serialize};

use crate::hierarchy::LayoutRect;

/// How new entries find their previous counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    /// First old entry with the same label at the same depth.
    #[default]
    LabelDepth,
    /// Entries carrying an id match on id; entries without one fall back to
    /// `LabelDepth`.
    StableId,
}

/// Reset every entry so it fades in from its target geometry.
pub fn prepare_fade_in(rects: &mut [LayoutRect]) {
    for rect in rects {
        rect.current = rect.target;
        rect.current_color = rect.target_color;
        rect.current_alpha = 0.0;
    }
}

/// Copy current rectangle, color and alpha from matching `old` entries into
/// `new` entries. Target fields are left untouched.
///
/// Returns the number of matched entries.
pub fn seed_from_previous(
    new: &mut [LayoutRect],
    old: &[LayoutRect],
    strategy: MatchStrategy,
) -> usize {
    let mut matched = 0;

    for rect in new.iter_mut() {
        let Some(prev) = find_match(rect, old, strategy) else {
            continue;
        };
        rect.current = prev.current;
        rect.current_color = prev.current_color;
        rect.current_alpha = prev.current_alpha;
        matched += 1;
    }

    tracing::trace!(
        matched,
        entering = new.len() - matched,
        previous = old.len(),
        "seeded transition"
    );
    matched
}

fn find_match<'a>(
    rect: &LayoutRect,
    old: &'a [LayoutRect],
    strategy: MatchStrategy,
) -> Option<&'a LayoutRect> {
    if strategy == MatchStrategy::StableId {
        if let Some(id) = rect.id.as_deref() {
            return old.iter().find(|o| o.id.as_deref() == Some(id));
        }
    }
    old.iter()
        .find(|o| o.depth == rect.depth && o.label == rect.label)
}
