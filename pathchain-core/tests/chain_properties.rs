//! Property tests for chain construction and callback bookkeeping

use pathchain_core::path::{Callbacks, Segments, MAX_CALLBACKS, MAX_PATHS};
use pathchain_core::{
    ChainError, DecelerationType, FollowerConstants, Path, PathCallback, PathChain, Pose,
};
use proptest::prelude::*;

/// Segment with a fixed length and no geometry
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span(f64);

impl Path for Span {
    fn length(&self) -> f64 {
        self.0
    }

    fn pose_at(&self, t: f64) -> Pose {
        Pose::new(self.0 * t, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flag {
    id: usize,
    fired: bool,
}

impl PathCallback for Flag {
    fn reset(&mut self) {
        self.fired = false;
    }

    fn has_fired(&self) -> bool {
        self.fired
    }
}

fn flags(ids: impl IntoIterator<Item = usize>, fired: bool) -> Vec<Flag> {
    ids.into_iter().map(|id| Flag { id, fired }).collect()
}

proptest! {
    #[test]
    fn length_is_sum_of_segments(lengths in prop::collection::vec(0.0f64..1000.0, 0..=MAX_PATHS)) {
        let constants = FollowerConstants::default();
        let chain: PathChain<Span, Flag> =
            PathChain::new(lengths.iter().copied().map(Span), &constants).unwrap();

        let expected: f64 = lengths.iter().sum();
        prop_assert_eq!(chain.size(), lengths.len());
        prop_assert!((chain.length() - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn both_constructors_agree(lengths in prop::collection::vec(0.0f64..1000.0, 0..=MAX_PATHS)) {
        let constants = FollowerConstants::default();
        let from_iter: PathChain<Span, Flag> =
            PathChain::new(lengths.iter().copied().map(Span), &constants).unwrap();

        let segments: Segments<Span> = lengths.iter().copied().map(Span).collect();
        let adopted: PathChain<Span, Flag> = PathChain::from_segments(segments, &constants);

        prop_assert_eq!(from_iter.length(), adopted.length());
        prop_assert_eq!(from_iter.size(), adopted.size());
    }

    #[test]
    fn path_returns_segment_at_index(
        lengths in prop::collection::vec(0.0f64..1000.0, 0..=MAX_PATHS),
        index in 0usize..(2 * MAX_PATHS),
    ) {
        let constants = FollowerConstants::default();
        let chain: PathChain<Span, Flag> =
            PathChain::new(lengths.iter().copied().map(Span), &constants).unwrap();

        match lengths.get(index) {
            Some(&length) => {
                let expected = Span(length);
                prop_assert_eq!(chain.path(index), Ok(&expected));
            }
            None => prop_assert_eq!(
                chain.path(index),
                Err(ChainError::IndexOutOfRange { index, size: lengths.len() })
            ),
        }
    }

    #[test]
    fn append_keeps_existing_then_new(existing in 0usize..=8, added in 0usize..=8) {
        let constants = FollowerConstants::default();
        let mut chain: PathChain<Span, Flag> = PathChain::new([Span(1.0)], &constants).unwrap();

        chain.append_callbacks(flags(0..existing, false)).unwrap();
        chain.append_callbacks(flags(existing..existing + added, false)).unwrap();

        let ids: Vec<usize> = chain.callbacks().iter().map(|c| c.id).collect();
        prop_assert_eq!(ids, (0..existing + added).collect::<Vec<_>>());
    }

    #[test]
    fn replace_discards_existing(existing in 0usize..=MAX_CALLBACKS, added in 0usize..=MAX_CALLBACKS) {
        let constants = FollowerConstants::default();
        let mut chain: PathChain<Span, Flag> = PathChain::new([Span(1.0)], &constants).unwrap();
        chain.append_callbacks(flags(0..existing, true)).unwrap();

        let replacement: Callbacks<Flag> = flags(100..100 + added, false).into_iter().collect();
        chain.replace_callbacks(replacement);

        let ids: Vec<usize> = chain.callbacks().iter().map(|c| c.id).collect();
        prop_assert_eq!(ids, (100..100 + added).collect::<Vec<_>>());
    }

    #[test]
    fn reset_clears_every_callback(fired in prop::collection::vec(any::<bool>(), 0..=MAX_CALLBACKS)) {
        let constants = FollowerConstants::default();
        let mut chain: PathChain<Span, Flag> = PathChain::new([Span(1.0)], &constants).unwrap();
        chain
            .append_callbacks(fired.iter().enumerate().map(|(id, &fired)| Flag { id, fired }))
            .unwrap();

        chain.reset_callbacks();
        prop_assert!(chain.callbacks().iter().all(|c| !c.has_fired()));
        prop_assert_eq!(chain.callbacks().len(), fired.len());
    }

    #[test]
    fn multiplier_copied_from_constants(multiplier in 0.01f64..=1.0) {
        let chain: PathChain<Span, Flag> =
            PathChain::new([Span(2.0)], &FollowerConstants::new(multiplier)).unwrap();

        prop_assert_eq!(chain.deceleration_start_multiplier(), multiplier);
        prop_assert_eq!(chain.deceleration_type(), DecelerationType::LastPath);
    }

    #[test]
    fn deceleration_zone_stays_on_chain(
        lengths in prop::collection::vec(0.0f64..1000.0, 1..=MAX_PATHS),
        multiplier in -2.0f64..3.0,
        global in any::<bool>(),
    ) {
        let constants = FollowerConstants::new(multiplier);
        let mut chain: PathChain<Span, Flag> =
            PathChain::new(lengths.iter().copied().map(Span), &constants).unwrap();
        if global {
            chain.set_deceleration_type(DecelerationType::Global);
        }

        let zone = chain.deceleration_zone().unwrap();
        prop_assert!(zone.start() >= -1e-9);
        prop_assert!(zone.start() <= zone.end());
        prop_assert_eq!(zone.end(), chain.length());
    }
}
