//! Chaining several snap strategies into one

use std::fmt;

use log::{trace, warn};

use super::{SnapError, SnapOrientation, SnapRequest, SnapStrategy};
use crate::geometry::{BoundingBox, Point};

/// Runs a fixed, ordered list of strategies as a single strategy
///
/// Each delegate sees the mask left by the one before it. The chain stops as
/// soon as no axis remains free, so later delegates are not consulted at all.
/// Because the compound is itself a [`SnapStrategy`], chains can be nested.
pub struct CompoundSnapStrategy {
    delegates: Vec<Box<dyn SnapStrategy>>,
}

impl CompoundSnapStrategy {
    /// Build a chain. Order is significant: earlier delegates win.
    pub fn new(delegates: Vec<Box<dyn SnapStrategy>>) -> Result<Self, SnapError> {
        if delegates.is_empty() {
            return Err(SnapError::EmptyChain);
        }
        Ok(Self { delegates })
    }

    /// Number of delegates; always at least one
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn run<F>(&self, orientation: SnapOrientation, mut step: F) -> SnapOrientation
    where
        F: FnMut(&dyn SnapStrategy, SnapOrientation) -> SnapOrientation,
    {
        let mut remaining = orientation;
        for (index, delegate) in self.delegates.iter().enumerate() {
            if remaining.is_none() {
                trace!(
                    "snap chain closed after {} of {} strategies",
                    index,
                    self.delegates.len()
                );
                break;
            }
            let returned = step(delegate.as_ref(), remaining);
            remaining = narrow(remaining, returned, index);
        }
        remaining
    }
}

/// A delegate may only clear bits; anything it tries to reopen is dropped.
fn narrow(current: SnapOrientation, returned: SnapOrientation, index: usize) -> SnapOrientation {
    let reopened = returned - current;
    if !reopened.is_empty() {
        warn!(
            "snap strategy #{} tried to reopen {:?}; ignoring",
            index, reopened
        );
    }
    returned & current
}

impl SnapStrategy for CompoundSnapStrategy {
    fn snap_rectangle(
        &self,
        request: &mut SnapRequest,
        base: &BoundingBox,
        selection: &mut BoundingBox,
        can_resize: bool,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        self.run(orientation, |delegate, remaining| {
            delegate.snap_rectangle(request, base, selection, can_resize, remaining)
        })
    }

    fn snap_point(
        &self,
        request: &mut SnapRequest,
        location: &mut Point,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        self.run(orientation, |delegate, remaining| {
            delegate.snap_point(request, location, remaining)
        })
    }
}

impl fmt::Debug for CompoundSnapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundSnapStrategy")
            .field("delegates", &self.delegates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clears a fixed set of bits and counts how often it was asked
    struct Clearing {
        clears: SnapOrientation,
        calls: Rc<Cell<usize>>,
    }

    impl Clearing {
        fn new(clears: SnapOrientation) -> (Box<dyn SnapStrategy>, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            let strategy = Box::new(Self {
                clears,
                calls: Rc::clone(&calls),
            });
            (strategy, calls)
        }
    }

    impl SnapStrategy for Clearing {
        fn snap_rectangle(
            &self,
            _request: &mut SnapRequest,
            _base: &BoundingBox,
            _selection: &mut BoundingBox,
            _can_resize: bool,
            orientation: SnapOrientation,
        ) -> SnapOrientation {
            self.calls.set(self.calls.get() + 1);
            orientation - self.clears
        }

        fn snap_point(
            &self,
            _request: &mut SnapRequest,
            location: &mut Point,
            orientation: SnapOrientation,
        ) -> SnapOrientation {
            self.calls.set(self.calls.get() + 1);
            if orientation.contains(SnapOrientation::HORIZONTAL)
                && self.clears.contains(SnapOrientation::HORIZONTAL)
            {
                location.x = location.x.round();
            }
            orientation - self.clears
        }
    }

    /// Returns every bit regardless of input
    struct Reopening;

    impl SnapStrategy for Reopening {
        fn snap_rectangle(
            &self,
            _request: &mut SnapRequest,
            _base: &BoundingBox,
            _selection: &mut BoundingBox,
            _can_resize: bool,
            _orientation: SnapOrientation,
        ) -> SnapOrientation {
            SnapOrientation::all()
        }
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let err = CompoundSnapStrategy::new(vec![]).unwrap_err();
        assert_eq!(err, SnapError::EmptyChain);
    }

    #[test]
    fn test_each_strategy_clears_one_axis() {
        let (first, first_calls) = Clearing::new(SnapOrientation::HORIZONTAL);
        let (second, second_calls) = Clearing::new(SnapOrientation::VERTICAL);
        let chain = CompoundSnapStrategy::new(vec![first, second]).unwrap();

        let mut request = SnapRequest::default();
        let mut location = Point::new(10.4, 3.0);
        let remaining = chain.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        assert_eq!(remaining, SnapOrientation::NONE);
        assert_eq!(location, Point::new(10.0, 3.0));
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 1);
    }

    #[test]
    fn test_chain_stops_once_closed() {
        let (first, first_calls) = Clearing::new(SnapOrientation::TRANSLATION);
        let (second, second_calls) = Clearing::new(SnapOrientation::VERTICAL);
        let chain = CompoundSnapStrategy::new(vec![first, second]).unwrap();

        let mut request = SnapRequest::default();
        let mut location = Point::new(0.0, 0.0);
        let remaining = chain.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        assert_eq!(remaining, SnapOrientation::NONE);
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_none_orientation_consults_nobody() {
        let (first, first_calls) = Clearing::new(SnapOrientation::HORIZONTAL);
        let chain = CompoundSnapStrategy::new(vec![first]).unwrap();

        let mut request = SnapRequest::default();
        let base = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let mut selection = base;
        let remaining =
            chain.snap_rectangle(&mut request, &base, &mut selection, true, SnapOrientation::NONE);

        assert_eq!(remaining, SnapOrientation::NONE);
        assert_eq!(first_calls.get(), 0);
    }

    #[test]
    fn test_unsnapped_axes_are_returned() {
        let (first, _) = Clearing::new(SnapOrientation::HORIZONTAL);
        let chain = CompoundSnapStrategy::new(vec![first]).unwrap();

        let mut request = SnapRequest::default();
        let base = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let mut selection = base;
        let remaining = chain.snap_rectangle(
            &mut request,
            &base,
            &mut selection,
            false,
            SnapOrientation::TRANSLATION,
        );
        assert_eq!(remaining, SnapOrientation::VERTICAL);
    }

    #[test]
    fn test_reopened_bits_are_dropped() {
        let (after, after_calls) = Clearing::new(SnapOrientation::NONE);
        let chain = CompoundSnapStrategy::new(vec![Box::new(Reopening), after]).unwrap();

        let mut request = SnapRequest::default();
        let mut location = Point::new(0.0, 0.0);
        let remaining = chain.snap_point(&mut request, &mut location, SnapOrientation::VERTICAL);

        assert_eq!(remaining, SnapOrientation::VERTICAL);
        assert_eq!(after_calls.get(), 1);
    }

    #[test]
    fn test_chains_nest() {
        let (inner_first, inner_calls) = Clearing::new(SnapOrientation::HORIZONTAL);
        let inner = CompoundSnapStrategy::new(vec![inner_first]).unwrap();
        let (outer_second, outer_calls) = Clearing::new(SnapOrientation::VERTICAL);
        let outer = CompoundSnapStrategy::new(vec![Box::new(inner), outer_second]).unwrap();
        assert_eq!(outer.len(), 2);

        let mut request = SnapRequest::default();
        let mut location = Point::new(1.6, 0.0);
        let remaining = outer.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        assert_eq!(remaining, SnapOrientation::NONE);
        assert_eq!(location.x, 2.0);
        assert_eq!(inner_calls.get(), 1);
        assert_eq!(outer_calls.get(), 1);
    }
}
