//! Integration tests for the compound snap resolver and the built-in strategies

use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use diagram_graph::snap::{RequestKind, SnapFeedback};
use diagram_graph::{
    BoundingBox, CompoundSnapStrategy, Point, SnapError, SnapOrientation, SnapRequest,
    SnapStrategy, SnapToGeometry, SnapToGrid,
};
use proptest::prelude::*;

/// Clears a fixed mask and counts invocations
struct Recording {
    clears: SnapOrientation,
    calls: Rc<Cell<usize>>,
}

impl SnapStrategy for Recording {
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
}

fn recording(clears: SnapOrientation) -> (Box<dyn SnapStrategy>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let strategy = Box::new(Recording {
        clears,
        calls: Rc::clone(&calls),
    });
    (strategy, calls)
}

#[test]
fn test_two_strategies_close_both_axes() {
    let (s1, c1) = recording(SnapOrientation::HORIZONTAL);
    let (s2, c2) = recording(SnapOrientation::VERTICAL);
    let chain = CompoundSnapStrategy::new(vec![s1, s2]).unwrap();

    let mut request = SnapRequest::default();
    let mut location = Point::new(5.0, 5.0);
    let remaining = chain.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

    assert_eq!(remaining, SnapOrientation::NONE);
    assert_eq!(c1.get(), 1);
    assert_eq!(c2.get(), 1);
}

#[test]
fn test_first_strategy_closing_everything_short_circuits() {
    let (s1, c1) = recording(SnapOrientation::all());
    let (s2, c2) = recording(SnapOrientation::VERTICAL);
    let (s3, c3) = recording(SnapOrientation::HORIZONTAL);
    let chain = CompoundSnapStrategy::new(vec![s1, s2, s3]).unwrap();

    let mut request = SnapRequest::new(RequestKind::Resize);
    let base = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let mut selection = base;
    let remaining = chain.snap_rectangle(
        &mut request,
        &base,
        &mut selection,
        true,
        SnapOrientation::all(),
    );

    assert_eq!(remaining, SnapOrientation::NONE);
    assert_eq!((c1.get(), c2.get(), c3.get()), (1, 0, 0));
}

#[test]
fn test_empty_chain_rejected() {
    assert_eq!(
        CompoundSnapStrategy::new(Vec::new()).unwrap_err(),
        SnapError::EmptyChain
    );
}

#[test]
fn test_geometry_then_grid() {
    let geometry = SnapToGeometry::new(vec![BoundingBox::new(100.0, 100.0, 80.0, 30.0)]);
    let grid = SnapToGrid::square(16.0).unwrap();
    let chain = CompoundSnapStrategy::new(vec![Box::new(geometry), Box::new(grid)]).unwrap();

    let mut request = SnapRequest::default();
    let base = BoundingBox::new(102.5, 261.0, 40.0, 20.0);
    let mut selection = base;
    let remaining = chain.snap_rectangle(
        &mut request,
        &base,
        &mut selection,
        false,
        SnapOrientation::TRANSLATION,
    );

    assert_eq!(remaining, SnapOrientation::NONE);
    // x aligned with the reference's left edge, y left to the grid
    assert_relative_eq!(selection.x, 100.0);
    assert_relative_eq!(selection.y, 256.0);
    assert_eq!(
        request.feedback(),
        &[SnapFeedback {
            orientation: SnapOrientation::HORIZONTAL,
            position: 100.0,
        }]
    );
}

#[test]
fn test_nested_chain_behaves_like_flat_chain() {
    let grid = SnapToGrid::square(10.0).unwrap();
    let inner = CompoundSnapStrategy::new(vec![Box::new(grid.clone())]).unwrap();
    let nested = CompoundSnapStrategy::new(vec![Box::new(inner)]).unwrap();

    let mut request = SnapRequest::default();
    let mut flat_location = Point::new(17.0, 43.0);
    let mut nested_location = flat_location;

    let flat = grid.snap_point(&mut request, &mut flat_location, SnapOrientation::TRANSLATION);
    let deep = nested.snap_point(&mut request, &mut nested_location, SnapOrientation::TRANSLATION);

    assert_eq!(flat, deep);
    assert_eq!(flat_location, nested_location);
    assert_eq!(nested_location, Point::new(20.0, 40.0));
}

/// Clears whatever mask it was built with, including bits it did not receive
struct Arbitrary(u32);

impl SnapStrategy for Arbitrary {
    fn snap_rectangle(
        &self,
        _request: &mut SnapRequest,
        _base: &BoundingBox,
        _selection: &mut BoundingBox,
        _can_resize: bool,
        _orientation: SnapOrientation,
    ) -> SnapOrientation {
        SnapOrientation::from_bits_truncate(self.0)
    }
}

proptest! {
    #[test]
    fn result_is_subset_of_input(
        input in any::<u32>(),
        outputs in prop::collection::vec(any::<u32>(), 1..6),
    ) {
        let input = SnapOrientation::from_bits_truncate(input);
        let strategies: Vec<Box<dyn SnapStrategy>> = outputs
            .iter()
            .map(|&bits| Box::new(Arbitrary(bits)) as Box<dyn SnapStrategy>)
            .collect();
        let chain = CompoundSnapStrategy::new(strategies).unwrap();

        let mut request = SnapRequest::default();
        let base = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let mut selection = base;
        let remaining = chain.snap_rectangle(&mut request, &base, &mut selection, true, input);

        prop_assert!(input.contains(remaining));
    }

    #[test]
    fn calls_stop_after_first_none(clears in prop::collection::vec(0u8..4, 1..6)) {
        let masks = [
            SnapOrientation::NONE,
            SnapOrientation::HORIZONTAL,
            SnapOrientation::VERTICAL,
            SnapOrientation::TRANSLATION,
        ];
        let mut counters = vec![];
        let mut strategies = vec![];
        for &c in &clears {
            let (s, calls) = recording(masks[c as usize]);
            strategies.push(s);
            counters.push(calls);
        }
        let chain = CompoundSnapStrategy::new(strategies).unwrap();

        let mut request = SnapRequest::default();
        let mut location = Point::new(0.0, 0.0);
        chain.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        let mut remaining = SnapOrientation::TRANSLATION;
        for (clear, calls) in clears.iter().zip(&counters) {
            let expected = usize::from(!remaining.is_empty());
            prop_assert_eq!(calls.get(), expected);
            remaining -= masks[*clear as usize];
        }
    }

    #[test]
    fn grid_snapped_point_lies_on_grid(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        spacing in 1.0f64..50.0,
    ) {
        let grid = SnapToGrid::square(spacing).unwrap();
        let mut request = SnapRequest::default();
        let mut location = Point::new(x, y);
        grid.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        prop_assert!((location.x - x).abs() <= spacing / 2.0 + 1e-9);
        prop_assert!((location.y - y).abs() <= spacing / 2.0 + 1e-9);
        let cells = location.x / spacing;
        prop_assert!((cells - cells.round()).abs() < 1e-6);
    }
}
