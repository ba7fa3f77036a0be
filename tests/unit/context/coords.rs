use super::*;
use crate::foundation::range::RangeSpec;

fn axis(name: &str, start: i64, end: i64, step: i64) -> AxisRange {
    AxisRange::new(name, RangeSpec::new(start, end, step).unwrap())
}

fn pairs(coords: impl Iterator<Item = Coordinate>) -> Vec<Vec<(String, i64)>> {
    coords
        .map(|c| c.iter().map(|(a, v)| (a.to_string(), v)).collect())
        .collect()
}

#[test]
fn first_axis_is_outermost() {
    let axes = [axis("x", 0, 6, 2), axis("y", 0, 4, 2)];
    let got: Vec<(i64, i64)> = Coordinates::new(&axes)
        .map(|c| (c.get("x").unwrap(), c.get("y").unwrap()))
        .collect();
    assert_eq!(got, vec![(0, 0), (0, 2), (2, 0), (2, 2), (4, 0), (4, 2)]);
}

#[test]
fn single_axis_yields_only_that_axis() {
    let axes = [axis("a", 0, 6, 3)];
    let got: Vec<Coordinate> = Coordinates::new(&axes).collect();
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].get("a"), Some(0));
    assert_eq!(got[1].get("a"), Some(3));
    assert_eq!(got[0].get("x"), None);
    assert_eq!(got[0].len(), 1);
}

#[test]
fn zero_axes_yield_one_empty_coordinate() {
    let mut it = Coordinates::new(&[]);
    let only = it.next().unwrap();
    assert!(only.is_empty());
    assert!(it.next().is_none());
    assert!(it.next().is_none());
    assert_eq!(product_len(&[]), Some(1));
}

#[test]
fn any_empty_axis_empties_the_product() {
    let axes = [axis("x", 0, 3, 1), axis("y", 5, 5, 1), axis("z", 0, 2, 1)];
    assert_eq!(Coordinates::new(&axes).count(), 0);
    assert_eq!(product_len(&axes), Some(0));
}

#[test]
fn three_axes_wrap_like_an_odometer() {
    let axes = [axis("a", 0, 2, 1), axis("b", 10, 7, -1), axis("c", 0, 2, 1)];
    let got: Vec<(i64, i64, i64)> = Coordinates::new(&axes)
        .map(|c| (c.get("a").unwrap(), c.get("b").unwrap(), c.get("c").unwrap()))
        .collect();
    assert_eq!(got.len(), 12);
    assert_eq!(got[0], (0, 10, 0));
    assert_eq!(got[1], (0, 10, 1));
    assert_eq!(got[2], (0, 9, 0));
    assert_eq!(got[5], (0, 8, 1));
    assert_eq!(got[6], (1, 10, 0));
    assert_eq!(got[11], (1, 8, 1));
    assert_eq!(product_len(&axes), Some(12));
}

#[test]
fn passes_are_independent_and_identical() {
    let axes = [axis("x", -3, 3, 2), axis("y", 0, 3, 1)];
    let a = pairs(Coordinates::new(&axes));
    let b = pairs(Coordinates::new(&axes));
    assert_eq!(a, b);
    assert_eq!(a.len(), 9);
}

#[test]
fn short_circuit_consumption_is_lazy() {
    let axes = [
        AxisRange::new("x", RangeSpec::unbounded(0, 1).unwrap()),
        AxisRange::new("y", RangeSpec::unbounded(0, 1).unwrap()),
    ];
    let first: Vec<Coordinate> = Coordinates::new(&axes).take(3).collect();
    assert_eq!(first[2].get("x"), Some(0));
    assert_eq!(first[2].get("y"), Some(2));
    assert_eq!(product_len(&axes), None);
}

#[test]
fn coordinate_serializes_as_ordered_map() {
    let c: Coordinate = [("y", 2), ("x", 4)].into_iter().collect();
    assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"y":2,"x":4}"#);
}
