use screenlens::config::IconFilterConfig;
use screenlens::filter::{filter_by_size_and_aspect, filter_overlapping};
use screenlens::geometry::BoundingBox;

fn bbox(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> BoundingBox {
    BoundingBox::new(x_min, y_min, x_max, y_max).unwrap()
}

#[test]
fn test_overlap_ratio_reflexive_and_disjoint() {
    let a = bbox(3, 7, 45, 91);
    assert_eq!(a.overlap_ratio(&a), 1.0);

    let b = bbox(100, 100, 120, 120);
    assert_eq!(a.overlap_ratio(&b), 0.0);
}

#[test]
fn test_filter_overlapping_identity_without_text() {
    let components = vec![bbox(0, 0, 10, 10), bbox(5, 5, 25, 25), bbox(90, 90, 95, 99)];
    let result = filter_overlapping(components.clone(), &[], 0.9).unwrap();
    assert_eq!(result, components);
}

#[test]
fn test_filter_overlapping_is_a_subsequence() {
    let components: Vec<BoundingBox> = (0..10)
        .map(|i| bbox(i * 20, 0, i * 20 + 10, 10))
        .collect();
    // Knock out every other component with an exactly covering text box.
    let texts: Vec<BoundingBox> = (0..10)
        .step_by(2)
        .map(|i| bbox(i * 20, 0, i * 20 + 10, 10))
        .collect();

    let result = filter_overlapping(components.clone(), &texts, 0.9).unwrap();

    assert_eq!(result.len(), 5);
    // Same relative order as the input, nothing added.
    let mut last_index = None;
    for survivor in &result {
        let index = components.iter().position(|c| c == survivor).unwrap();
        if let Some(last) = last_index {
            assert!(index > last);
        }
        last_index = Some(index);
    }
}

#[test]
fn test_spec_end_to_end_scenario() {
    // components = [{0,0,10,10}, {50,50,60,60}], texts = [{0,0,10,10}],
    // threshold 0.9: only the second component survives.
    let components = vec![bbox(0, 0, 10, 10), bbox(50, 50, 60, 60)];
    let texts = vec![bbox(0, 0, 10, 10)];

    let result = filter_overlapping(components, &texts, 0.9).unwrap();
    assert_eq!(result, vec![bbox(50, 50, 60, 60)]);
}

#[test]
fn test_icon_filter_spec_examples() {
    let filter = IconFilterConfig {
        min_size: 10,
        max_size: 50,
        max_aspect_ratio: 1.5,
    };

    // 20x20: aspect 1.0, size in range — retained.
    let square = filter_by_size_and_aspect(vec![bbox(0, 0, 20, 20)], &filter).unwrap();
    assert_eq!(square.len(), 1);

    // 200x20: aspect 10.0 — dropped.
    let wide = filter_by_size_and_aspect(vec![bbox(0, 0, 200, 20)], &filter).unwrap();
    assert!(wide.is_empty());
}

#[test]
fn test_icon_filter_idempotent() {
    let filter = IconFilterConfig {
        min_size: 10,
        max_size: 50,
        max_aspect_ratio: 1.5,
    };
    let mixed = vec![
        bbox(0, 0, 20, 20),
        bbox(0, 0, 200, 20),
        bbox(0, 0, 12, 12),
        bbox(5, 5, 5, 5),
        bbox(0, 0, 49, 40),
    ];

    let once = filter_by_size_and_aspect(mixed, &filter).unwrap();
    let twice = filter_by_size_and_aspect(once.clone(), &filter).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_degenerate_box_never_panics_in_size_filter() {
    let filter = IconFilterConfig {
        min_size: 0,
        max_size: 100,
        max_aspect_ratio: 100.0,
    };

    let result = filter_by_size_and_aspect(vec![bbox(5, 5, 5, 5)], &filter).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_malformed_box_fails_the_pass() {
    let malformed = BoundingBox {
        x_min: 50,
        y_min: 0,
        x_max: 10,
        y_max: 10,
    };

    assert!(filter_overlapping(vec![malformed], &[], 0.9).is_err());
    assert!(filter_by_size_and_aspect(
        vec![malformed],
        &IconFilterConfig {
            min_size: 0,
            max_size: 100,
            max_aspect_ratio: 10.0,
        }
    )
    .is_err());
}
