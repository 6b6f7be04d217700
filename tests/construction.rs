use octopart::{BoundingBox, BuildError, Octree, OctreeConfig, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn cube(side: f64) -> BoundingBox {
    BoundingBox::new([0.0, 0.0, 0.0], [side, side, side])
}

fn random_points(rng: &mut StdRng, count: usize, side: f64) -> Vec<Point> {
    (0..count)
        .map(|_| [rng.gen_range(0.0..side), rng.gen_range(0.0..side), rng.gen_range(0.0..side)])
        .collect()
}

fn sorted(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    points
}

fn assert_shape(tree: &Octree, capacity: usize) {
    for (_, node) in tree.iter() {
        match node.children() {
            None => assert!(node.objects().len() <= capacity, "Leaf holds {} points", node.objects().len()),
            Some(children) => assert_eq!(children.len(), 8),
        }
    }
}

#[test]
fn test_small_input_is_single_leaf() {
    let points = vec![[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [5.0, 5.0, 5.0]];
    let tree = Octree::build(cube(8.0), &points).unwrap();

    assert!(tree.is_leaf());
    assert!(tree.children().is_none());
    assert_eq!(tree.objects(), points.as_slice());
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_eight_points_stay_in_leaf() {
    let points: Vec<Point> = (0..8).map(|i| [i as f64, 0.0, 0.0]).collect();
    let tree = Octree::build(cube(8.0), &points).unwrap();
    assert!(tree.is_leaf());
    assert_eq!(tree.objects().len(), 8);
}

#[test]
fn test_empty_input() {
    let tree = Octree::build(cube(8.0), &[]).unwrap();
    assert!(tree.is_leaf());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_nine_points_are_recovered() {
    let points: Vec<Point> = vec![
        [0.0, 0.0, 0.0],
        [7.0, 0.0, 0.0],
        [0.0, 7.0, 0.0],
        [0.0, 0.0, 7.0],
        [7.0, 7.0, 7.0],
        [3.0, 3.0, 3.0],
        [4.0, 4.0, 4.0],
        [1.0, 6.0, 2.0],
        [6.0, 1.0, 5.0],
    ];
    let tree = Octree::build(cube(8.0), &points).unwrap();

    assert!(!tree.is_leaf());
    assert_eq!(tree.len(), 9);
    let collected: Vec<Point> = tree.points().copied().collect();
    assert_eq!(sorted(collected), sorted(points));
}

#[test]
fn test_no_point_lost_or_duplicated() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut points = random_points(&mut rng, 3000, 64.0);
    // Points outside the root region end up in the root's overflow bucket.
    points.push([-10.0, 3.0, 3.0]);
    points.push([70.0, 70.0, 70.0]);
    // Duplicates below capacity are fine.
    points.push(points[0]);
    points.push(points[0]);

    let tree = Octree::build(cube(64.0), &points).unwrap();
    let collected: Vec<Point> = tree.points().copied().collect();
    assert_eq!(collected.len(), points.len());
    assert_eq!(sorted(collected), sorted(points));
    assert!(tree.objects().contains(&[-10.0, 3.0, 3.0]));
    assert!(tree.objects().contains(&[70.0, 70.0, 70.0]));
    assert_shape(&tree, 8);
}

#[test]
fn test_internal_nodes_have_eight_children_even_if_empty() {
    // All points fit the first octant, the other seven become empty leaves.
    let points: Vec<Point> = (0..9).map(|i| [0.0, 0.0, i as f64 * 0.25]).collect();
    let tree = Octree::build(cube(8.0), &points).unwrap();
    let children = tree.children().unwrap();
    assert_eq!(children[0].len(), 9);
    for child in &children[1..] {
        assert!(child.is_leaf());
        assert!(child.is_empty());
    }
}

#[test]
fn test_rebuild_is_identical() {
    let mut rng = StdRng::seed_from_u64(2);
    let points = random_points(&mut rng, 2000, 32.0);
    let a = Octree::build(cube(32.0), &points).unwrap();
    let b = Octree::build(cube(32.0), &points).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_parallel_build_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = random_points(&mut rng, 20_000, 100.0);
    let sequential = Octree::build(cube(100.0), &points).unwrap();
    let parallel = Octree::par_build(cube(100.0), &points).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_coincident_points_are_reported() {
    let points = vec![[2.0, 2.0, 2.0]; 20];
    let result = Octree::build(cube(16.0), &points);
    assert!(matches!(result, Err(BuildError::CoincidentPoints { depth: 0, count: 20, .. })), "Got {:?}", result);

    let result = Octree::par_build(cube(16.0), &points);
    assert!(matches!(result, Err(BuildError::CoincidentPoints { depth: 0, count: 20, .. })), "Got {:?}", result);
}

#[test]
fn test_distinct_cells_in_huge_region() {
    let side = 2f64.powi(40);
    let points: Vec<Point> = (0..9).map(|i| [i as f64, 0.0, 0.0]).collect();
    let tree = Octree::build(cube(side), &points).unwrap();
    assert_eq!(tree.len(), 9);
    assert_shape(&tree, 8);
    assert!(tree.depth() > 32);
    for p in &points {
        assert!(tree.contains_point(p));
    }

    let parallel = Octree::par_build(cube(side), &points).unwrap();
    assert_eq!(tree, parallel);
}

#[test]
fn test_depth_limit_is_configurable() {
    let points: Vec<Point> = (0..9).map(|i| [i as f64, 0.0, 0.0]).collect();
    assert!(Octree::build(cube(64.0), &points).is_ok());

    let config = OctreeConfig::default().with_max_depth(2);
    match Octree::build_with(cube(64.0), &points, &config) {
        Err(BuildError::DepthExceeded { depth, count, region }) => {
            assert_eq!(depth, 2);
            assert_eq!(count, 9);
            assert_eq!(region.size(), [16.0, 16.0, 16.0]);
        }
        other => panic!("Expected depth error, got {:?}", other),
    }
}

#[test]
fn test_capacity_is_configurable() {
    let points = vec![[0.0, 0.0, 0.0], [3.0, 3.0, 3.0]];
    let config = OctreeConfig::default().with_capacity(1);
    let tree = Octree::build_with(cube(4.0), &points, &config).unwrap();
    assert!(!tree.is_leaf());
    assert_shape(&tree, 1);
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_from_flat() {
    let coords = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    let tree = Octree::from_flat(cube(4.0), &coords).unwrap();
    assert_eq!(tree.objects(), &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
}

#[test]
fn test_from_flat_rejects_partial_triple() {
    let coords = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 9.0];
    let result = Octree::from_flat(cube(4.0), &coords);
    assert_eq!(result, Err(BuildError::PartialTriple { len: 7 }));
}

#[test]
fn test_locate_finds_every_point() {
    let mut rng = StdRng::seed_from_u64(4);
    let points = random_points(&mut rng, 1500, 40.0);
    let tree = Octree::build(cube(40.0), &points).unwrap();

    for p in &points {
        assert!(tree.locate(p).objects().contains(p), "Point {:?} not at its located node", p);
        assert!(tree.contains_point(p));
    }
    assert!(!tree.contains_point(&[-5.0, -5.0, -5.0]));
}
