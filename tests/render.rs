use octoplot::{parse_tree, render, Boundary, Octant, Point, RecordingCanvas, RenderError, TreeNode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Builds a full tree of the given depth with random points in every node.
fn random_tree(rng: &mut StdRng, boundary: Boundary, depth: usize) -> TreeNode {
    let min = boundary.min();
    let max = boundary.max();
    let count = rng.gen_range(0..4);
    let points = (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(min.x..max.x),
                rng.gen_range(min.y..max.y),
                rng.gen_range(min.z..max.z),
            )
        })
        .collect();

    if depth == 0 {
        return TreeNode::leaf(boundary, points);
    }
    let children = Octant::ALL.map(|o| random_tree(rng, o.boundary_within(&boundary), depth - 1));
    TreeNode::with_children(boundary, points, children)
}

fn sorted(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
    points
}

#[test]
fn test_single_leaf_scenario() {
    let text = r#"{"boundary":{"center":{"x":0,"y":0,"z":0},"half_size":10},"points":[{"x":1,"y":1,"z":1}],"divided":false}"#;
    let tree = parse_tree(text).unwrap();

    let mut canvas = RecordingCanvas::new();
    let mut visited = Vec::new();
    render(tree.as_ref(), &mut canvas, &mut visited).unwrap();

    assert_eq!(canvas.count_boxes(), 1);
    let faces = canvas.boxes().next().unwrap();
    for face in faces {
        for corner in face {
            assert_eq!(corner.x.abs(), 10.0);
            assert_eq!(corner.y.abs(), 10.0);
            assert_eq!(corner.z.abs(), 10.0);
        }
    }

    let markers: Vec<&Point> = canvas.points().collect();
    assert_eq!(markers, vec![&Point::new(1.0, 1.0, 1.0)]);
    assert_eq!(visited.len(), 1);
}

#[test]
fn test_each_box_has_eight_distinct_corners() {
    let mut rng = StdRng::seed_from_u64(7);
    let tree = random_tree(&mut rng, Boundary::new(Point::new(5.0, -5.0, 0.0), 64.0), 2);

    let mut canvas = RecordingCanvas::new();
    render(Some(&tree), &mut canvas, &mut Vec::new()).unwrap();

    for faces in canvas.boxes() {
        let mut corners: Vec<Point> = Vec::new();
        for corner in faces.iter().flatten() {
            if !corners.contains(corner) {
                corners.push(*corner);
            }
        }
        assert_eq!(corners.len(), 8, "A box should span exactly 8 corners");
    }
}

#[test]
fn test_counts_match_tree() {
    let mut rng = StdRng::seed_from_u64(42);
    let tree = random_tree(&mut rng, Boundary::new(Point::new(0.0, 0.0, 0.0), 100.0), 3);
    let stats = tree.stats();

    let mut canvas = RecordingCanvas::new();
    let mut visited = Vec::new();
    render(Some(&tree), &mut canvas, &mut visited).unwrap();

    // 1 + 8 + 64 + 512 nodes
    assert_eq!(stats.nodes, 585);
    assert_eq!(canvas.count_boxes(), stats.nodes);
    assert_eq!(canvas.count_points(), stats.points);
    assert_eq!(visited.len(), stats.points);
}

#[test]
fn test_boxes_in_preorder() {
    let root_bounds = Boundary::new(Point::new(0.0, 0.0, 0.0), 8.0);
    let mut rng = StdRng::seed_from_u64(1);
    let tree = random_tree(&mut rng, root_bounds, 2);

    let mut canvas = RecordingCanvas::new();
    render(Some(&tree), &mut canvas, &mut Vec::new()).unwrap();

    let mut expected = vec![root_bounds.faces()];
    for octant in Octant::ALL {
        let child = octant.boundary_within(&root_bounds);
        expected.push(child.faces());
        for grandchild in Octant::ALL {
            expected.push(grandchild.boundary_within(&child).faces());
        }
    }
    let drawn: Vec<_> = canvas.boxes().copied().collect();
    assert_eq!(drawn, expected);
}

#[test]
fn test_undivided_node_does_not_recurse() {
    let bounds = Boundary::new(Point::new(0.0, 0.0, 0.0), 4.0);
    let children = Octant::ALL.map(|o| TreeNode::leaf(o.boundary_within(&bounds), vec![Point::new(1.0, 1.0, 1.0)]));
    let mut tree = TreeNode::with_children(bounds, Vec::new(), children);
    tree.divided = false;

    let mut canvas = RecordingCanvas::new();
    let mut visited = Vec::new();
    render(Some(&tree), &mut canvas, &mut visited).unwrap();

    assert_eq!(canvas.count_boxes(), 1);
    assert!(visited.is_empty());
}

#[test]
fn test_divided_without_children_is_malformed() {
    let text = r#"{
        "boundary": {"center": {"x": 0, "y": 0, "z": 0}, "half_size": 2},
        "points": [{"x": 0.5, "y": 0.5, "z": 0.5}],
        "divided": true
    }"#;
    let tree = parse_tree(text).unwrap();

    let mut canvas = RecordingCanvas::new();
    let mut visited = Vec::new();
    let result = render(tree.as_ref(), &mut canvas, &mut visited);

    assert!(matches!(result, Err(RenderError::MalformedNode { .. })));
    assert_eq!(canvas.count_boxes(), 1);
    assert_eq!(visited.len(), 1);
}

#[test]
fn test_render_is_repeatable() {
    let mut rng = StdRng::seed_from_u64(2024);
    let tree = random_tree(&mut rng, Boundary::new(Point::new(0.0, 0.0, 0.0), 50.0), 2);

    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut canvas_a = RecordingCanvas::new();
    let mut canvas_b = RecordingCanvas::new();
    render(Some(&tree), &mut canvas_a, &mut first).unwrap();
    render(Some(&tree), &mut canvas_b, &mut second).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(sorted(first), sorted(second));
    assert_eq!(canvas_a.primitives, canvas_b.primitives);
}

#[test]
fn test_accumulator_spans_calls() {
    let leaf = TreeNode::leaf(
        Boundary::new(Point::new(0.0, 0.0, 0.0), 1.0),
        vec![Point::new(0.0, 0.0, 0.0), Point::new(0.1, 0.1, 0.1)],
    );

    let mut visited = Vec::new();
    let mut canvas = RecordingCanvas::new();
    render(Some(&leaf), &mut canvas, &mut visited).unwrap();
    render(Some(&leaf), &mut canvas, &mut visited).unwrap();

    // Points are not deduplicated.
    assert_eq!(visited.len(), 4);
}

#[test]
fn test_deep_tree_does_not_overflow() {
    // A chain 10_000 levels deep: each divided node has seven empty leaves
    // and one divided child.
    let mut node = TreeNode::leaf(Boundary::new(Point::new(0.0, 0.0, 0.0), 1.0), vec![Point::new(0.0, 0.0, 0.0)]);
    for _ in 0..10_000 {
        let b = node.boundary;
        let mut children = Octant::ALL.map(|o| TreeNode::leaf(o.boundary_within(&b), Vec::new()));
        children[0] = node;
        node = TreeNode::with_children(b, Vec::new(), children);
    }

    let mut canvas = RecordingCanvas::new();
    let mut visited = Vec::new();
    render(Some(&node), &mut canvas, &mut visited).unwrap();

    assert_eq!(canvas.count_boxes(), 10_000 * 8 + 1);
    assert_eq!(visited.len(), 1);

    drop(node);
}
