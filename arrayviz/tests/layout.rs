use arrayviz::layout::{
    caption_y, grid_position, grid_row_y, grid_size, layout, linear_size, linear_x, FlexLayout,
};
use arrayviz::{
    Align, CaptionAlign, Entry, EntryProps, Justify, Metrics, Node, NodeId, Scene, Vec2,
};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}

fn position(scene: &Scene, id: NodeId) -> Vec2 {
    scene.node(id).unwrap().position
}

// ============================================================================
// Container Formulas
// ============================================================================

#[test]
fn test_linear_x_centers_the_row() {
    assert_eq!(linear_x(1, 0, 80.0), 0.0);
    assert_eq!(linear_x(2, 0, 80.0), -40.0);
    assert_eq!(linear_x(2, 1, 80.0), 40.0);
    assert_eq!(linear_x(3, 0, 80.0), -80.0);
    assert_eq!(linear_x(4, 3, 80.0), 120.0);
    assert_eq!(linear_x(7, 0, 80.0), -240.0);
}

#[test]
fn test_linear_x_is_symmetric() {
    for n in 1..10 {
        for i in 0..n {
            let left = linear_x(n, i, 80.0);
            let right = linear_x(n, n - 1 - i, 80.0);
            assert_eq!(left, -right, "n={n} i={i}");
        }
    }
}

#[test]
fn test_linear_size() {
    let m = Metrics::default();
    assert_eq!(linear_size(3, &m), Vec2::new(260.0, 100.0));
    assert_eq!(linear_size(2, &m), Vec2::new(180.0, 100.0));
    assert_eq!(linear_size(0, &m), Vec2::new(20.0, 100.0));
}

#[test]
fn test_grid_formulas() {
    let m = Metrics::default();
    assert_eq!(grid_size(3, 3, &m), Vec2::new(260.0, 260.0));
    assert_eq!(grid_size(2, 4, &m), Vec2::new(340.0, 180.0));
    assert_eq!(grid_row_y(3, 0, 80.0), -80.0);
    assert_eq!(grid_position(3, 3, 2, 1, 80.0), Vec2::new(0.0, 80.0));
    assert_eq!(grid_position(2, 4, 0, 0, 80.0), Vec2::new(-120.0, -40.0));
}

#[test]
fn test_caption_y() {
    let m = Metrics::default();
    assert_eq!(caption_y(CaptionAlign::Top, 100.0, &m), -80.0);
    assert_eq!(caption_y(CaptionAlign::Bottom, 100.0, &m), 80.0);
    assert_eq!(caption_y(CaptionAlign::Top, 260.0, &m), -160.0);
}

// ============================================================================
// Flex Layout
// ============================================================================

#[test]
fn test_row_fit_content() {
    let mut scene = Scene::new();
    let root = scene.root();
    let row = scene
        .spawn(root, Node::group().layout(FlexLayout::row().gap(10.0).fit_content()))
        .unwrap();
    // 0.6 of the font size per column
    let a = scene.spawn(row, Node::text("ab", 10.0)).unwrap();
    let b = scene.spawn(row, Node::text("abcd", 10.0)).unwrap();

    layout(&mut scene).unwrap();

    let size = scene.node(row).unwrap().size;
    assert!(close(size.x, 46.0), "width {}", size.x);
    assert!(close(size.y, 10.0), "height {}", size.y);
    assert!(close(position(&scene, a).x, -17.0));
    assert!(close(position(&scene, b).x, 11.0));
    assert_eq!(position(&scene, a).y, 0.0);
}

#[test]
fn test_column_justify() {
    for (justify, expected) in [
        (Justify::Start, -40.0),
        (Justify::Center, 0.0),
        (Justify::End, 40.0),
    ] {
        let mut scene = Scene::new();
        let root = scene.root();
        let col = scene
            .spawn(
                root,
                Node::rect(Vec2::new(50.0, 100.0)).layout(FlexLayout::column().justify(justify)),
            )
            .unwrap();
        let child = scene
            .spawn(col, Node::rect(Vec2::new(10.0, 20.0)))
            .unwrap();

        layout(&mut scene).unwrap();
        assert_eq!(position(&scene, child).y, expected, "{justify:?}");
    }
}

#[test]
fn test_row_align() {
    for (align, expected) in [
        (Align::Start, -15.0),
        (Align::Center, 0.0),
        (Align::End, 15.0),
    ] {
        let mut scene = Scene::new();
        let root = scene.root();
        let row = scene
            .spawn(
                root,
                Node::rect(Vec2::new(100.0, 50.0)).layout(FlexLayout::row().align(align)),
            )
            .unwrap();
        let child = scene
            .spawn(row, Node::rect(Vec2::new(10.0, 20.0)))
            .unwrap();

        layout(&mut scene).unwrap();
        assert_eq!(position(&scene, child).y, expected, "{align:?}");
    }
}

#[test]
fn test_padding_offsets_first_child() {
    let mut scene = Scene::new();
    let root = scene.root();
    let row = scene
        .spawn(
            root,
            Node::rect(Vec2::new(100.0, 20.0)).layout(FlexLayout::row().padding(10.0)),
        )
        .unwrap();
    let child = scene
        .spawn(row, Node::rect(Vec2::new(20.0, 20.0)))
        .unwrap();

    layout(&mut scene).unwrap();
    assert_eq!(position(&scene, child).x, -30.0);
}

#[test]
fn test_entry_box_layout() {
    let mut scene = Scene::new();
    let root = scene.root();
    let entry = Entry::spawn(&mut scene, root, EntryProps::new(0, 7)).unwrap();

    layout(&mut scene).unwrap();

    let inner = entry.box_node(&scene).unwrap();
    let children = scene.children(inner).unwrap().to_vec();
    let (value, label) = (children[0], children[1]);
    assert_eq!(label, entry.label_node(&scene).unwrap());

    // Value text sits just above the box center, the label below the box.
    let v = position(&scene, value);
    assert!(close(v.x, 0.0));
    assert!(close(v.y, -1.0), "value y {}", v.y);
    let l = position(&scene, label);
    assert!(close(l.y, 62.8), "label y {}", l.y);
    assert_eq!(scene.node(inner).unwrap().size, Vec2::splat(60.0));
}

#[test]
fn test_layout_is_idempotent() {
    let mut scene = Scene::new();
    let root = scene.root();
    let entry = Entry::spawn(&mut scene, root, EntryProps::new(2, "x")).unwrap();
    layout(&mut scene).unwrap();
    let first = scene.absolute_position(entry.label_node(&scene).unwrap()).unwrap();
    layout(&mut scene).unwrap();
    let second = scene.absolute_position(entry.label_node(&scene).unwrap()).unwrap();
    assert_eq!(first, second);
}
