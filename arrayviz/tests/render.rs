use arrayviz::buffer::Cell;
use arrayviz::layout::layout;
use arrayviz::render::render_scene;
use arrayviz::{Array, ArrayProps, Buffer, Color, Node, Rgb, Scene, Vec2, Viewport};

fn render_to_buffer(scene: &Scene, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    render_scene(scene, &mut buf, &Viewport::default()).unwrap();
    buf
}

fn array_scene(values: &[i64]) -> (Scene, Array) {
    let mut scene = Scene::new();
    let root = scene.root();
    let array = Array::spawn(&mut scene, root, ArrayProps::new(values.iter().copied())).unwrap();
    layout(&mut scene).unwrap();
    (scene, array)
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_viewport_projects_center_to_middle() {
    let buf = Buffer::new(80, 24);
    let viewport = Viewport::default();
    assert_eq!(viewport.project(Vec2::ZERO, &buf), (40, 12));
    assert_eq!(viewport.project(Vec2::new(-80.0, -80.0), &buf), (32, 8));

    let moved = viewport.center(Vec2::new(100.0, 0.0));
    assert_eq!(moved.project(Vec2::new(100.0, 0.0), &buf), (40, 12));
}

#[test]
fn test_viewport_rect() {
    let buf = Buffer::new(80, 24);
    let rect = Viewport::default().rect(Vec2::new(-80.0, 0.0), Vec2::splat(60.0), &buf);
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (29, 11, 6, 3));
}

// ============================================================================
// Scene Rendering
// ============================================================================

#[test]
fn test_array_values_and_labels_render() {
    let (scene, _) = array_scene(&[1, 2, 3]);
    let buf = render_to_buffer(&scene, 80, 24);

    assert_eq!(buf.get(32, 12).unwrap().char, '1');
    assert_eq!(buf.get(40, 12).unwrap().char, '2');
    assert_eq!(buf.get(48, 12).unwrap().char, '3');
    // Index labels sit under the body.
    let labels = buf.row_text(15);
    assert_eq!(&labels[32..33], "0");
    assert_eq!(&labels[40..41], "1");
    assert_eq!(&labels[48..49], "2");
}

#[test]
fn test_caption_renders_above_body() {
    let (scene, _) = array_scene(&[1, 2, 3]);
    let buf = render_to_buffer(&scene, 80, 24);

    let row = buf.row_text(8);
    assert!(row.contains("array"), "row: {row:?}");
    assert!(row.contains("[]"), "row: {row:?}");
}

#[test]
fn test_entry_border_and_fills() {
    let (scene, _) = array_scene(&[1, 2, 3]);
    let theme = scene.theme().clone();
    let buf = render_to_buffer(&scene, 80, 24);

    assert_eq!(buf.get(29, 11).unwrap().char, '╭');
    assert_eq!(buf.get(34, 11).unwrap().char, '╮');
    assert_eq!(buf.get(29, 13).unwrap().char, '╰');
    assert_eq!(buf.get(30, 11).unwrap().char, '─');
    assert_eq!(buf.get(29, 12).unwrap().char, '│');

    // Container body between boxes, stage background outside it.
    assert_eq!(buf.get(28, 12).unwrap().bg, theme.surface.to_rgb());
    assert_eq!(buf.get(31, 12).unwrap().bg, theme.background.to_rgb());
    assert_eq!(buf.get(2, 2).unwrap().bg, theme.background.to_rgb());
}

#[test]
fn test_transparent_nodes_are_skipped() {
    let (mut scene, array) = array_scene(&[1, 2, 3]);
    let entry = array.entry(&scene, 0).unwrap();
    scene.node_mut(entry.node()).unwrap().set_opacity(0.0);

    let buf = render_to_buffer(&scene, 80, 24);
    assert_eq!(buf.get(32, 12).unwrap().char, ' ');
    assert_eq!(buf.get(29, 11).unwrap().char, ' ');
    assert_eq!(buf.get(40, 12).unwrap().char, '2');
}

#[test]
fn test_half_opacity_blends_fill() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene
        .spawn(
            root,
            Node::rect(Vec2::new(100.0, 100.0))
                .fill(Color::WHITE)
                .with_opacity(0.5),
        )
        .unwrap();

    let buf = render_to_buffer(&scene, 20, 10);
    let bg = scene.theme().background.to_rgb();
    assert_eq!(buf.get(10, 5).unwrap().bg, bg.blend(Rgb::new(255, 255, 255), 0.5));
}

#[test]
fn test_offscreen_content_is_clipped() {
    let (scene, _) = array_scene(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    let buf = render_to_buffer(&scene, 10, 5);
    assert_eq!(buf.row_text(0).chars().count(), 10);
}

// ============================================================================
// Buffer
// ============================================================================

#[test]
fn test_buffer_out_of_range() {
    let mut buf = Buffer::new(4, 2);
    assert!(buf.get(-1, 0).is_none());
    assert!(buf.get(4, 0).is_none());
    buf.set(10, 10, Cell::new('x'));
    assert_eq!(buf.row_text(0), "    ");
}

#[test]
fn test_buffer_diff() {
    let a = Buffer::new(4, 2);
    let mut b = Buffer::new(4, 2);
    b.set(2, 1, Cell::new('x'));

    let changed: Vec<_> = b.diff(&a).map(|(x, y, c)| (x, y, c.char)).collect();
    assert_eq!(changed, vec![(2, 1, 'x')]);
    assert_eq!(a.diff(&a).count(), 0);
}

#[test]
fn test_wide_chars_take_two_cells() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.spawn(root, Node::text("日本", 10.0)).unwrap();

    let buf = render_to_buffer(&scene, 10, 3);
    let row = buf.row_text(2);
    assert_eq!(row.chars().filter(|&c| c == '日' || c == '本').count(), 2);
    assert!(buf.get(4, 2).unwrap().wide_continuation || buf.get(6, 2).unwrap().wide_continuation);
}
