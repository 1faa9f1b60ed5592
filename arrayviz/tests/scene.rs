use arrayviz::{Error, Node, Scene, Vec2};

// =============================================================================
// Tree Structure
// =============================================================================

#[test]
fn test_spawn_links_parent_and_child() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group().name("a")).unwrap();
    let b = scene.spawn(a, Node::group().name("b")).unwrap();

    assert_eq!(scene.parent(b).unwrap(), Some(a));
    assert_eq!(scene.children(a).unwrap(), &[b]);
    assert_eq!(scene.children(root).unwrap(), &[a]);
    assert_eq!(scene.len(), 3);
    assert!(scene.is_ancestor(root, b).unwrap());
    assert!(!scene.is_ancestor(b, a).unwrap());
}

#[test]
fn test_walk_is_pre_order() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group()).unwrap();
    let a1 = scene.spawn(a, Node::group()).unwrap();
    let a2 = scene.spawn(a, Node::group()).unwrap();
    let b = scene.spawn(root, Node::group()).unwrap();

    assert_eq!(scene.walk(root).unwrap(), vec![root, a, a1, a2, b]);
}

#[test]
fn test_spawn_under_unknown_parent_fails() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group()).unwrap();
    scene.destroy(a).unwrap();

    let err = scene.spawn(a, Node::group()).unwrap_err();
    assert_eq!(err, Error::UnknownNode(a));
}

#[test]
fn test_add_child_rejects_cycles() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group()).unwrap();
    let b = scene.spawn(a, Node::group()).unwrap();

    let err = scene.add_child(b, a).unwrap_err();
    assert_eq!(err, Error::Cycle { node: a, parent: b });
    let err = scene.add_child(a, a).unwrap_err();
    assert_eq!(err, Error::Cycle { node: a, parent: a });
    // Tree untouched
    assert_eq!(scene.parent(b).unwrap(), Some(a));
}

#[test]
fn test_detach_keeps_node_alive() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group()).unwrap();

    scene.detach(a).unwrap();
    assert!(scene.is_alive(a));
    assert_eq!(scene.parent(a).unwrap(), None);
    assert_eq!(scene.walk(root).unwrap(), vec![root]);
}

// =============================================================================
// Destruction / Stale Handles
// =============================================================================

#[test]
fn test_destroy_removes_subtree() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group()).unwrap();
    let b = scene.spawn(a, Node::group()).unwrap();
    let c = scene.spawn(root, Node::group()).unwrap();

    scene.destroy(a).unwrap();
    assert!(!scene.is_alive(a));
    assert!(!scene.is_alive(b));
    assert!(scene.is_alive(c));
    assert_eq!(scene.children(root).unwrap(), &[c]);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_stale_handle_after_slot_reuse() {
    let mut scene = Scene::new();
    let root = scene.root();
    let old = scene.spawn(root, Node::group()).unwrap();
    scene.destroy(old).unwrap();
    let new = scene.spawn(root, Node::group()).unwrap();

    assert_eq!(new.index(), old.index());
    assert_eq!(new.generation(), old.generation() + 1);
    assert!(matches!(scene.node(old), Err(Error::UnknownNode(id)) if id == old));
    assert!(scene.node(new).is_ok());
}

#[test]
fn test_destroy_root_clears_children_only() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.spawn(root, Node::group()).unwrap();
    scene.spawn(root, Node::group()).unwrap();

    scene.destroy(root).unwrap();
    assert!(scene.is_alive(root));
    assert_eq!(scene.len(), 1);
    assert!(scene.children(root).unwrap().is_empty());
}

// =============================================================================
// Positions / Opacity
// =============================================================================

#[test]
fn test_absolute_position_sums_ancestors() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene
        .spawn(root, Node::group().position(Vec2::new(10.0, 20.0)))
        .unwrap();
    let b = scene
        .spawn(a, Node::group().position(Vec2::new(5.0, 5.0)))
        .unwrap();

    assert_eq!(scene.absolute_position(b).unwrap(), Vec2::new(15.0, 25.0));
}

#[test]
fn test_set_absolute_position() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene
        .spawn(root, Node::group().position(Vec2::new(100.0, 0.0)))
        .unwrap();
    let b = scene.spawn(a, Node::group()).unwrap();

    scene.set_absolute_position(b, Vec2::new(40.0, 40.0)).unwrap();
    assert_eq!(scene.node(b).unwrap().position, Vec2::new(-60.0, 40.0));
    assert_eq!(scene.absolute_position(b).unwrap(), Vec2::new(40.0, 40.0));
}

#[test]
fn test_reparent_keeps_absolute_position() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene
        .spawn(root, Node::group().position(Vec2::new(100.0, 0.0)))
        .unwrap();
    let b = scene
        .spawn(root, Node::group().position(Vec2::new(-50.0, 10.0)))
        .unwrap();
    let child = scene
        .spawn(a, Node::group().position(Vec2::new(10.0, 0.0)))
        .unwrap();

    scene.reparent(child, b).unwrap();
    assert_eq!(scene.parent(child).unwrap(), Some(b));
    assert_eq!(scene.absolute_position(child).unwrap(), Vec2::new(110.0, 0.0));
    assert_eq!(scene.node(child).unwrap().position, Vec2::new(160.0, -10.0));
    assert!(scene.children(a).unwrap().is_empty());
}

#[test]
fn test_add_child_keeps_local_position() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene
        .spawn(root, Node::group().position(Vec2::new(100.0, 0.0)))
        .unwrap();
    let child = scene
        .spawn(root, Node::group().position(Vec2::new(10.0, 0.0)))
        .unwrap();

    scene.add_child(a, child).unwrap();
    assert_eq!(scene.absolute_position(child).unwrap(), Vec2::new(110.0, 0.0));
}

#[test]
fn test_opacity_is_clamped_and_multiplied() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.spawn(root, Node::group().with_opacity(0.5)).unwrap();
    let b = scene.spawn(a, Node::group().with_opacity(1.5)).unwrap();

    assert_eq!(scene.node(b).unwrap().opacity(), 1.0);
    assert_eq!(scene.effective_opacity(b).unwrap(), 0.5);

    scene.node_mut(b).unwrap().set_opacity(-0.3);
    assert_eq!(scene.node(b).unwrap().opacity(), 0.0);
    assert_eq!(scene.effective_opacity(b).unwrap(), 0.0);
}
