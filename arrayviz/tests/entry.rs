use std::time::Duration;

use arrayviz::{
    Color, ColorSpace, Entry, EntryProps, Error, HighlightProps, HighlightSubject, Player,
    PlayerConfig, Scene, StageConfig, Thread, Value, Vec2,
};

fn play(scene: &mut Scene, mut task: Thread) -> arrayviz::Result<()> {
    Player::new(PlayerConfig::default()).run(scene, task.as_mut())
}

fn stage() -> (Scene, Entry) {
    let mut scene = Scene::new();
    let root = scene.root();
    let entry = Entry::spawn(&mut scene, root, EntryProps::new(3, 42)).unwrap();
    (scene, entry)
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_spawn_defaults() {
    let (scene, entry) = stage();
    let theme = scene.theme().clone();

    assert_eq!(entry.value(&scene).unwrap(), Value::Int(42));
    assert_eq!(entry.index(&scene).unwrap(), 3);
    assert_eq!(entry.label(&scene).unwrap(), None);
    assert_eq!(entry.display_label(&scene).unwrap(), "3");
    assert_eq!(entry.box_color(&scene).unwrap(), theme.background);
    assert_eq!(entry.border_color(&scene).unwrap(), theme.background);
    assert_eq!(entry.value_color(&scene).unwrap(), theme.white_label);
    assert_eq!(entry.label_color(&scene).unwrap(), theme.white_label);
    assert_eq!(entry.opacity(&scene).unwrap(), 1.0);
}

#[test]
fn test_spawn_with_label_and_placement() {
    let mut scene = Scene::new();
    let root = scene.root();
    let entry = Entry::spawn(
        &mut scene,
        root,
        EntryProps::new(0, "x")
            .label(Some(Value::text("key")))
            .position(Vec2::new(-40.0, 0.0))
            .opacity(0.0),
    )
    .unwrap();

    assert_eq!(entry.display_label(&scene).unwrap(), "key");
    assert_eq!(entry.absolute_position(&scene).unwrap(), Vec2::new(-40.0, 0.0));
    assert_eq!(entry.opacity(&scene).unwrap(), 0.0);

    let label = entry.label_node(&scene).unwrap();
    assert_eq!(scene.node(label).unwrap().text.as_ref().unwrap().text, "key");
    assert_eq!(scene.parent(label).unwrap(), Some(entry.box_node(&scene).unwrap()));
}

// =============================================================================
// Highlights
// =============================================================================

#[test]
fn test_highlight_lands_on_color() {
    let (mut scene, entry) = stage();
    let blue = scene.theme().blue;

    play(&mut scene, entry.highlight(HighlightProps::new().color(blue))).unwrap();
    assert_eq!(entry.border_color(&scene).unwrap(), blue);
    assert_eq!(entry.value_color(&scene).unwrap(), blue);
    assert_eq!(entry.label_color(&scene).unwrap(), blue);
    // The box fill is never touched.
    assert_eq!(entry.box_color(&scene).unwrap(), scene.theme().background);
}

#[test]
fn test_highlight_zero_duration() {
    let (mut scene, entry) = stage();
    let red = scene.theme().red;
    let mut task = entry.highlight(HighlightProps::new().color(red).duration(Duration::ZERO));

    assert!(task.tick(&mut scene, Duration::ZERO).unwrap().is_done());
    assert_eq!(entry.border_color(&scene).unwrap(), red);
}

#[test]
fn test_highlight_reset_shortcut() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    play(&mut scene, entry.highlight(HighlightProps::new().color(theme.green))).unwrap();
    play(&mut scene, entry.highlight(HighlightProps::new().color(theme.background))).unwrap();

    assert_eq!(entry.border_color(&scene).unwrap(), theme.background);
    assert_eq!(entry.value_color(&scene).unwrap(), theme.white_label);
    assert_eq!(entry.label_color(&scene).unwrap(), theme.white_label);
}

#[test]
fn test_highlight_value_only() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    let props = HighlightProps::new()
        .color(theme.red)
        .subject(HighlightSubject::Value);
    play(&mut scene, entry.highlight(props)).unwrap();

    assert_eq!(entry.value_color(&scene).unwrap(), theme.red);
    assert_eq!(entry.border_color(&scene).unwrap(), theme.red);
    assert_eq!(entry.label_color(&scene).unwrap(), theme.white_label);
}

#[test]
fn test_highlight_label_without_border() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    let props = HighlightProps::new()
        .color(theme.green)
        .subject(HighlightSubject::Label)
        .highlight_border(false);
    play(&mut scene, entry.highlight(props)).unwrap();

    assert_eq!(entry.label_color(&scene).unwrap(), theme.green);
    assert_eq!(entry.value_color(&scene).unwrap(), theme.white_label);
    assert_eq!(entry.border_color(&scene).unwrap(), theme.background);
}

#[test]
fn test_background_on_one_subject_is_literal() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    let props = HighlightProps::new()
        .color(theme.background)
        .subject(HighlightSubject::Value);
    play(&mut scene, entry.highlight(props)).unwrap();
    assert_eq!(entry.value_color(&scene).unwrap(), theme.background);
}

#[test]
fn test_unhighlight_restores_resting_colors() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    play(&mut scene, entry.highlight(HighlightProps::new().color(theme.blue))).unwrap();
    play(&mut scene, entry.unhighlight(Duration::from_millis(100))).unwrap();

    assert_eq!(entry.border_color(&scene).unwrap(), theme.background);
    assert_eq!(entry.value_color(&scene).unwrap(), theme.white_label);
    assert_eq!(entry.label_color(&scene).unwrap(), theme.white_label);
}

#[test]
fn test_highlight_border_only() {
    let (mut scene, entry) = stage();
    let theme = scene.theme().clone();

    play(&mut scene, entry.highlight_border(theme.red, Duration::from_millis(50))).unwrap();
    assert_eq!(entry.border_color(&scene).unwrap(), theme.red);
    assert_eq!(entry.value_color(&scene).unwrap(), theme.white_label);
}

#[test]
fn test_highlight_uses_configured_color_space() {
    let mut scene = Scene::with_config(StageConfig::new().color_space(ColorSpace::Srgb));
    let root = scene.root();
    let entry = Entry::spawn(&mut scene, root, EntryProps::new(0, 1)).unwrap();
    let from = scene.theme().background;

    let mut task = entry.highlight_border(Color::WHITE, Duration::from_millis(200));
    task.tick(&mut scene, Duration::ZERO).unwrap();
    task.tick(&mut scene, Duration::from_millis(100)).unwrap();

    // Halfway through the cubic curve is halfway between the channels.
    let mid = entry.border_color(&scene).unwrap();
    let expected = from.r + (1.0 - from.r) * 0.5;
    assert!((mid.r - expected).abs() < 0.0001, "{mid:?}");
    assert_eq!(mid.r, mid.g);
}

#[test]
fn test_highlight_destroyed_entry_fails() {
    let (mut scene, entry) = stage();
    scene.destroy(entry.node()).unwrap();

    let err = play(&mut scene, entry.highlight(HighlightProps::new())).unwrap_err();
    assert_eq!(err, Error::UnknownNode(entry.node()));
}
