use std::fs::File;
use std::time::Duration;

use arrayviz::animation::{all, chain, wait_for};
use arrayviz::{
    HighlightProps, Matrix, MatrixProps, Player, PlayerConfig, Scene, SwapHighlightProps,
    Terminal, Viewport,
};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("matrix_scene.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut scene = Scene::new();
    let root = scene.root();
    let theme = scene.theme().clone();
    let timing = *scene.timing();

    let weights = Matrix::spawn(
        &mut scene,
        root,
        MatrixProps::new([[0.2, 0.5, 0.2], [0.5, 1.0, 0.5], [0.2, 0.5, 0.2]])
            .name("weights")
            .suffix("")
            .suffix_color(theme.red),
    )?;

    let blue = HighlightProps::new().color(theme.blue);
    let green = HighlightProps::new().color(theme.green);
    let reset = HighlightProps::new().color(theme.background);
    let red_swap = SwapHighlightProps::new().color(theme.red);
    let pause = |ms| wait_for(Duration::from_millis(ms));

    let mut script = chain(vec![
        pause(500),
        all(vec![
            weights.highlight((1, 1), blue),
            weights.highlight((2, 2), blue),
        ]),
        pause(500),
        all(vec![
            weights.highlight((1, 1), reset),
            weights.highlight((2, 2), green),
        ]),
        pause(500),
        weights.highlight((2, 2), reset),
        pause(1000),
        weights.swap_and_highlight((1, 1), (0, 0), red_swap),
        pause(500),
        weights.swap_and_highlight((1, 1), (0, 0), red_swap),
        pause(1000),
        weights.swap_and_highlight((1, 0), (0, 2), red_swap),
        pause(500),
        weights.swap((2, 2), (0, 0), timing.swap),
        pause(500),
    ]);

    let mut term = Terminal::new()?;
    let mut player = Player::new(PlayerConfig::default());
    let viewport = Viewport::default();
    let interval = player.config().frame_interval();

    loop {
        let done = player.step(&mut scene, script.as_mut())?;
        term.draw(&scene, &viewport)?;
        if done || term.poll_quit(interval)? {
            break;
        }
    }

    info!("final weights: {:?}", weights.values(&scene)?);
    Ok(())
}
