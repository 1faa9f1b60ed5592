use std::fs::File;
use std::time::Duration;

use arrayviz::animation::{call, chain, wait_for};
use arrayviz::{
    Array, ArrayProps, Player, PlayerConfig, Scene, SwapHighlightProps, Terminal, Viewport,
};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("array_scene.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut scene = Scene::new();
    let root = scene.root();
    let green = scene.theme().green;
    let timing = *scene.timing();

    let stack = Array::spawn(
        &mut scene,
        root,
        ArrayProps::new(1..=7)
            .name("Integer Stack")
            .suffix("i8[]")
            .suffix_color(green),
    )?;

    let log_values = move || {
        call(move |scene: &mut Scene| {
            info!("values: {:?}", stack.values(scene)?);
            Ok(())
        })
    };

    let mut script = chain(vec![
        wait_for(Duration::from_secs(1)),
        stack.swap_and_highlight(1, 2, SwapHighlightProps::new()),
        wait_for(Duration::from_millis(500)),
        stack.chain_pop(5, timing.pop),
        log_values(),
        wait_for(Duration::from_millis(200)),
        stack.push(4, timing.push),
        log_values(),
        wait_for(Duration::from_secs(1)),
        stack.pop(1, timing.pop),
        log_values(),
        wait_for(Duration::from_millis(200)),
        stack.chain_push([8, 9, 10], timing.push),
        stack.swap_and_highlight(0, 3, SwapHighlightProps::new().segment(true)),
        log_values(),
        wait_for(Duration::from_millis(500)),
        stack.swap(0, 4, timing.swap),
        log_values(),
        wait_for(Duration::from_secs(1)),
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

    info!("finished after {} frames", player.frames());
    Ok(())
}
