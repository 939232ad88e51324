// ABOUTME: Main application entry point.
// ABOUTME: Loads config and a scene, settles the layout, replays drags, and prints the result.

mod report;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use cellflex_core::LayoutConfig;
use cellflex_layout::WidgetTree;
use scene::Scene;

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    tracing::info!("Starting cellflex");

    let config = LayoutConfig::load_or_default();
    tracing::info!(
        "Loaded config: window={}x{}, divider_half_width={}",
        config.window.width,
        config.window.height,
        config.split.divider_half_width
    );

    let scene = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Scene::load(&path)?,
        None => {
            tracing::info!("No scene given, using the built-in workbench");
            Scene::demo()?
        }
    };

    let mut tree = WidgetTree::new(config);
    scene.build(&mut tree)?;
    scene.replay_drags(&mut tree)?;

    let mut out = String::new();
    report::render(&tree, &mut out)?;
    print!("{}", out);

    Ok(())
}
