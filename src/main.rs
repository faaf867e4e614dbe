use clap::Parser;
use doodlekit::Config;
use doodlekit::draw::write_png;
use doodlekit::scene::Scene;
use doodlekit::text::PangoMeasurer;
use std::path::PathBuf;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DOODLEKIT_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "doodlekit")]
#[command(version = VERSION, about = "Render freehand doodles and gesture-placed text labels")]
struct Cli {
    /// Scene file describing strokes and label gestures (TOML)
    #[arg(long, short = 's', value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Output PNG path (defaults to the scene path with a .png extension)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/doodlekit/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(scene_path) = cli.scene else {
        // No scene: show usage
        println!("doodlekit: Render freehand doodles and gesture-placed text labels");
        println!();
        println!("Usage:");
        println!("  doodlekit --scene drawing.toml                Render to drawing.png");
        println!("  doodlekit --scene drawing.toml -o out.png     Render to out.png");
        println!("  doodlekit --help                              Show help");
        println!();
        println!("Configuration:");
        println!("  Stroke and label defaults are read from ~/.config/doodlekit/config.toml");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let scene = Scene::load(&scene_path)?;
    let output = cli
        .output
        .unwrap_or_else(|| scene_path.with_extension("png"));

    let image = scene.render(&config, PangoMeasurer)?;
    write_png(&image, &output)?;

    log::info!("Annotation written to {}", output.display());
    println!("{}", output.display());

    Ok(())
}
