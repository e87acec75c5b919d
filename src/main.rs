use anyhow::{anyhow, Result};
use clap::Parser;
use glint::{App, DemoConfig, Shape, WindowConfig};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glint",
    about = "Renders a #shader-tagged source file onto a demo primitive"
)]
struct Cli {
    /// Shader source file with `#shader vertex` / `#shader fragment`
    /// sections. Uses the built-in demo shaders when omitted.
    shader: Option<PathBuf>,

    /// Image file to sample in the fragment stage.
    texture: Option<PathBuf>,

    /// Primitive to render: triangle, quad or cube.
    #[arg(short, long, default_value = "triangle")]
    shape: String,

    /// Rotate the primitive over time.
    #[arg(long)]
    spin: bool,

    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,

    /// Window title.
    #[arg(long, default_value = "glint")]
    title: String,
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let cli = Cli::parse();
    let shape = Shape::from_name(&cli.shape)
        .ok_or_else(|| anyhow!("unknown shape {:?}, expected triangle, quad or cube", cli.shape))?;

    let window = WindowConfig {
        title: cli.title,
        width: cli.width,
        height: cli.height,
    };
    let demo = DemoConfig {
        shape,
        spin: cli.spin,
        shader_path: cli.shader,
        texture_path: cli.texture,
    };

    let (app, event_loop) = App::new(&window, &demo)?;
    app.run(event_loop)
}
