//! asmview: draw ASM shapes onto images and show them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;

use asmview_engine::coords::{Color, ImageSize};
use asmview_engine::display::{Display, HeadlessDisplay, WindowDisplay};
use asmview_engine::logging::{init_logging, LoggingConfig};
use asmview_engine::plot::PlotStyle;
use asmview_engine::shape::{parse_flat, parse_points, Shape};
use asmview_engine::{RendererConfig, ShapeRenderer};

#[derive(Parser)]
#[command(name = "asmview")]
#[command(about = "Draw Active Shape Model shapes onto images and display them")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Args)]
struct GlobalArgs {
    /// Record frames in memory instead of opening windows.
    #[arg(long, global = true)]
    headless: bool,

    /// Render even when ASMVIEW_PLOT is unset or false.
    #[arg(long, global = true)]
    force: bool,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "asmview_engine=trace".
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a shape on a new black image and save it.
    Rasterize {
        /// Flat shape file: x1..xN followed by y1..yN.
        #[arg(long)]
        shape: PathBuf,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        width: u32,
        /// Line color (#rrggbb or a basic color name).
        #[arg(long, default_value = "white")]
        color: Color,
        #[arg(long)]
        out: PathBuf,
    },

    /// Draw a shape over an image and show it until a key is pressed.
    Overlay {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        shape: PathBuf,
        #[arg(long, default_value = "red")]
        color: Color,
        #[arg(long, default_value = "Image")]
        title: String,
        /// Also save the annotated image.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Draw an ellipse marker around each point and show the image.
    Markers {
        #[arg(long)]
        image: PathBuf,
        /// Points file: one "x y" pair per line.
        #[arg(long)]
        points: PathBuf,
        #[arg(long, default_value = "red")]
        color: Color,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show an image scaled to the display height.
    Show {
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "Image")]
        title: String,
    },

    /// Plot a shape as a line chart and wait for a key press.
    Plot {
        #[arg(long)]
        shape: PathBuf,
        #[arg(long, default_value = "#1f77b4")]
        color: Color,
        /// Draw the line without point markers.
        #[arg(long)]
        no_markers: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(match &cli.global.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let mut config = RendererConfig::from_env().context("reading renderer config")?;
    if cli.global.force {
        config = config.with_enabled(true);
    }
    if !config.enabled {
        log::warn!(
            "rendering is disabled; set {}=true or pass --force",
            RendererConfig::ENV_VAR
        );
    }

    if cli.global.headless {
        let mut renderer = ShapeRenderer::new(config, HeadlessDisplay::new());
        run(&cli.command, &mut renderer)?;
        for frame in renderer.display().frames() {
            println!(
                "{}: {}x{} ({})",
                frame.window.title,
                frame.window.size.width,
                frame.window.size.height,
                if frame.blocking { "blocking" } else { "presented" }
            );
        }
        Ok(())
    } else {
        let mut renderer = ShapeRenderer::new(config, WindowDisplay::new());
        run(&cli.command, &mut renderer)
    }
}

fn run<D: Display>(command: &Commands, renderer: &mut ShapeRenderer<D>) -> Result<()> {
    match command {
        Commands::Rasterize {
            shape,
            height,
            width,
            color,
            out,
        } => {
            let shape = load_shape(shape)?;
            let size = ImageSize::new(*height, *width)?;
            let Some(image) = renderer.rasterize_to_new_image(shape, size, Some(*color))? else {
                bail!("rendering is disabled, nothing written");
            };
            save_image(&image, out)
        }

        Commands::Overlay {
            image,
            shape,
            color,
            title,
            out,
        } => {
            let mut img = load_image(image)?;
            let shape = load_shape(shape)?;
            renderer.overlay_on_image_titled(&mut img, shape, Some(*color), title)?;
            save_if_requested(renderer, &img, out.as_deref())
        }

        Commands::Markers {
            image,
            points,
            color,
            out,
        } => {
            let mut img = load_image(image)?;
            let src = read_text(points)?;
            let points = parse_points(&src).with_context(|| format!("parsing {}", points.display()))?;
            renderer.overlay_markers(&mut img, &points, Some(*color))?;
            save_if_requested(renderer, &img, out.as_deref())
        }

        Commands::Show { image, title } => {
            let img = load_image(image)?;
            renderer.display_blocking(&img, title)?;
            Ok(())
        }

        Commands::Plot {
            shape,
            color,
            no_markers,
        } => {
            let shape = load_shape(shape)?;
            let style = PlotStyle::default()
                .with_color(*color)
                .with_markers(!no_markers);
            renderer.render_blocking(shape, &style)?;
            Ok(())
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_shape(path: &Path) -> Result<Shape> {
    let src = read_text(path)?;
    let shape = parse_flat(&src).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("loaded {} points from {}", shape.len(), path.display());
    Ok(shape)
}

fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgb8();
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn save_if_requested<D: Display>(
    renderer: &ShapeRenderer<D>,
    image: &RgbImage,
    out: Option<&Path>,
) -> Result<()> {
    match out {
        Some(_) if !renderer.is_enabled() => {
            bail!("rendering is disabled, nothing written")
        }
        Some(path) => save_image(image, path),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "asmview", "plot", "--shape", "s.txt", "--headless", "--force",
        ])
        .unwrap();
        assert!(cli.global.headless);
        assert!(cli.global.force);
        assert!(matches!(cli.command, Commands::Plot { no_markers: false, .. }));
    }

    #[test]
    fn colors_parse_from_names_and_hex() {
        let cli = Cli::try_parse_from([
            "asmview", "rasterize", "--shape", "s.txt", "--height", "10", "--width", "20",
            "--color", "#00a000", "--out", "o.png",
        ])
        .unwrap();
        let Commands::Rasterize { color, height, width, .. } = cli.command else {
            panic!("expected rasterize");
        };
        assert_eq!(color, Color::GREEN);
        assert_eq!((height, width), (10, 20));

        let cli = Cli::try_parse_from(["asmview", "overlay", "--image", "i.png", "--shape", "s.txt"])
            .unwrap();
        let Commands::Overlay { color, title, .. } = cli.command else {
            panic!("expected overlay");
        };
        assert_eq!(color, Color::RED);
        assert_eq!(title, "Image");

        assert!(Cli::try_parse_from(["asmview", "plot", "--shape", "s.txt", "--color", "mauve"]).is_err());
    }

    #[test]
    fn headless_plot_waits_for_a_key() {
        let mut renderer = ShapeRenderer::new(
            RendererConfig::default().with_enabled(true),
            HeadlessDisplay::new(),
        );
        let dir = std::env::temp_dir().join(format!("asmview-plot-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let shape_path = dir.join("shape.txt");
        fs::write(&shape_path, "-0.5 0 0.5\n0 0.3 0\n").unwrap();

        run(
            &Commands::Plot {
                shape: shape_path,
                color: Color::BLUE,
                no_markers: false,
            },
            &mut renderer,
        )
        .unwrap();

        let frames = renderer.display().frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].blocking);
        assert_eq!(frames[0].window.size, renderer.config().canvas_size);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn headless_overlay_records_one_blocking_frame() {
        let mut renderer = ShapeRenderer::new(
            RendererConfig::default().with_enabled(true),
            HeadlessDisplay::new(),
        );
        let dir = std::env::temp_dir().join(format!("asmview-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("in.png");
        let shape_path = dir.join("shape.txt");
        let out_path = dir.join("out.png");
        RgbImage::new(40, 20).save(&image_path).unwrap();
        fs::write(&shape_path, "# xs then ys\n2 30\n10 10\n").unwrap();

        run(
            &Commands::Overlay {
                image: image_path,
                shape: shape_path,
                color: Color::RED,
                title: "check".into(),
                out: Some(out_path.clone()),
            },
            &mut renderer,
        )
        .unwrap();

        let frames = renderer.display().frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].window.title, "check");
        assert!(frames[0].blocking);

        let written = image::open(&out_path).unwrap().to_rgb8();
        assert_eq!(written.get_pixel(15, 10), &Color::RED.to_rgb());
        fs::remove_dir_all(&dir).ok();
    }
}
