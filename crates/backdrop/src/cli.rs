use std::path::PathBuf;

use clap::{Parser, Subcommand};
use patterns::PatternType;

#[derive(Parser, Debug)]
#[command(
    name = "backdrop",
    author,
    version,
    about = "Procedural background designer and shader library toolkit",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a pattern state into a JSON draw-primitive dump.
    Render(RenderArgs),
    /// Generate a fully random pattern state.
    Randomize(RandomizeArgs),
    /// Emit the theme code snippet for a pattern state.
    Theme(ThemeArgs),
    /// Manage the named shader file store.
    Shader(ShaderArgs),
    /// List the bundled shader presets.
    Presets,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Pattern state TOML produced by `randomize`; defaults omitted fields.
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Pattern override: soft-mesh, aurora, voronoi, geometric, waves, perlin-noise.
    #[arg(long, value_name = "PATTERN", value_parser = parse_pattern)]
    pub pattern: Option<PatternType>,

    /// Target canvas size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "1920x1080", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct RandomizeArgs {
    /// Seed for reproducible output; random otherwise.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write the state TOML to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// Pattern state TOML; the default state when omitted.
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ShaderArgs {
    /// Storage directory override; the per-user data dir by default.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub action: ShaderAction,
}

#[derive(Subcommand, Debug)]
pub enum ShaderAction {
    /// List stored shaders, newest first.
    List,
    /// Save a shader source file under a (sanitized) name.
    Save {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print a stored shader's source.
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Delete a stored shader.
    Delete {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_pattern(value: &str) -> Result<PatternType, String> {
    match value.to_ascii_lowercase().as_str() {
        "soft-mesh" | "mesh" => Ok(PatternType::SoftMesh),
        "aurora" => Ok(PatternType::Aurora),
        "voronoi" => Ok(PatternType::Voronoi),
        "geometric" => Ok(PatternType::Geometric),
        "waves" => Ok(PatternType::Waves),
        "perlin-noise" | "noise" => Ok(PatternType::PerlinNoise),
        other => Err(format!(
            "unknown pattern '{other}' (expected soft-mesh, aurora, voronoi, geometric, waves, or perlin-noise)"
        )),
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size '{value}' (expected WIDTHxHEIGHT)"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid width in '{value}': {err}"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid height in '{value}': {err}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{value}' must be non-zero"));
    }
    Ok((width, height))
}
