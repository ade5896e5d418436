//! Command dispatch for the `backdrop` binary.

use anyhow::{anyhow, Context, Result};
use patterns::{
    generate_theme, render, BackgroundsEvent, BackgroundsIntent, BackgroundsModel,
    BackgroundsState, CanvasSize,
};
use shaderlab::{PresetCatalog, ShaderStorage};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, RandomizeArgs, RenderArgs, ShaderAction, ShaderArgs, ThemeArgs};
use crate::paths::AppPaths;
use crate::state;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => run_render(args),
        Command::Randomize(args) => run_randomize(args),
        Command::Theme(args) => run_theme(args),
        Command::Shader(args) => run_shader(args),
        Command::Presets => run_presets(),
    }
}

fn load_or_default(path: Option<&std::path::Path>) -> Result<BackgroundsState> {
    match path {
        Some(path) => state::load_state(path),
        None => Ok(BackgroundsState::default()),
    }
}

fn run_render(args: RenderArgs) -> Result<()> {
    let mut pattern_state = load_or_default(args.state.as_deref())?;
    if let Some(pattern) = args.pattern {
        pattern_state.pattern_type = pattern;
    }

    let (width, height) = args.size;
    let size = CanvasSize::new(width as f32, height as f32);
    let primitives = render(&pattern_state, size);
    info!(
        pattern = pattern_state.pattern_type.display_name(),
        primitives = primitives.len(),
        "rendered pattern"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&primitives)
    } else {
        serde_json::to_string(&primitives)
    }
    .context("failed to serialize draw primitives")?;
    println!("{json}");
    Ok(())
}

fn run_randomize(args: RandomizeArgs) -> Result<()> {
    let mut model = match args.seed {
        Some(seed) => BackgroundsModel::seeded(seed),
        None => BackgroundsModel::from_entropy(),
    };
    let events = model
        .events()
        .map_err(|err| anyhow!("event channel unavailable: {err}"))?;

    model.handle_intent(BackgroundsIntent::RandomizePattern);
    while let Ok(event) = events.try_recv() {
        if let BackgroundsEvent::Message(message) = event {
            info!("{message}");
        }
    }

    let snapshot = model.snapshot();
    match args.output {
        Some(path) => {
            state::save_state(&snapshot, &path)?;
            info!(path = %path.display(), "wrote pattern state");
        }
        None => {
            let toml = state::to_toml_string(&snapshot)?;
            println!("{toml}");
        }
    }
    Ok(())
}

fn run_theme(args: ThemeArgs) -> Result<()> {
    let pattern_state = load_or_default(args.state.as_deref())?;
    let code = generate_theme(&pattern_state).context("failed to generate theme code")?;
    println!("{code}");
    Ok(())
}

fn run_shader(args: ShaderArgs) -> Result<()> {
    let root = match args.dir {
        Some(dir) => dir,
        None => AppPaths::discover()?.shaders_dir(),
    };
    let storage = ShaderStorage::new(root);

    match args.action {
        ShaderAction::List => {
            let entries = storage.list().context("failed to list stored shaders")?;
            if entries.is_empty() {
                println!("no shaders stored in {}", storage.root().display());
                return Ok(());
            }
            for meta in entries {
                println!(
                    "{:<32} modified {}",
                    meta.name,
                    meta.modified_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
        }
        ShaderAction::Save { name, file } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read shader source from {}", file.display()))?;
            let meta = storage
                .save(&name, &source)
                .with_context(|| format!("failed to save shader '{name}'"))?;
            println!("saved {} to {}", meta.name, meta.path.display());
        }
        ShaderAction::Show { name } => {
            let meta = storage
                .find(&name)
                .with_context(|| format!("shader '{name}' not found"))?;
            let source = storage
                .load(&meta)
                .with_context(|| format!("failed to load shader '{name}'"))?;
            print!("{source}");
        }
        ShaderAction::Delete { name } => {
            let meta = storage
                .find(&name)
                .with_context(|| format!("shader '{name}' not found"))?;
            storage
                .delete(&meta)
                .with_context(|| format!("failed to delete shader '{name}'"))?;
            println!("deleted {}", meta.name);
        }
    }
    Ok(())
}

fn run_presets() -> Result<()> {
    let catalog = PresetCatalog::bundled();
    for preset in catalog.all() {
        println!("{:<16} {:<24} {}", preset.id, preset.name, preset.description);
    }
    Ok(())
}
