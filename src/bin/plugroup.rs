use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use plugroup::{GroupDescriptor, Scene, create_instance};

#[derive(Parser, Debug)]
#[command(name = "plugroup", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in Fill plugin manifest as JSON.
    Manifest,
    /// Instantiate a descriptor into a fresh scene and dump the result.
    Build(BuildArgs),
    /// Check a descriptor JSON file without instantiating it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Descriptor JSON (defaults to the built-in Fill group).
    #[arg(long)]
    descriptor: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Descriptor JSON.
    descriptor: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Dot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Manifest => cmd_manifest(),
        Command::Build(args) => cmd_build(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_manifest() -> anyhow::Result<()> {
    let plugin = plugroup::fill::fill()?;
    println!("{}", serde_json::to_string_pretty(&plugin.manifest)?);
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let descriptor = match &args.descriptor {
        Some(path) => load_descriptor(path)?,
        None => plugroup::fill::fill()?.descriptor,
    };

    let mut scene = Scene::new();
    let root = scene.root();
    create_instance(&mut scene, root, &descriptor, None).context("instantiate group")?;

    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&scene)?,
        Format::Dot => scene.to_dot(root)?,
    };

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let descriptor = load_descriptor(&args.descriptor)?;
    descriptor.validate()?;
    eprintln!(
        "ok: {} nodes, {} edges, {} user parameters",
        descriptor.nodes.len(),
        descriptor.edges.len(),
        descriptor.user_params.len()
    );
    Ok(())
}

fn load_descriptor(path: &Path) -> anyhow::Result<GroupDescriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read descriptor '{}'", path.display()))?;
    let descriptor: GroupDescriptor = serde_json::from_str(&raw)
        .with_context(|| format!("parse descriptor '{}'", path.display()))?;
    Ok(descriptor)
}
