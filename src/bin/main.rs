//! DNM Exporter CLI
//!
//! Export mesh scene descriptions to YSFlight DNM/SRF files.

use clap::{Parser, Subcommand, ValueEnum};
use dnm_exporter::surface::SceneWalker;
use dnm_exporter::{
    export_document, export_exploded_parts, export_single_surface, load_scene, DuplicatePolicy,
    ExportConfig, ExportError,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dnm-exporter")]
#[command(author, version, about = "Export mesh scenes to YSFlight DNM/SRF models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every visible mesh and its hierarchy to one DNM file
    Dnm {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: ExportOptions,
    },

    /// Export a single mesh to a bare SRF file
    Srf {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Name of the mesh node to export
        #[arg(long)]
        object: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: ExportOptions,
    },

    /// Export every mesh, hidden ones included, to its own SRF file
    Explode {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: ExportOptions,
    },

    /// List the surfaces a DNM export would produce
    Info {
        /// Scene description (JSON)
        scene: PathBuf,

        #[command(flatten)]
        options: ExportOptions,
    },
}

#[derive(clap::Args)]
struct ExportOptions {
    /// What to do with meshes whose names repeat
    #[arg(long, value_enum, default_value = "skip")]
    duplicates: Duplicates,

    /// Suffix appended to node names to form surface names
    #[arg(long, default_value = ".srf")]
    suffix: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Duplicates {
    /// Leave later meshes out and warn
    Skip,
    /// Fail the export
    Abort,
}

impl ExportOptions {
    fn config(&self) -> ExportConfig {
        let policy = match self.duplicates {
            Duplicates::Skip => DuplicatePolicy::Skip,
            Duplicates::Abort => DuplicatePolicy::Abort,
        };
        ExportConfig::default()
            .with_duplicate_names(policy)
            .with_surface_suffix(&self.suffix)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Dnm {
            scene,
            output,
            options,
        } => {
            let output = with_default_extension(&output, "dnm");
            tracing::info!("Loading scene from {:?}", scene);
            let scene = load_scene(&scene)?;
            export_document(&scene, &output, &options.config())?;
        }
        Commands::Srf {
            scene,
            object,
            output,
            options,
        } => {
            let output = with_default_extension(&output, "srf");
            tracing::info!("Loading scene from {:?}", scene);
            let scene = load_scene(&scene)?;
            let node = scene
                .find(&object)
                .ok_or_else(|| ExportError::NodeNotFound(object.clone()))?;
            export_single_surface(node, &output, &options.config())?;
        }
        Commands::Explode {
            scene,
            output,
            options,
        } => {
            tracing::info!("Loading scene from {:?}", scene);
            let scene = load_scene(&scene)?;
            std::fs::create_dir_all(&output)?;
            let written = export_exploded_parts(&scene, &output, &options.config())?;
            for path in written {
                tracing::info!("  {:?}", path);
            }
        }
        Commands::Info { scene, options } => {
            show_scene_info(&scene, &options.config())?;
        }
    }

    Ok(())
}

fn show_scene_info(path: &Path, config: &ExportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(path)?;
    let registry = SceneWalker::new(config).walk(&scene)?;

    println!("Surfaces: {}", registry.len());
    for surface in registry.list() {
        let parent = surface
            .parent
            .map(|uid| uid.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {} (parent {}, {} children, {} vertices, {} faces)",
            surface.uid,
            surface.name,
            parent,
            surface.children.len(),
            surface.mesh.vertex_count(),
            surface.mesh.face_count(),
        );
    }
    Ok(())
}

fn with_default_extension(path: &Path, ext: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(ext)
    }
}
