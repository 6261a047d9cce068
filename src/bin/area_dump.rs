use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use noita_viewer::{AreaContainer, CollectingAtlas, Paths, TemplateResolver};

#[derive(Parser)]
#[command(name = "area-dump")]
#[command(about = "Decode the area files of a Noita save and print the placed entities")]
struct Args {
    /// Save directory (save00)
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// World directory (defaults to <save>/world)
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Exported game data directory for template lookup
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print every entity with its position instead of per-template counts
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let paths = Paths::resolve(args.save, args.world, args.data)?;

    let mut area_files: Vec<PathBuf> = std::fs::read_dir(&paths.world)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("area_") && name.ends_with(".bin"))
        })
        .collect();
    area_files.sort();

    println!(
        "Found {} area files in {}",
        area_files.len(),
        paths.world.display()
    );

    let atlas = Arc::new(CollectingAtlas::new());
    let resolver = TemplateResolver::new(paths.data.clone());
    let mut container = AreaContainer::new(resolver, Arc::clone(&atlas));

    let loader = container.loader();
    let worker = std::thread::spawn(move || {
        for path in &area_files {
            if let Err(e) = loader.load_area(path) {
                eprintln!("failed to load {}: {e}", path.display());
            }
        }
    });

    // Drain the way a render tick would until the loader finishes.
    while !worker.is_finished() {
        container.update();
        std::thread::sleep(Duration::from_millis(10));
    }
    worker.join().expect("loader thread panicked");
    container.update();

    let mut by_template: HashMap<&str, usize> = HashMap::new();
    for entity in container.entities() {
        *by_template.entry(entity.template_path.as_str()).or_default() += 1;
    }
    let mut counts: Vec<_> = by_template.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("\nEntity counts by template:");
    for (template, count) in &counts {
        println!("  {template:60} {count}");
    }

    if args.list {
        println!("\nEntities:");
        for entity in container.entities() {
            println!("  {} {}", entity.position, entity.template_path);
        }
    }

    println!(
        "\n{} entities, {} sprite descriptors",
        container.entities().len(),
        atlas.len()
    );

    Ok(())
}
