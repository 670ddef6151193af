use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "morphpack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one visualization on its own as SVG or PNG.
    Layout(LayoutArgs),
    /// Navigate between two sections and render the viewport at a point in time.
    Frame(FrameArgs),
    /// Print a visualization's entity registry as JSON.
    Registry(RegistryArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Dataset JSON (array of study records).
    #[arg(long)]
    data: PathBuf,

    /// Story config JSON; built-in defaults when omitted.
    #[arg(long)]
    story: Option<PathBuf>,

    #[arg(long, value_enum)]
    viz: VizChoice,

    /// Output path; `.png` is rasterized, anything else is written as SVG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    data: PathBuf,

    #[arg(long)]
    story: Option<PathBuf>,

    /// Starting section, by index or id.
    #[arg(long)]
    from: String,

    /// Requested section, by index or id.
    #[arg(long)]
    to: String,

    /// Time after the navigation request, in milliseconds.
    #[arg(long, default_value_t = 500)]
    at_ms: u64,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RegistryArgs {
    #[arg(long)]
    data: PathBuf,

    #[arg(long)]
    story: Option<PathBuf>,

    #[arg(long, value_enum)]
    viz: VizChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VizChoice {
    Pack,
    Grid,
}

impl From<VizChoice> for morphpack::VizId {
    fn from(v: VizChoice) -> Self {
        match v {
            VizChoice::Pack => morphpack::VizId::Pack,
            VizChoice::Grid => morphpack::VizId::Grid,
        }
    }
}

#[derive(serde::Serialize)]
struct RegistryRow<'a> {
    key: &'a morphpack::EntityKey,
    position: morphpack::Point,
    radius: f64,
    color: morphpack::Color,
    mechanism: &'a morphpack::Mechanism,
    group: &'a str,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Registry(args) => cmd_registry(args),
    }
}

fn load_inputs(
    data: &Path,
    story: Option<&Path>,
) -> anyhow::Result<(morphpack::Dataset, morphpack::StoryConfig)> {
    let dataset = morphpack::Dataset::from_path(data)
        .with_context(|| format!("load dataset '{}'", data.display()))?;
    let config = match story {
        Some(path) => morphpack::StoryConfig::from_path(path)
            .with_context(|| format!("load story config '{}'", path.display()))?,
        None => morphpack::StoryConfig::default(),
    };
    Ok((dataset, config))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let (dataset, config) = load_inputs(&args.data, args.story.as_deref())?;
    config.validate()?;

    let viz = morphpack::VizId::from(args.viz);
    let mut scene = morphpack::Scene::new(viz, morphpack::Size::ZERO);
    let mut registry = morphpack::EntityRegistry::new(viz);
    let summary = morphpack::LayoutEngine::new(&config.layout).render(
        &dataset,
        &mut scene,
        &mut registry,
        config.viewport.height,
    )?;

    let svg = morphpack::scene_to_svg(&scene, Some(config.background));
    morphpack::write_output(&svg, &args.out)?;
    eprintln!(
        "wrote {} ({} groups, {} species)",
        args.out.display(),
        summary.groups,
        summary.entities
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (dataset, config) = load_inputs(&args.data, args.story.as_deref())?;
    let mut story = morphpack::Story::new(config, &dataset)?;

    let from = resolve_section(story.page(), &args.from)?;
    let to = resolve_section(story.page(), &args.to)?;
    story.jump_to(from)?;

    let start = story.now();
    let decision = story.request_navigate(to);
    tracing::info!(?decision, "navigation requested");
    story.advance_to(start.saturating_add(morphpack::Millis(args.at_ms)));

    morphpack::write_output(&story.render_svg(), &args.out)?;
    eprintln!(
        "wrote {} (t={}, section {}, {:?})",
        args.out.display(),
        story.now(),
        story.current_section(),
        story.transition_state()
    );
    Ok(())
}

fn cmd_registry(args: RegistryArgs) -> anyhow::Result<()> {
    let (dataset, config) = load_inputs(&args.data, args.story.as_deref())?;
    let story = morphpack::Story::new(config, &dataset)?;
    let viz = morphpack::VizId::from(args.viz);
    let registry = story
        .registry(viz)
        .with_context(|| format!("story has no section hosting '{viz}'"))?;

    let entries = registry.all_entries();
    let rows: Vec<_> = entries
        .iter()
        .map(|(key, d)| RegistryRow {
            key,
            position: d.position,
            radius: d.radius,
            color: d.color,
            mechanism: &d.mechanism,
            group: &d.group,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn resolve_section(page: &morphpack::Page, s: &str) -> anyhow::Result<usize> {
    let index = match s.parse::<usize>() {
        Ok(i) => Some(i).filter(|&i| i < page.len()),
        Err(_) => page.index_of(s),
    };
    index.with_context(|| format!("unknown section '{s}'"))
}
