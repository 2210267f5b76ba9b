use anyhow::{Context, Result, bail};
use blockpage_config::Config;
use blockpage_engine::{
    BlockData, BlockId, BlockStore, BlockStyles, BlockType, BlockUpdate, Cmd, DocumentsDir,
    EngineError, Format, TemplateCategory, TemplateRegistry,
};
use clap::{Parser, Subcommand};
use relative_path::RelativePath;
use std::{
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "blockpage", version, about = "Compose pages out of typed blocks")]
struct Cli {
    /// Documents directory (overrides `documents_path` from the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/blockpage/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging: -v for info, -vv for debug
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available block templates
    Templates,

    /// Write a config file pointing at a documents directory
    Init {
        /// Created if it does not exist yet
        documents_path: PathBuf,
        /// Save pages without indentation
        #[arg(long)]
        compact: bool,
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Page(PageCommand),
}

/// Subcommands that work inside the documents directory
#[derive(Subcommand)]
enum PageCommand {
    /// List page documents in the documents directory
    List,

    /// Create an empty page document
    New {
        page: String,
        /// Replace an existing document
        #[arg(long)]
        force: bool,
    },

    /// Print the blocks of a page in order
    Show { page: String },

    /// Add a block stamped from its template
    Add {
        page: String,
        block_type: BlockType,
        /// Insert position (clamped to the page); appends when omitted
        #[arg(long, allow_negative_numbers = true)]
        at: Option<isize>,
    },

    /// Merge data fields and/or styles into a block
    Update {
        page: String,
        id: String,
        /// JSON object of payload fields to merge
        #[arg(long)]
        data: Option<String>,
        /// JSON object of style fields to set
        #[arg(long)]
        styles: Option<String>,
    },

    /// Remove a block
    Delete { page: String, id: String },

    /// Move a block to a position (clamped to the page)
    Move {
        page: String,
        id: String,
        #[arg(allow_negative_numbers = true)]
        to: isize,
    },

    /// Move a block one step towards the top
    Up { page: String, id: String },

    /// Move a block one step towards the bottom
    Down { page: String, id: String },

    /// Insert a copy of a block right after it
    Duplicate { page: String, id: String },

    /// Remove every block from a page
    Clear { page: String },

    /// Check that every entry of a page document loads
    Validate { page: String },
}

/// The documents directory and the layout pages are saved with
struct Workspace {
    documents: DocumentsDir,
    format: Format,
}

impl Workspace {
    fn resolve(dir: Option<PathBuf>, config_path: &Path) -> Result<Self> {
        log::info!("Config path: {}", config_path.display());

        let config = match Config::load_from_path(config_path) {
            Ok(config) => config,
            // An explicit directory only borrows formatting from the config
            Err(e) if dir.is_some() => {
                log::warn!("Ignoring unreadable config file: {e}");
                None
            }
            Err(e) => return Err(e.into()),
        };
        let format = if config.as_ref().is_none_or(|config| config.pretty_export) {
            Format::Pretty
        } else {
            Format::Compact
        };

        let (documents_path, from_config) = match (dir, config) {
            (Some(dir), _) => (dir, false),
            (None, Some(config)) => (config.documents_path, true),
            (None, None) => bail!(
                "No documents directory given and no config file at {}. \
                 Pass --dir or run `blockpage init <documents-path>`",
                config_path.display()
            ),
        };

        let documents = DocumentsDir::open(documents_path).with_context(|| {
            if from_config {
                format!("Check documents_path in {}", config_path.display())
            } else {
                "Check the --dir argument".to_string()
            }
        })?;

        Ok(Self { documents, format })
    }

    fn load(&self, page: &str) -> Result<BlockStore> {
        let (store, _) = self.documents.load(RelativePath::new(page))?;
        Ok(store)
    }

    fn save(&self, page: &str, store: &BlockStore) -> Result<()> {
        self.documents.save(RelativePath::new(page), store, self.format)?;
        log::info!("Saved {page} ({} blocks)", store.len());
        Ok(())
    }

    /// Load a page, apply one command and write it back
    fn edit(&self, page: &str, cmd: Cmd) -> Result<BlockStore> {
        let mut store = self.load(page)?;
        store.apply(cmd)?;
        self.save(page, &store)?;
        Ok(store)
    }
}

fn run(cli: Cli) -> Result<Vec<String>> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    match cli.command {
        Command::Templates => Ok(template_lines(&TemplateRegistry::builtin())),
        Command::Init {
            documents_path,
            compact,
            force,
        } => init(&config_path, documents_path, compact, force),
        Command::Page(command) => {
            run_page_command(&Workspace::resolve(cli.dir, &config_path)?, command)
        }
    }
}

fn init(
    config_path: &Path,
    documents_path: PathBuf,
    compact: bool,
    force: bool,
) -> Result<Vec<String>> {
    if config_path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to replace it)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&documents_path).with_context(|| {
        format!(
            "Failed to create documents directory '{}'",
            documents_path.display()
        )
    })?;
    let documents_path = documents_path.canonicalize()?;

    let config = Config {
        pretty_export: !compact,
        ..Config::new(documents_path)
    };
    config.save_to_path(config_path)?;

    Ok(vec![
        format!("Wrote {}", config_path.display()),
        format!("Documents directory: {}", config.documents_path.display()),
    ])
}

fn run_page_command(workspace: &Workspace, command: PageCommand) -> Result<Vec<String>> {
    let lines = match command {
        PageCommand::List => workspace
            .documents
            .pages()?
            .iter()
            .map(ToString::to_string)
            .collect(),
        PageCommand::New { page, force } => {
            workspace
                .documents
                .create(RelativePath::new(&page), workspace.format, force)?;
            vec![format!("Created {page}")]
        }
        PageCommand::Show { page } => block_lines(&workspace.load(&page)?),
        PageCommand::Add {
            page,
            block_type,
            at,
        } => {
            let mut store = workspace.load(&page)?;
            let patch = store.apply(Cmd::AddBlock { block_type, at })?;
            workspace.save(&page, &store)?;
            match patch.created.and_then(|id| store.get(&id).cloned()) {
                Some(block) => vec![format!(
                    "Added {block_type} block {} at position {}",
                    block.id(),
                    block.position()
                )],
                None => Vec::new(),
            }
        }
        PageCommand::Update {
            page,
            id,
            data,
            styles,
        } => {
            let update = parse_update(data.as_deref(), styles.as_deref())?;
            workspace.edit(
                &page,
                Cmd::UpdateBlock {
                    id: BlockId::from(id.as_str()),
                    update,
                },
            )?;
            vec![format!("Updated block {id}")]
        }
        PageCommand::Delete { page, id } => {
            workspace.edit(&page, Cmd::DeleteBlock { id: id.as_str().into() })?;
            vec![format!("Deleted block {id}")]
        }
        PageCommand::Move { page, id, to } => {
            let id = BlockId::from(id);
            let store = workspace.edit(
                &page,
                Cmd::MoveBlock {
                    id: id.clone(),
                    to,
                },
            )?;
            vec![moved_line(&store, &id)]
        }
        PageCommand::Up { page, id } => {
            let id = BlockId::from(id);
            let store = workspace.edit(&page, Cmd::MoveUp { id: id.clone() })?;
            vec![moved_line(&store, &id)]
        }
        PageCommand::Down { page, id } => {
            let id = BlockId::from(id);
            let store = workspace.edit(&page, Cmd::MoveDown { id: id.clone() })?;
            vec![moved_line(&store, &id)]
        }
        PageCommand::Duplicate { page, id } => {
            let mut store = workspace.load(&page)?;
            let patch = store.apply(Cmd::DuplicateBlock {
                id: id.as_str().into(),
            })?;
            workspace.save(&page, &store)?;
            match patch.created {
                Some(copy) => vec![format!("Duplicated block {id} as {copy}")],
                None => Vec::new(),
            }
        }
        PageCommand::Clear { page } => {
            workspace.edit(&page, Cmd::ClearBlocks)?;
            vec![format!("Cleared {page}")]
        }
        PageCommand::Validate { page } => {
            let (_, summary) = workspace.documents.load(RelativePath::new(&page))?;
            let mut lines: Vec<String> = summary
                .dropped
                .iter()
                .map(|entry| format!("dropped {entry}"))
                .collect();
            if !summary.dropped.is_empty() {
                lines.push(format!(
                    "{page}: {} blocks load, {} entries would be dropped",
                    summary.imported,
                    summary.dropped_count()
                ));
                for line in &lines {
                    eprintln!("{line}");
                }
                bail!("{page} has invalid entries");
            }
            lines.push(format!("{page}: {} blocks, all valid", summary.imported));
            lines
        }
    };

    Ok(lines)
}

fn parse_update(data: Option<&str>, styles: Option<&str>) -> Result<BlockUpdate> {
    if data.is_none() && styles.is_none() {
        bail!("Nothing to update: pass --data and/or --styles");
    }

    let data = data
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("--data is not valid JSON")?;
    let styles = styles
        .map(serde_json::from_str::<BlockStyles>)
        .transpose()
        .context("--styles is not a valid style object")?;

    Ok(BlockUpdate { data, styles })
}

fn moved_line(store: &BlockStore, id: &BlockId) -> String {
    match store.position_of(id) {
        Some(position) => format!("Block {id} is at position {position}"),
        None => format!("Block {id} is gone"),
    }
}

fn template_lines(registry: &TemplateRegistry) -> Vec<String> {
    let categories = [
        TemplateCategory::Basic,
        TemplateCategory::Media,
        TemplateCategory::Layout,
        TemplateCategory::Interactive,
    ];

    let mut lines = Vec::new();
    for category in categories {
        let mut templates = registry.by_category(category).peekable();
        if templates.peek().is_none() {
            continue;
        }
        lines.push(format!("{category}:"));
        for template in templates {
            lines.push(format!(
                "  {:<8} {} - {}",
                template.block_type().as_str(),
                template.display_name,
                template.description
            ));
        }
    }
    lines
}

fn block_lines(store: &BlockStore) -> Vec<String> {
    if store.is_empty() {
        return vec!["(empty page)".to_string()];
    }

    store
        .blocks()
        .iter()
        .map(|block| {
            format!(
                "{:>3}  {:<8} {}  {}",
                block.position(),
                block.block_type().as_str(),
                block.id(),
                summary(block.data())
            )
        })
        .collect()
}

/// One-line description of a payload for listings
fn summary(data: &BlockData) -> String {
    match data {
        BlockData::Text(text) => quoted(&text.content),
        BlockData::Heading(heading) => format!("h{} {}", heading.level, quoted(&heading.content)),
        BlockData::Image(image) => image.src.clone(),
        BlockData::Button(button) => format!("{} -> {}", quoted(&button.text), button.url),
        BlockData::Spacer(spacer) => format!("{}px", spacer.height),
        BlockData::Divider(divider) => format!("{}px", divider.thickness),
        BlockData::Gallery(gallery) => format!("{} images", gallery.images.len()),
        BlockData::Form(form) => format!("{} ({} fields)", quoted(&form.title), form.fields.len()),
        BlockData::Embed(embed) => embed.url.clone(),
        BlockData::Columns(columns) => format!("{} columns", columns.columns.len()),
        BlockData::Video(video) => video.src.clone(),
        BlockData::Quote(quote) => quoted(&quote.content),
    }
}

fn quoted(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() > MAX_CHARS {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("\"{head}...\"")
    } else {
        format!("\"{text}\"")
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            let not_found = e
                .downcast_ref::<EngineError>()
                .is_some_and(EngineError::is_not_found);
            if not_found {
                eprintln!("Notice: {e}");
            } else {
                eprintln!("Error: {e:#}");
            }
            process::exit(1);
        }
    }
}
