use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vocabdb::{Catalog, NamedCollection, NamedEntity, Profile, SnapshotFormat, StoreConfig};

#[derive(Debug, Parser)]
#[command(
    name = "vocabdb",
    version,
    about = "Manage named vocabularies and the profiles that reference them"
)]
pub struct App {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Snapshot format (overrides the config)
    #[arg(long, global = true)]
    format: Option<SnapshotFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Define a new entry in a vocabulary
    Define {
        collection: String,
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List every entry of a vocabulary
    List { collection: String },
    /// Print the id of a named entry
    FindId { collection: String, name: String },
    /// Print the name of an entry id
    FindName { collection: String, id: String },
    /// Fail unless every name is defined
    Assert {
        collection: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Profile operations
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Print the whole catalog as JSON
    Dump,
    /// Remove every profile, interest and favorite
    Reset,
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Create a profile
    Define(ProfileArgs),
    /// Replace a profile's fields and references; omitted fields are cleared
    Update(ProfileArgs),
    /// Show a profile and its selectable choices
    Show { username: String },
}

#[derive(Debug, Args)]
struct ProfileArgs {
    username: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    picture: Option<String>,
    #[arg(long)]
    github: Option<String>,
    #[arg(long)]
    facebook: Option<String>,
    #[arg(long)]
    instagram: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long = "favorite")]
    favorites: Vec<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> Profile {
        let mut profile = Profile::new(self.username)
            .with_interests(self.interests)
            .with_favorites(self.favorites);
        profile.first_name = self.first_name;
        profile.last_name = self.last_name;
        profile.title = self.title;
        profile.picture = self.picture;
        profile.github = self.github;
        profile.facebook = self.facebook;
        profile.instagram = self.instagram;
        profile.bio = self.bio;
        profile
    }
}

impl App {
    fn load_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => StoreConfig::default(),
        };
        if let Some(data) = &self.data {
            config = config.data_path(data);
        }
        if let Some(format) = self.format {
            config = config.format(format);
        }
        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        init_tracing(&config.log_level);

        let catalog = Catalog::open(config).context("opening catalog")?;
        debug!(command = ?self.command, "running command");

        let mutated = execute(&catalog, self.command)?;
        if mutated {
            catalog.save().context("saving catalog")?;
        }
        Ok(())
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn vocabulary<'a>(
    catalog: &'a Catalog,
    name: &str,
) -> Result<&'a Arc<NamedCollection<NamedEntity>>> {
    catalog
        .vocabulary(name)
        .ok_or_else(|| anyhow!("unknown collection '{}' (expected interests or favorites)", name))
}

/// Runs one command; returns whether the catalog changed.
fn execute(catalog: &Catalog, command: Command) -> Result<bool> {
    match command {
        Command::Define {
            collection,
            name,
            description,
        } => {
            let id = vocabulary(catalog, &collection)?.define(NamedEntity::new(name, description))?;
            println!("{}", id);
            Ok(true)
        }
        Command::List { collection } => {
            for entry in &vocabulary(catalog, &collection)?.find_all()? {
                println!(
                    "{}\t{}\t{}",
                    entry.id,
                    entry.doc.name,
                    entry.doc.description.as_deref().unwrap_or("")
                );
            }
            Ok(false)
        }
        Command::FindId { collection, name } => {
            println!("{}", vocabulary(catalog, &collection)?.find_id(&name)?);
            Ok(false)
        }
        Command::FindName { collection, id } => {
            println!("{}", vocabulary(catalog, &collection)?.find_name(id.as_str())?);
            Ok(false)
        }
        Command::Assert { collection, names } => {
            vocabulary(catalog, &collection)?.assert_names(&names)?;
            println!("ok");
            Ok(false)
        }
        Command::Profile(ProfileCommand::Define(args)) => {
            let id = catalog.profiles().define(args.into_profile())?;
            println!("{}", id);
            Ok(true)
        }
        Command::Profile(ProfileCommand::Update(args)) => {
            let username = args.username.clone();
            catalog.profiles().update(&username, args.into_profile())?;
            println!("ok");
            Ok(true)
        }
        Command::Profile(ProfileCommand::Show { username }) => {
            let profile = catalog.profiles().find_by_username(&username)?;
            let choices = catalog.profiles().choices(&username)?;
            let report = serde_json::json!({
                "id": profile.id,
                "profile": profile.doc,
                "choices": choices,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(false)
        }
        Command::Dump => {
            println!("{}", serde_json::to_string_pretty(&catalog.snapshot()?)?);
            Ok(false)
        }
        Command::Reset => {
            let removed = catalog.remove_all_entities()?;
            println!("removed {}", removed);
            Ok(true)
        }
    }
}
