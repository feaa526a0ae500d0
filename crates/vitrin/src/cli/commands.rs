//! # CLI Layer
//!
//! The only place that knows about the terminal. It:
//! 1. Parses arguments with clap (`setup.rs`)
//! 2. Sets up logging on stderr
//! 3. Resolves the data directory and builds the API (`vitrinapp::init`)
//! 4. Dispatches to the API and prints the rendered result (`render.rs`)
//!
//! Errors bubble up to `main`, which prints them and exits with status 1.

use super::render::{render_json, render_listings, render_media, render_messages, ListView};
use super::setup::{CarouselAction, Cli, Commands, FilterArgs, HeroAction, MediaAction};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vitrinapp::commands::CmdResult;
use vitrinapp::config::VitrinConfig;
use vitrinapp::init::{initialize, VitrinContext};
use vitrinapp::model::{ListingStatus, MediaCategory, PropertyType, SaleType, SlotKind};
use vitrinapp::normalize::Locale;
use vitrinapp::rules::filter::{build_listing_filter, build_project_filter, ListingFilter};
use vitrinapp::rules::media::MediaCategoryInput;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    let mut ctx = initialize(&cwd, cli.data_dir.clone())?;
    debug!(data_dir = %ctx.data_dir.display(), "data directory resolved");
    let output = dispatch(&cli, &mut ctx)?;
    print!("{}", output);
    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for our crates with `-v`.
fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "vitrinapp=debug,vitrin=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(cli: &Cli, ctx: &mut VitrinContext) -> Result<String> {
    let locale = ctx.config.locale();
    let api = &mut ctx.api;

    let (result, view) = match &cli.command {
        Commands::Import { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            (api.import_json(&content)?, None)
        }
        Commands::Listings { filter } => {
            (api.listings(&to_filter(filter)?)?, Some(ListView::Plain))
        }
        Commands::Projects { filter } => {
            (api.projects(&to_filter(filter)?)?, Some(ListView::Plain))
        }
        Commands::Search { rooms } => (api.search(rooms.as_slice())?, Some(ListView::Plain)),
        Commands::Hero { action } => {
            let view = Some(ListView::Slots(SlotKind::Hero));
            match action {
                HeroAction::Set { listing, slot } => {
                    (api.set_hero_slot(listing, Some(slot.as_str()))?, None)
                }
                HeroAction::Clear { listing } => (api.clear_hero(listing)?, None),
                HeroAction::Show => (api.hero_listings()?, view),
            }
        }
        Commands::Carousel { action } => {
            let view = Some(ListView::Slots(SlotKind::Carousel));
            match action {
                CarouselAction::Add { project, slot } => {
                    (api.add_to_carousel(project, slot.as_deref())?, None)
                }
                CarouselAction::Remove { project } => (api.remove_from_carousel(project)?, None),
                CarouselAction::Show => (api.carousel()?, view),
            }
        }
        Commands::Media { action } => match action {
            MediaAction::Categorize {
                project,
                exterior,
                interior,
                map,
                document,
            } => {
                let mut input = MediaCategoryInput::default();
                let lists = [
                    (MediaCategory::Exterior, exterior),
                    (MediaCategory::Interior, interior),
                    (MediaCategory::Map, map),
                    (MediaCategory::Document, document),
                ];
                for (category, raw) in lists {
                    if let Some(raw) = raw {
                        let ids = raw
                            .split(',')
                            .map(str::trim)
                            .filter(|id| !id.is_empty())
                            .map(str::to_string)
                            .collect();
                        input.set(category, ids);
                    }
                }
                (api.categorize_media(project, &input)?, None)
            }
            MediaAction::Show { project } => (api.project_media(project)?, None),
        },
        Commands::Filter { filter, projects } => {
            let filter = to_filter(filter)?;
            let predicate = if *projects {
                build_project_filter(&filter)
            } else {
                build_listing_filter(&filter)
            };
            return render_json(&predicate);
        }
        Commands::Status { listing, status } => (api.set_status(listing, status)?, None),
        Commands::Delete { listing } => (api.delete(listing)?, None),
        Commands::Config { template } => {
            if *template {
                return Ok(VitrinConfig::template());
            }
            if cli.json {
                return render_json(&ctx.config);
            }
            return Ok(render_config(&ctx.config, &ctx.data_dir));
        }
    };

    if cli.json {
        return render_json(&result);
    }
    Ok(render_result(&result, view, locale))
}

fn render_result(result: &CmdResult, view: Option<ListView>, locale: Locale) -> String {
    let mut out = String::new();
    if let Some(view) = view {
        out.push_str(&render_listings(&result.listed, view, locale));
    }
    out.push_str(&render_media(&result.media));
    out.push_str(&render_messages(&result.messages));
    out
}

fn render_config(config: &VitrinConfig, data_dir: &Path) -> String {
    format!(
        "data_dir = {}\nroom_filter = {}\ndefault_locale = {}\ndefault_country_code = {}\n",
        data_dir.display(),
        config.room_filter,
        config.locale(),
        config.default_country_code
    )
}

fn to_filter(args: &FilterArgs) -> Result<ListingFilter> {
    Ok(ListingFilter {
        status: args.status.as_deref().map(str::parse::<ListingStatus>).transpose()?,
        query: args.query.clone(),
        property_type: args
            .property_type
            .as_deref()
            .map(str::parse::<PropertyType>)
            .transpose()?,
        sale_type: args.sale.as_deref().map(str::parse::<SaleType>).transpose()?,
        company: args.company.clone(),
        platform: args.platform,
    })
}
