use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vitrin",
    bin_name = "vitrin",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Homepage curation and project media for a listing catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to the nearest .vitrin)
    #[arg(long, global = true, help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge a catalog JSON file (listings and media) into the store
    Import {
        /// Path to the catalog file
        file: PathBuf,
    },

    /// Admin listing table (projects and archived records hidden by default)
    #[command(alias = "ls")]
    Listings {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Admin project table
    Projects {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Public search by room configuration
    Search {
        /// Room configurations, e.g. 2+1 3+1
        rooms: Vec<String>,
    },

    /// Hero listings on the homepage
    Hero {
        #[command(subcommand)]
        action: HeroAction,
    },

    /// The homepage project carousel
    Carousel {
        #[command(subcommand)]
        action: CarouselAction,
    },

    /// Project media categories and cover
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },

    /// Print the query document a listing filter produces
    Filter {
        #[command(flatten)]
        filter: FilterArgs,

        /// Build the project filter instead
        #[arg(long)]
        projects: bool,
    },

    /// Change a listing's status
    Status {
        /// Listing SKU or id
        listing: String,
        /// DRAFT, PUBLISHED, SOLD, RENTED or ARCHIVED
        status: String,
    },

    /// Delete a listing and its media
    Delete {
        /// Listing SKU or id
        listing: String,
    },

    /// Show the resolved configuration
    Config {
        /// Print a commented vitrin.toml instead
        #[arg(long)]
        template: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HeroAction {
    /// Put a listing in a hero slot
    Set {
        /// Listing SKU or id
        listing: String,
        /// Slot number (1-3); empty removes the listing
        slot: String,
    },
    /// Take a listing out of the hero slots
    Clear {
        /// Listing SKU or id
        listing: String,
    },
    /// List the hero listings
    Show,
}

#[derive(Subcommand, Debug)]
pub enum CarouselAction {
    /// Add a project to the carousel
    Add {
        /// Project SKU or id
        project: String,
        /// Slot number (1-3); first free slot when omitted
        #[arg(long)]
        slot: Option<String>,
    },
    /// Remove a project from the carousel
    Remove {
        /// Project SKU or id
        project: String,
    },
    /// List the carousel
    Show,
}

#[derive(Subcommand, Debug)]
pub enum MediaAction {
    /// Assign media categories. Each flag takes comma-separated media ids;
    /// an empty value clears the category, an omitted flag leaves it alone.
    Categorize {
        /// Project SKU or id
        project: String,
        #[arg(long)]
        exterior: Option<String>,
        #[arg(long)]
        interior: Option<String>,
        #[arg(long)]
        map: Option<String>,
        #[arg(long)]
        document: Option<String>,
    },
    /// List a project's media
    Show {
        /// Project SKU or id
        project: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only this status (archived records are hidden otherwise)
    #[arg(long)]
    pub status: Option<String>,

    /// Free text over SKU, title and location
    #[arg(short, long)]
    pub query: Option<String>,

    /// APARTMENT, VILLA, LAND, COMMERCIAL or OFFICE
    #[arg(long = "type")]
    pub property_type: Option<String>,

    /// SALE or RENT
    #[arg(long)]
    pub sale: Option<String>,

    /// Company name contains
    #[arg(long)]
    pub company: Option<String>,

    /// Listed on an external platform
    #[arg(long)]
    pub platform: Option<bool>,
}
