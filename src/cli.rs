use clap::{Parser, Subcommand, ValueEnum};
use cve_store::cve_tracking::domain::Vendor;
use std::path::PathBuf;

/// Vendors with an "unfixed" query
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnfixedVendor {
    Redhat,
    Debian,
    Ubuntu,
}

/// Vendors with release-scoped "fixed" statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FixedVendor {
    Debian,
    Ubuntu,
}

impl From<UnfixedVendor> for Vendor {
    fn from(vendor: UnfixedVendor) -> Self {
        match vendor {
            UnfixedVendor::Redhat => Vendor::RedHat,
            UnfixedVendor::Debian => Vendor::Debian,
            UnfixedVendor::Ubuntu => Vendor::Ubuntu,
        }
    }
}

impl From<FixedVendor> for Vendor {
    fn from(vendor: FixedVendor) -> Self {
        match vendor {
            FixedVendor::Debian => Vendor::Debian,
            FixedVendor::Ubuntu => Vendor::Ubuntu,
        }
    }
}

/// Store and query vendor CVE records in Redis
#[derive(Parser, Debug)]
#[command(name = "cve-store")]
#[command(version)]
#[command(about = "Store and query vendor CVE records in Redis", long_about = None)]
pub struct Args {
    /// Store connection URL [default: redis://127.0.0.1:6379/0]
    #[arg(long, global = true, value_name = "URL")]
    pub dbpath: Option<String>,

    /// Expire written keys after this many seconds (0 keeps them forever)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub expire: Option<u64>,

    /// Path to a config file (defaults to ./cve-store.config.yml if present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use an empty in-process store instead of connecting to Redis
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the store is reachable
    Ping,

    /// Load normalized vendor records from a JSON file
    Load {
        /// redhat, debian, ubuntu or microsoft
        vendor: Vendor,

        /// JSON array of vendor records
        #[arg(short, long, value_name = "PATH")]
        file: PathBuf,

        /// JSON array of Microsoft products (product_id, product_name)
        #[arg(long, value_name = "PATH")]
        products: Option<PathBuf>,
    },

    /// Print stored records as JSON
    Get {
        /// redhat, debian, ubuntu or microsoft
        vendor: Vendor,

        /// One or more CVE identifiers
        #[arg(required = true, value_name = "CVE-ID")]
        cve_ids: Vec<String>,
    },

    /// Print CVEs still affecting a package on a release
    Unfixed {
        #[arg(value_enum)]
        vendor: UnfixedVendor,

        /// Major version ("12", "20.04", "8")
        #[arg(short, long)]
        release: String,

        /// Source package name
        #[arg(short, long)]
        package: String,

        /// Red Hat only: leave out "Will not fix" package states
        #[arg(long)]
        ignore_will_not_fix: bool,
    },

    /// Print CVEs fixed for a package on a release
    Fixed {
        #[arg(value_enum)]
        vendor: FixedVendor,

        /// Major version ("12", "20.04")
        #[arg(short, long)]
        release: String,

        /// Source package name
        #[arg(short, long)]
        package: String,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Command {
    /// Whether `--ignore-will-not-fix` was given on the command line
    pub fn ignore_will_not_fix(&self) -> bool {
        matches!(
            self,
            Command::Unfixed {
                ignore_will_not_fix: true,
                ..
            }
        )
    }
}
