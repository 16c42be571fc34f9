//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::read::package::list::Sort;

/// Client of the transport management system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session.
    Login {
        /// Username to log in with.
        username: String,

        /// Password to log in with.
        #[arg(long, env = "TMS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the remembered session.
    Logout,

    /// Show who the remembered session belongs to.
    Whoami,

    /// Browse packages available on the marketplace.
    Marketplace {
        /// Text or exact price to search for.
        #[arg(long)]
        search: Option<String>,

        /// Sort order.
        #[arg(long, default_value_t = Sort::Latest)]
        sort: Sort,

        /// Page number, starting from 1.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List offers of the current view.
    Offers {
        /// Include offers the view hides by default.
        #[arg(long)]
        all: bool,
    },

    /// Accept an offer.
    Accept {
        /// ID of the offer.
        id: u64,
    },

    /// Reject an offer.
    Reject {
        /// ID of the offer.
        id: u64,
    },

    /// Counter an offer with another price.
    Counter {
        /// ID of the offer.
        id: u64,

        /// New price.
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Book an accepted offer.
    Book {
        /// ID of the offer.
        id: u64,
    },

    /// Withdraw an open offer.
    Withdraw {
        /// ID of the offer.
        id: u64,
    },

    /// Propose a price for a marketplace package.
    Propose {
        /// ID of the package.
        package_id: u64,

        /// Proposed price.
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::read::package::list::Sort;

    use super::{Args, Command};

    #[test]
    fn parses_counter_with_negative_price() {
        let args =
            Args::try_parse_from(["tms", "counter", "7", "-100"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(matches!(
            args.command,
            Command::Counter { id: 7, ref price } if price == "-100",
        ));
    }

    #[test]
    fn parses_marketplace_options() {
        let args = Args::try_parse_from([
            "tms",
            "marketplace",
            "--sort",
            "price",
            "--page",
            "2",
            "--config",
            "other.toml",
        ])
        .unwrap();

        assert_eq!(args.config, "other.toml");
        assert!(matches!(
            args.command,
            Command::Marketplace {
                search: None,
                sort: Sort::Price,
                page: 2,
            },
        ));
    }
}
