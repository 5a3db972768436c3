use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List supplies, optionally filtered.
    Catalog {
        /// Category slug, or "all".
        #[arg(long, default_value = "all")]
        category: String,
        /// Only popular products.
        #[arg(long, default_value_t = false)]
        popular: bool,
        /// Case-insensitive text match on name, description and features.
        #[arg(long)]
        search: Option<String>,
    },
    /// List categories with product counts.
    Categories,
    /// Inspect or edit the saved quote.
    Quote {
        #[command(subcommand)]
        command: QuoteCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum QuoteCommand {
    Show,
    /// Add one unit of a catalog product.
    Add { id: String },
    Remove { id: String },
    /// Set an absolute quantity; zero or below removes the line.
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    Inc { id: String },
    Dec { id: String },
    Clear,
    /// Validate contact details and print the mailto link for the quote.
    Request {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "either")]
        contact_method: String,
        #[arg(long)]
        notes: Option<String>,
    },
}
