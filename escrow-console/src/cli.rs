//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "escrow-console",
    version,
    about = "Browse an escrow listing from a JSON dataset",
    long_about = "Serves a JSON array of rows as a paginated listing and lets you \
                  search, sort, page, select and inspect it from the terminal."
)]
pub struct Cli {
    /// JSON file holding an array of row objects.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Config file (default: console.json in the config directory).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rows per page (overrides the config).
    #[arg(long = "rows-per-page", value_name = "N")]
    pub rows_per_page: Option<usize>,

    /// Searchable field; repeat for several (overrides the config).
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Field holding the row id (overrides the config).
    #[arg(long = "id-field", value_name = "FIELD")]
    pub id_field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "escrow-console",
            "rows.json",
            "--rows-per-page",
            "5",
            "--search-field",
            "name",
            "--search-field",
            "status",
            "--id-field",
            "reference",
        ])
        .unwrap();

        assert_eq!(cli.dataset, PathBuf::from("rows.json"));
        assert_eq!(cli.rows_per_page, Some(5));
        assert_eq!(cli.search_fields, vec!["name", "status"]);
        assert_eq!(cli.id_field.as_deref(), Some("reference"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_dataset_is_required() {
        assert!(Cli::try_parse_from(["escrow-console"]).is_err());
    }
}
