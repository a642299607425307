use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stockroom_inventory::{
    CategoryFilter, FilterSpec, InventoryPipeline, InventorySettings, JsonFileSource, SortDirection,
    SortSpec,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Group, filter and sort an inventory export",
    long_about = "Reads a JSON array of inventory records, merges batches of the same product, \
                  applies the requested filter and sort, and prints the resulting view as JSON."
)]
struct Cli {
    /// JSON file holding an array of inventory records.
    records: PathBuf,

    /// Case-insensitive substring matched against name or category.
    #[arg(short, long, default_value = "")]
    search: String,

    /// Exact category to keep, or "all".
    #[arg(short, long, default_value = CategoryFilter::ALL)]
    category: String,

    /// Keep only low-stock or empty products.
    #[arg(long)]
    low_stock: bool,

    /// Field to sort by (name, category, quantity, costPerUnit, updatedAt, ...).
    #[arg(long, default_value = "name")]
    sort: String,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn sort_spec(&self) -> SortSpec {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortSpec::new(self.sort.as_str(), direction)
    }
}

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let cli = Cli::parse();
    let settings = InventorySettings::from_env();
    let pipeline = InventoryPipeline::from_settings(&settings);

    let sort = cli.sort_spec();
    let filter = FilterSpec::default()
        .search(cli.search)
        .in_category(cli.category)
        .low_stock_only(cli.low_stock);

    let source = JsonFileSource::new(&cli.records);
    let view = pipeline
        .view_from(&source, &filter, &sort)
        .with_context(|| format!("failed to load {}", source.path().display()))?;

    tracing::info!(
        groups = view.stats.group_count,
        visible = view.groups.len(),
        low_stock = view.stats.low_stock_count,
        out_of_stock = view.stats.out_of_stock_count,
        "inventory view ready"
    );

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write report")?;

    Ok(())
}
