// ==========================================
// CoolCraft TDS - 命令行参数定义
// ==========================================
// 工具: clap derive
// 子命令: sheets / inspect / suggest / report
// ==========================================

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use coolcraft_tds::{ExportFormat, LoadUnit, UnitKind};
use std::path::PathBuf;

/// CoolCraft TDS - HVAC equipment combo selection and technical data sheets
#[derive(Parser)]
#[command(name = "coolcraft-tds")]
#[command(about = "Pick indoor/outdoor unit combinations from a catalog and export a TDS")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to $COOLCRAFT_TDS_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Catalog file and how to read it
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog file (.xlsx, .xls or .csv)
    pub file: PathBuf,

    /// Sheet to read (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// indoor (kW capacities) or outdoor (HP capacities)
    #[arg(short, long)]
    pub unit_kind: UnitKind,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the sheets of a catalog file
    Sheets {
        /// Catalog file (.xlsx, .xls or .csv)
        file: PathBuf,
    },
    /// Show the detected capacity column and available sizes
    Inspect {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Print ranked candidate combinations for a load
    Suggest {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Required load (defaults to the configured default load)
        #[arg(short, long)]
        load: Option<f64>,

        /// Unit of the load: kw, hp or ton (defaults to the catalog unit)
        #[arg(long)]
        load_unit: Option<LoadUnit>,
    },
    /// Build and export the data sheet for one combination
    Report {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Required load (automatic mode)
        #[arg(short, long, conflicts_with = "manual")]
        load: Option<f64>,

        /// Unit of the load: kw, hp or ton (defaults to the catalog unit)
        #[arg(long)]
        load_unit: Option<LoadUnit>,

        /// Candidate to use, 1-based (automatic mode)
        #[arg(long, default_value_t = 1)]
        option: usize,

        /// Manual combination such as "10+8+8"
        #[arg(short, long)]
        manual: Option<String>,

        /// Replace an instance's model, e.g. 2=MMY-MAP0806HT
        #[arg(long = "override", value_parser = parse_override)]
        overrides: Vec<(usize, String)>,

        /// Client name
        #[arg(long, default_value = "Client")]
        client: String,

        /// Manufacturer (defaults to the configured manufacturer)
        #[arg(long)]
        manufacturer: Option<String>,

        /// Billing / sales contact
        #[arg(long, default_value = "")]
        billing: String,

        /// Report date YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output file (defaults to TDS_{client}_{timestamp}.{ext})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// csv or json (defaults to the configured format)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}

/// Parse INSTANCE=MODEL
fn parse_override(raw: &str) -> Result<(usize, String), String> {
    let (instance, model) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INSTANCE=MODEL, got '{}'", raw))?;

    let instance: usize = instance
        .trim()
        .parse()
        .map_err(|_| format!("invalid instance number '{}'", instance.trim()))?;

    let model = model.trim();
    if model.is_empty() {
        return Err(format!("missing model in '{}'", raw));
    }
    Ok((instance, model.to_string()))
}
