// ==========================================
// CoolCraft TDS - 命令行主入口
// ==========================================
// 职责: 解析命令行 → 加载配置 → 选型会话 → 输出/导出
// ==========================================

mod cli;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{CatalogArgs, Cli, Commands};
use coolcraft_tds::api::{ComboApi, SelectionMode};
use coolcraft_tds::config::{AppConfig, ConfigManager};
use coolcraft_tds::domain::types::{format_size, LoadUnit, UnitKind};
use coolcraft_tds::report::{option_line, ReportExporter, ReportMetadata, ReportTable};
use coolcraft_tds::{logging, EnrichedCombo, APP_NAME, VERSION};
use std::path::PathBuf;
use tracing::{debug, info};

/// 预览时每个候选展示的行数
const PREVIEW_ROWS: usize = 10;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    debug!("{} v{}", APP_NAME, VERSION);

    let config = match &cli.config {
        Some(path) => ConfigManager::load(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => ConfigManager::load_default().context("无法加载默认配置文件")?,
    };

    match cli.command {
        Commands::Sheets { file } => {
            for name in ComboApi::sheet_names(&file)? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Inspect { catalog } => inspect(&catalog, &config),
        Commands::Suggest {
            catalog,
            load,
            load_unit,
        } => suggest(&catalog, &config, load, load_unit),
        Commands::Report {
            catalog,
            load,
            load_unit,
            option,
            manual,
            overrides,
            client,
            manufacturer,
            billing,
            date,
            output,
            format,
        } => {
            let mut api = open_session(&catalog, &config)?;

            let mut selection = match manual {
                Some(input) => api.manual(&input)?,
                None => {
                    let (value, unit) = resolve_load(&config, catalog.unit_kind, load, load_unit);
                    api.generate(value, unit)?;
                    api.select(option)?
                }
            };

            for (instance, model) in &overrides {
                api.override_instance(&mut selection, *instance, model)?;
            }

            let metadata = ReportMetadata {
                client,
                manufacturer: manufacturer
                    .or_else(|| config.manufacturer.clone())
                    .unwrap_or_default(),
                billing_sales: billing,
                report_date: date.unwrap_or_else(|| Local::now().date_naive()),
            };

            let table = api.assemble_report(&selection, &metadata)?;
            print_table(&table);

            let format = format.unwrap_or(config.export_format);
            let path = output.unwrap_or_else(|| {
                PathBuf::from(ReportExporter::default_file_name(
                    &metadata.client,
                    Local::now().naive_local(),
                    format,
                ))
            });

            ReportExporter
                .write(&table, &path, format)
                .with_context(|| format!("无法写出报表 {}", path.display()))?;
            println!("\nSaved {}", path.display());
            Ok(())
        }
    }
}

// ==========================================
// 子命令实现
// ==========================================

fn open_session(args: &CatalogArgs, config: &AppConfig) -> Result<ComboApi> {
    let api = ComboApi::load(
        &args.file,
        args.sheet.as_deref(),
        args.unit_kind,
        config.generator_settings(),
    )
    .with_context(|| format!("无法读取目录 {}", args.file.display()))?;
    Ok(api)
}

fn inspect(args: &CatalogArgs, config: &AppConfig) -> Result<()> {
    let api = open_session(args, config)?;
    let label = args.unit_kind.capacity_label();

    println!("Rows:     {}", api.catalog().len());
    println!("Columns:  {}", api.catalog().columns().join(", "));
    println!(
        "Capacity: {}",
        api.capacity_column().unwrap_or("(not detected)")
    );

    let sizes: Vec<String> = api
        .sizes()
        .iter()
        .map(|s| format!("{}{}", format_size(*s), label))
        .collect();
    println!("Sizes:    {}", sizes.join(", "));

    match api.mode() {
        SelectionMode::Automatic => println!("Mode:     automatic"),
        SelectionMode::ManualOnly { reason } => println!("Mode:     manual only ({})", reason),
    }
    Ok(())
}

fn suggest(
    args: &CatalogArgs,
    config: &AppConfig,
    load: Option<f64>,
    load_unit: Option<LoadUnit>,
) -> Result<()> {
    let mut api = open_session(args, config)?;
    if let SelectionMode::ManualOnly { reason } = api.mode() {
        bail!("自动组合不可用: {}; 请使用 report --manual", reason);
    }

    let (value, unit) = resolve_load(config, args.unit_kind, load, load_unit);
    info!(load = value, unit = %unit, "生成候选组合");

    let candidates: Vec<EnrichedCombo> = api.generate(value, unit)?.to_vec();
    for (idx, enriched) in candidates.iter().enumerate() {
        println!("{}", option_line(idx + 1, enriched, args.unit_kind));
        for resolved in enriched.rows.iter().take(PREVIEW_ROWS) {
            let models = api.model_choices(resolved);
            let model = resolved
                .row
                .as_ref()
                .and_then(|row| row.get(coolcraft_tds::api::MODEL_COLUMN))
                .map(ReportTable::display_value)
                .unwrap_or_else(|| "N/A".to_string());
            if models.len() > 1 {
                println!(
                    "    #{} {} (alternatives: {})",
                    resolved.instance,
                    model,
                    models.join(", ")
                );
            } else {
                println!("    #{} {}", resolved.instance, model);
            }
        }
    }
    Ok(())
}

/// 负荷缺省值: 室外机 default_load_hp (HP), 室内机 default_load_kw (kW)
///
/// 未给出负荷时忽略 --load-unit, 缺省值按目录单位解释
fn resolve_load(
    config: &AppConfig,
    unit_kind: UnitKind,
    load: Option<f64>,
    load_unit: Option<LoadUnit>,
) -> (f64, LoadUnit) {
    match load {
        Some(value) => (value, load_unit.unwrap_or_else(|| unit_kind.capacity_unit())),
        None => {
            let value = match unit_kind {
                UnitKind::Outdoor => config.default_load_hp,
                UnitKind::Indoor => config.default_load_kw,
            };
            (value, unit_kind.capacity_unit())
        }
    }
}

fn print_table(table: &ReportTable) {
    println!("{}", table.columns.join(" | "));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(ReportTable::display_value).collect();
        println!("{}", cells.join(" | "));
    }
}
