use std::env;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lotview_pipeline::aging::AgingSummary;
use lotview_pipeline::cache::InMemorySnapshotCache;
use lotview_pipeline::components::file_source::FileSource;
use lotview_pipeline::export::export_csv;
use lotview_pipeline::model_normalizer::row_display_name;
use lotview_pipeline::{
    Dashboard, DashboardConfig, DrillSelector, InventoryKpis, InventoryRow, LoadOutcome,
    ModelGroup, ViewStore,
};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson {
    generated_at: String,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    drill: Option<String>,
    load_ms: u128,
    kpis: InventoryKpis,
    aging: AgingSummary,
    oldest_units: Vec<UnitJson>,
    groups: Vec<GroupJson>,
}

#[derive(Serialize)]
struct GroupJson {
    heading: String,
    display_name: String,
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_number: Option<String>,
    units: Vec<UnitJson>,
}

#[derive(Serialize)]
struct UnitJson {
    stock_number: String,
    display_name: String,
    trim: String,
    exterior_color: String,
    age: u32,
    msrp: f64,
    in_transit: bool,
    vin: String,
}

fn unit_json(row: &InventoryRow) -> UnitJson {
    UnitJson {
        stock_number: row.stock_number.clone(),
        display_name: row_display_name(row),
        trim: row.trim.clone(),
        exterior_color: row.exterior_color.clone(),
        age: row.age,
        msrp: row.msrp,
        in_transit: row.is_in_transit(),
        vin: row.vin.clone(),
    }
}

fn build_json(
    state: &ViewStore,
    groups: &[ModelGroup],
    drill: Option<DrillSelector>,
    load_ms: u128,
) -> DigestJson {
    DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        query: state.query_string(),
        drill: drill.map(|d| d.key().to_string()),
        load_ms,
        kpis: state.kpis(),
        aging: state.aging_summary().clone(),
        oldest_units: state.oldest_units().iter().map(unit_json).collect(),
        groups: groups
            .iter()
            .map(|g| GroupJson {
                heading: g.heading(),
                display_name: g.display_name.clone(),
                year: g.year,
                model_number: g.model_number.clone(),
                units: g.rows.iter().map(unit_json).collect(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs().round() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_human(
    state: &ViewStore,
    groups: &[ModelGroup],
    drill: Option<DrillSelector>,
    load_ms: u128,
) {
    let kpis = state.kpis();
    println!();
    println!("  LOTVIEW \u{00b7} Inventory Digest");
    println!("  {:\u{2500}<64}", "");
    println!(
        "  {} vehicles  \u{00b7}  {} in stock  \u{00b7}  {} in transit  \u{00b7}  {} new arrivals",
        kpis.total_vehicles, kpis.in_stock, kpis.in_transit, kpis.new_arrivals
    );
    println!(
        "  avg age {:.1} days  \u{00b7}  ${} total MSRP",
        kpis.average_age,
        format_dollars(kpis.total_msrp)
    );
    println!();

    println!("  Aging (on lot)");
    for bucket in &state.aging_summary().buckets {
        println!(
            "    {:>6} days  {:>5}  {:>5.1}%",
            bucket.bucket.label(),
            bucket.count,
            bucket.percent
        );
    }
    println!();

    let oldest = state.oldest_units();
    if !oldest.is_empty() {
        println!("  Oldest units");
        for row in &oldest {
            println!(
                "    {:10} {:>4}d  {}",
                row.stock_number,
                row.age,
                row_display_name(row)
            );
        }
        println!();
    }

    match drill {
        Some(selector) => println!("  {}", selector),
        None => {
            let query = state.query_string();
            if query.is_empty() {
                println!("  All inventory");
            } else {
                println!("  Filtered: {}", query);
            }
        }
    }
    println!("  {:\u{2500}<64}", "");

    if groups.is_empty() {
        println!("  No vehicles match.");
    }
    for group in groups {
        println!("  {}  ({})", group.heading(), group.rows.len());
        for row in &group.rows {
            let transit = if row.is_in_transit() { "TRANSIT" } else { "" };
            println!(
                "    {:10} {:>4}d  {:>10}  {:16} {:8} {:7}",
                row.stock_number,
                row.age,
                format!("${}", format_dollars(row.msrp)),
                row.exterior_color,
                row.short_vin(),
                transit,
            );
        }
    }

    if let Some(error) = state.last_error() {
        println!();
        println!("  ! last load failed: {}", error);
    }

    println!();
    println!("  \u{23f1}  Loaded in {}ms", load_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!(
        "Usage: lotview-digest <inventory.csv> [--config FILE] [--query QS] [--drill SELECTOR] [--json] [--export FILE]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config   JSON dashboard configuration");
    eprintln!("  --query    URL-style filter query, e.g. model=TAHOE&year=2024");
    eprintln!("  --drill    total | new | in_transit | 0-30 | 31-60 | 61-90 | 90+");
    eprintln!("  --json     Output as JSON instead of formatted text");
    eprintln!("  --export   Write the displayed rows as CSV to FILE");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  lotview-digest fixtures/inventory.csv --query 'model=TAHOE' --json");
    process::exit(1);
}

fn flag_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let csv_path = &args[1];

    let mut config_path: Option<String> = None;
    let mut query = String::new();
    let mut drill: Option<DrillSelector> = None;
    let mut json_output = false;
    let mut export_path: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config_path = Some(flag_value(&args, i, "--config"));
                i += 2;
            }
            "--query" => {
                query = flag_value(&args, i, "--query");
                i += 2;
            }
            "--drill" => {
                let key = flag_value(&args, i, "--drill");
                drill = match DrillSelector::parse(&key) {
                    Some(selector) => Some(selector),
                    None => {
                        eprintln!("Error: unknown drill selector '{}'", key);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--export" => {
                export_path = Some(flag_value(&args, i, "--export"));
                i += 2;
            }
            "--help" | "-h" => usage(),
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let config = match config_path {
        Some(path) => DashboardConfig::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => DashboardConfig::default(),
    };
    let scope = config.cache_scope.clone();

    let dashboard = Arc::new(
        Dashboard::new(
            config,
            Box::new(FileSource::new(csv_path)),
            Arc::new(InMemorySnapshotCache::new()),
        )
        .with_query(&query),
    );
    dashboard.set_drill(drill);

    let load_start = Instant::now();
    let outcome = dashboard.open(&scope).await;
    // The digest prints once, so a stale entry waits for its refetch.
    let load = match outcome.refetch {
        Some(refetch) => match refetch.await {
            Ok(load) => Some(load),
            Err(e) => Some(LoadOutcome::Failed {
                message: e.to_string(),
            }),
        },
        None => outcome.load,
    };
    let load_ms = load_start.elapsed().as_millis();
    if let Some(LoadOutcome::Failed { message }) = &load {
        eprintln!("Error loading inventory: {}", message);
        process::exit(1);
    }

    let state = dashboard.snapshot();
    log::info!(
        "digest ready rows={} filtered={} generation={}",
        state.rows().len(),
        state.filtered_rows().len(),
        state.generation()
    );

    let (rows, groups) = match state.drill() {
        Some(selector) => {
            let rows = state.drill_rows(selector);
            let groups = state.drill_groups_for(selector);
            (rows, groups)
        }
        None => (state.filtered_rows().to_vec(), state.filtered_groups()),
    };

    if let Some(path) = export_path {
        let written = export_csv(&rows)
            .map_err(|e| e.to_string())
            .and_then(|csv| std::fs::write(&path, csv).map_err(|e| e.to_string()));
        if let Err(e) = written {
            eprintln!("Error exporting to '{}': {}", path, e);
            process::exit(1);
        }
    }

    if json_output {
        let digest = build_json(&state, &groups, state.drill(), load_ms);
        match serde_json::to_string_pretty(&digest) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing digest: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&state, &groups, state.drill(), load_ms);
    }
}
