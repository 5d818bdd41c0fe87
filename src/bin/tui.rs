use anyhow::Result;
use eventhub::config::Config;
use eventhub::context::{AppContext, StandardContext};
use simplelog::{ConfigBuilder, WriteLogger};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;

struct Args {
    data: Option<PathBuf>,
    root: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        data: None,
        root: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(None);
            }
            "--data" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--data needs a file path"))?;
                parsed.data = Some(PathBuf::from(v));
            }
            "--root" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--root needs a directory"))?;
                parsed.root = Some(PathBuf::from(v));
            }
            other => return Err(anyhow::anyhow!("Unknown argument: {}", other)),
        }
    }
    Ok(Some(parsed))
}

fn init_logging(ctx: &dyn AppContext, cfg: &Config) {
    let Some(path) = ctx.get_log_path() else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = WriteLogger::init(cfg.log_level_filter(), log_config, file);
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("eventhub_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let ctx = StandardContext::new(args.root);
    let cfg = match Config::load(&ctx) {
        Ok(c) => c,
        Err(e) => {
            // A broken config is reported; a missing one means defaults.
            if !Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }
            Config::default()
        }
    };

    init_logging(&ctx, &cfg);

    let Some(data_path) = cfg.data_path(&ctx, args.data.as_deref()) else {
        eprintln!("Could not determine the event data file. Pass one with --data <file>.");
        std::process::exit(1);
    };
    log::info!("Starting with dataset {}", data_path.display());

    eventhub::tui::run(cfg, data_path).await
}

fn print_help() {
    println!(
        "EventHub v{} - Browse, search and map upcoming events (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    eventhub [--data <file>] [--root <dir>]");
    println!();
    println!("OPTIONS:");
    println!("    --data <file>     Event dataset (.json, .yaml or .yml)");
    println!("    --root <dir>      Keep config, data and logs under <dir>");
    println!("    --help            Show this help message");
    println!();
    println!("KEYBINDINGS:");
    println!("    /                 Search name, location and description");
    println!("    d                 Filter by exact start date (YYYY-MM-DD)");
    println!("    r / p             Cycle region / free-paid filter");
    println!("    c                 Clear all filters");
    println!("    j / k             Move through the results");
    println!("    ?                 Toggle help");
    println!("    q                 Quit");
    println!();
    println!("DATA FORMAT:");
    println!("    A list of records with name (or title), start_date/end_date (or date),");
    println!("    location, free_or_paid, organization_url, logo, featured, region,");
    println!("    description, lat, lng. Dates are YYYY-MM-DD.");
}
