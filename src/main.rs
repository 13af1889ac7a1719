use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockpit::{
    cli::{Cli, Commands},
    config::Config,
    models::{Material, Order, OrderStatus},
    store::Store,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "stockpit=info");
    }

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.validate()?;

    // Subcommands print and exit without entering the TUI
    if let Some(command) = cli.command {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
        return handle_cli_command(command);
    }

    // Log to a file in TUI mode to avoid interfering with the display
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "stockpit.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting stockpit TUI...");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("stockpit exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("stockpit encountered an error: {}", e);
            Err(e)
        }
    }
}

fn handle_cli_command(command: Commands) -> Result<()> {
    let store = Store::with_mock_data();

    match command {
        Commands::Materials { search } => {
            let materials = store.search_materials(search.as_deref().unwrap_or(""));
            print_materials(&materials);
        }
        Commands::Orders { search, status } => {
            let status = status
                .as_deref()
                .map(|s| s.parse::<OrderStatus>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let orders = store.search_orders(search.as_deref().unwrap_or(""), status);
            print_orders(&orders);
        }
        Commands::Summary => {
            print_summary(&store);
        }
        Commands::Export { output } => {
            let json = store.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Cannot write export to {}", path.display()))?;
                    info!("Dataset exported to {}", path.display());
                    println!("Exported dataset to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn print_materials(materials: &[Material]) {
    println!(
        "{:<10} {:<26} {:>6} {:<6}  {:<22} {:<24}",
        "Code", "Material", "Stock", "Unit", "Location", "Supplier"
    );
    for m in materials {
        println!(
            "{:<10} {:<26} {:>6} {:<6}  {:<22} {:<24}{}",
            m.code,
            m.name,
            m.stock,
            m.unit_of_measure,
            m.location.as_deref().unwrap_or("-"),
            m.supplier.as_deref().unwrap_or("-"),
            if m.is_low_stock() { "  LOW" } else { "" }
        );
    }
    println!("({} materials)", materials.len());
}

fn print_orders(orders: &[Order]) {
    println!(
        "{:<8} {:<24} {:<12} {:<10} {:<12} {:<12}",
        "ID", "Customer", "Status", "Priority", "Due", "Created"
    );
    for o in orders {
        println!(
            "{:<8} {:<24} {:<12} {:<10} {:<12} {:<12}",
            o.id,
            o.customer_name,
            o.status.as_str(),
            o.priority.as_str(),
            o.due_date.to_string(),
            o.created_at.to_string()
        );
    }
    println!("({} orders)", orders.len());
}

fn print_summary(store: &Store) {
    let today = Local::now().date_naive();
    let inventory = store.inventory_summary();
    let orders = store.order_summary(today);

    println!("Inventory");
    println!("  Total items:    {}", inventory.total_items);
    println!("  In stock:       {}", inventory.items_in_stock);
    println!("  Low stock:      {}", inventory.low_stock_items);
    println!("  Out of stock:   {}", inventory.out_of_stock_items);
    println!("  Total value:    ${:.2}", inventory.total_value);
    println!();
    println!("Orders");
    println!("  Pending:        {}", orders.pending);
    println!("  Processing:     {}", orders.processing);
    println!("  Completed:      {}", orders.completed);
    println!("  Late:           {}", orders.late_orders);
    println!("  Total:          {}", orders.total);

    let alerts = store.stock_alerts();
    if !alerts.is_empty() {
        println!();
        println!("Alerts");
        for alert in alerts {
            println!(
                "  Low stock: {} — {} units ({}% of threshold)",
                alert.material_name, alert.current_stock, alert.percent_remaining
            );
        }
    }
}
