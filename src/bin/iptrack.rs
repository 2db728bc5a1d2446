//! IP location tracker command-line client.
//!
//! Thin driver over the library facade. One invocation handles one user
//! action: log in or out, show the current location, look up an address,
//! list the lookup history or delete entries from it.
//!
//! Session and history persist under the platform data directory, so state
//! carries across invocations. IPs are masked in listings by default; pass
//! `--reveal` with a comma-separated list of addresses to show them.
//!
//! Diagnostics go to stderr (configure with `RUST_LOG`); results go to
//! stdout.

use iptrack::app::{Access, App, Route};
use iptrack::config::{self, TrackerConfig};
use iptrack::models::GeoLocation;
use iptrack::storage::{FileStore, KeyValueStore};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "Usage: iptrack <command> [args]

Commands:
  login <email>          Log in (password read from stdin)
  logout                 Log out and clear the stored session
  whoami                 Show the logged-in user
  current                Show your current network-derived location
  lookup <ip>            Look up the location of an IP address
  history [--reveal a,b] List past lookups (IPs masked unless revealed)
  delete <id>...         Delete history entries by id";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    }

    let config = load_settings();

    let storage: Arc<dyn KeyValueStore> = match open_storage(&config) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut app = match App::new(&config, storage) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = match args[0].as_str() {
        "login" => cmd_login(&mut app, &args[1..]).await,
        "logout" => cmd_logout(&mut app),
        "whoami" => cmd_whoami(&app),
        "current" => cmd_current(&app).await,
        "lookup" => cmd_lookup(&mut app, &args[1..]).await,
        "history" => cmd_history(&mut app, &args[1..]),
        "delete" => cmd_delete(&mut app, &args[1..]),
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

/// Loads settings from `config.json` in the data directory, if present.
fn load_settings() -> TrackerConfig {
    let path = std::env::var_os("HOME")
        .map(|home| {
            std::path::PathBuf::from(home)
                .join(".config")
                .join("iptrack")
                .join("config.json")
        })
        .filter(|p| p.exists());

    let settings = path.and_then(|p| {
        let raw = std::fs::read_to_string(&p).ok()?;
        serde_json::from_str::<serde_json::Value>(&raw).ok()
    });

    match config::load_config(settings) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: {}. Using defaults.", err);
            TrackerConfig::default()
        }
    }
}

fn open_storage(config: &TrackerConfig) -> Result<Arc<dyn KeyValueStore>, String> {
    let store = match &config.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default(),
    }
    .map_err(|e| e.to_string())?;
    Ok(Arc::new(store))
}

/// Commands behind the private route print a redirect hint when anonymous.
fn require_home(app: &App) -> Result<(), String> {
    match app.guard(Route::Home) {
        Access::Allow => Ok(()),
        Access::RedirectTo(_) => {
            Err("Not logged in. Run `iptrack login <email>` first.".to_string())
        }
    }
}

async fn cmd_login(app: &mut App, args: &[String]) -> Result<(), String> {
    let email = args.first().ok_or("Usage: iptrack login <email>")?;

    if app.session().is_authenticated() {
        return Err("Already logged in. Run `iptrack logout` first.".to_string());
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .map_err(|e| e.to_string())?;
    let password = password.trim_end_matches(['\r', '\n']);

    let session = app.login(email, password).await.map_err(|e| e.to_string())?;
    let name = session
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "User".to_string());
    println!("Welcome, {}!", name);
    Ok(())
}

fn cmd_logout(app: &mut App) -> Result<(), String> {
    app.logout();
    println!("Logged out.");
    Ok(())
}

fn cmd_whoami(app: &App) -> Result<(), String> {
    match app.session().user() {
        Some(user) => {
            println!("{}", user.display_name());
            Ok(())
        }
        None => Err("Not logged in.".to_string()),
    }
}

async fn cmd_current(app: &App) -> Result<(), String> {
    require_home(app)?;

    let location = app
        .current_location()
        .await
        .map_err(|_| "Failed to fetch current location".to_string())?;

    println!("Current location:");
    print_location(&location, app);
    Ok(())
}

async fn cmd_lookup(app: &mut App, args: &[String]) -> Result<(), String> {
    require_home(app)?;
    let ip = args.first().ok_or("Usage: iptrack lookup <ip>")?;

    let entry = app.search(ip).await.map_err(|e| e.to_string())?;

    println!("Search results for {}:", app.display_ip(&entry.ip));
    print_location(&entry.location, app);
    Ok(())
}

fn cmd_history(app: &mut App, args: &[String]) -> Result<(), String> {
    require_home(app)?;

    // --reveal a,b,c flips the listed addresses to unmasked for this run.
    if let Some(pos) = args.iter().position(|a| a == "--reveal") {
        let ips = args
            .get(pos + 1)
            .ok_or("Usage: iptrack history [--reveal ip,ip,...]")?;
        for ip in ips.split(',').filter(|s| !s.is_empty()) {
            app.toggle_visibility(ip.trim());
        }
    }

    if app.history().is_empty() {
        println!("No search history.");
        return Ok(());
    }

    for entry in app.history().entries() {
        let city = entry.location.city.as_deref().unwrap_or("Unknown");
        let country = entry.location.country.as_deref().unwrap_or("Unknown");
        println!(
            "{}  {}  {}, {}  ({})",
            entry.id,
            app.display_ip(&entry.ip),
            city,
            country,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

fn cmd_delete(app: &mut App, args: &[String]) -> Result<(), String> {
    require_home(app)?;
    if args.is_empty() {
        return Err("Usage: iptrack delete <id>...".to_string());
    }

    for arg in args {
        let id: i64 = arg
            .parse()
            .map_err(|_| format!("Invalid history id: {}", arg))?;
        app.toggle_selected(id);
    }

    let removed = app.delete_selected();
    println!("Deleted {} entr{}.", removed, if removed == 1 { "y" } else { "ies" });
    Ok(())
}

fn print_location(location: &GeoLocation, app: &App) {
    let ip = location.ip.as_deref().unwrap_or("");
    println!("  IP:       {}", app.display_ip(ip));
    println!(
        "  City:     {}",
        location.city.as_deref().unwrap_or("Unknown")
    );
    println!(
        "  Region:   {}",
        location.region.as_deref().unwrap_or("Unknown")
    );
    println!(
        "  Country:  {}",
        location.country.as_deref().unwrap_or("Unknown")
    );
    println!(
        "  Timezone: {}",
        location.timezone.as_deref().unwrap_or("Unknown")
    );
}
