use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use product_admin::console::{print_snapshot, Console};
use product_admin::{stub, AdminApp, HttpProductApi, Settings};

#[derive(Parser, Debug)]
#[command(name = "product-admin", version, about = "Product catalog administration")]
struct Cli {
    /// Settings file to use instead of ./appsettings.*
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Product collection endpoint, e.g. http://localhost:8080/api/products
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive admin console (default)
    Console,
    /// Print the product table once and exit
    List,
    /// Run the in-memory stub backend
    ServeStub,
}

async fn run(cli: Cli) -> product_admin::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?.with_base_url(cli.base_url);

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            let api = HttpProductApi::from_settings(&settings.api)?;
            tracing::info!(base_url = %api.base_url(), "starting admin console");
            let mut app = AdminApp::new(api);
            Console::stdio().run(&mut app).await?;
        }
        Commands::List => {
            let api = HttpProductApi::from_settings(&settings.api)?;
            let mut app = AdminApp::new(api);
            print_snapshot(&mut app, &mut std::io::stdout()).await?;
        }
        Commands::ServeStub => stub::run(&settings.stub).await?,
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Keep the interactive screen free of routine log lines.
    let default_level = match cli.command {
        Some(Commands::ServeStub) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
