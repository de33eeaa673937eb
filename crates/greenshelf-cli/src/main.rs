use clap::{Parser, Subcommand};
use greenshelf_core::{page_count, page_offset, AppConfig, BROWSE_PAGE_SIZE};
use greenshelf_db::{BrandStore, MemoryStore};

#[derive(Debug, Parser)]
#[command(name = "greenshelf-cli")]
#[command(about = "Greenshelf brand directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance (requires DATABASE_URL)
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect the catalog
    Brands {
        #[command(subcommand)]
        command: BrandCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Insert the sample catalog
    Seed,
}

#[derive(Debug, Subcommand)]
enum BrandCommands {
    /// List one page of brands, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how many brands hold each certification
    Certifications,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = greenshelf_core::load_app_config()?;

    match cli.command {
        Some(Commands::Db { command }) => run_db(&config, command).await?,
        Some(Commands::Brands { command }) => run_brands(&config, command).await?,
        None => println!("greenshelf-cli ready; see --help for commands"),
    }

    Ok(())
}

async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = greenshelf_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Ping => {
            greenshelf_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = greenshelf_db::run_migrations(&pool).await?;
            println!("applied {applied} migrations");
        }
        DbCommands::Seed => {
            greenshelf_db::run_migrations(&pool).await?;
            let seeded = greenshelf_db::seed_sample_brands(&BrandStore::Postgres(pool)).await?;
            println!("seeded {seeded} brands");
        }
    }
    Ok(())
}

async fn run_brands(config: &AppConfig, command: BrandCommands) -> anyhow::Result<()> {
    let store = if config.database_url.is_some() {
        BrandStore::Postgres(greenshelf_db::connect_pool_from_config(config).await?)
    } else {
        BrandStore::Memory(MemoryStore::with_samples())
    };
    tracing::debug!(backend = store.backend(), "using brand store");

    match command {
        BrandCommands::List { page, json } => {
            let page = page.max(1);
            let listing = store
                .list(BROWSE_PAGE_SIZE, page_offset(page, BROWSE_PAGE_SIZE))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing.brands)?);
            } else {
                for brand in &listing.brands {
                    println!(
                        "{:>5}  {:<28} {:<4} {}",
                        brand.id,
                        brand.name,
                        brand.price_tier,
                        brand.certifications.join(", ")
                    );
                }
                println!(
                    "page {page} of {} ({} brands)",
                    page_count(listing.total, BROWSE_PAGE_SIZE),
                    listing.total
                );
            }
        }
        BrandCommands::Certifications => {
            for cert in store.certification_counts().await? {
                println!("{:>4}  {}", cert.count, cert.name);
            }
        }
    }
    Ok(())
}
