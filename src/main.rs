use clap::{Parser, Subcommand};
use medstock::{
    config::{Backend, Config},
    db::{init_db, PgMedicineTable},
    handlers::{inventory::list_inventory, medicine::add_medicine},
    remote::RestMedicineTable,
    MedicineStore, MedicineTable, NewMedicine,
};

type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(version, about = "Browse and extend the pharmacy medicines table")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all medicines ordered by name.
    List,
    /// Add a medicine.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// Record the medicine as currently unavailable.
        #[arg(long)]
        out_of_stock: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::load()?;

    match config.backend()? {
        Backend::Rest { url, anon_key } => {
            log::info!("Using REST API at {}", url);
            run(cli.command, MedicineStore::new(RestMedicineTable::new(url, anon_key))).await
        }
        Backend::Postgres { database_url } => {
            log::info!("Using Postgres database");
            let pool = init_db(&database_url).await?;
            run(cli.command, MedicineStore::new(PgMedicineTable::new(pool))).await
        }
    }
}

async fn run<T: MedicineTable>(command: Command, store: MedicineStore<T>) -> Result<(), Error> {
    match command {
        Command::List => {
            println!("{}", list_inventory(&store).await);
            if store.state().error.is_some() {
                return Err("failed to load medicines".into());
            }
        }
        Command::Add {
            name,
            location,
            out_of_stock,
        } => {
            let draft = NewMedicine::new(name, location, !out_of_stock);
            println!("{}", add_medicine(&store, draft).await?);
        }
    }

    Ok(())
}
