use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// poeprice - Path of Exile item price check
///
/// Send an item copied from the game client to poeprices.info and print the
/// predicted price range.
///
/// The league is taken from --league, POEPRICE_LEAGUE, the "league" key of
/// <config dir>/poeprice/config.json, or defaults to Standard.
///
/// Examples:
///   poeprice predict item.txt      # Price the item in item.txt
///   pbpaste | poeprice predict -s  # Price the clipboard, one-line output
#[derive(Parser, Debug)]
#[command(author, version = env!("POEPRICE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// League to price in (also via POEPRICE_LEAGUE)
    #[arg(long, short = 'l', value_name = "LEAGUE", global = true)]
    pub league: Option<String>,

    /// Prediction endpoint URL (defaults to https://www.poeprices.info/api)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Request a price prediction for one or more items
    Predict(PredictArgs),

    /// Show the resolved configuration
    Config,
}

#[derive(clap::Args, Debug)]
pub struct PredictArgs {
    /// Files holding item text; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print "min-max currency" instead of the full JSON result
    #[arg(long, short = 's')]
    pub summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = poeprice::runtime::RealRuntime;

    match cli.command {
        Commands::Predict(args) => {
            poeprice::commands::predict(runtime, &args.files, args.summary, cli.league, cli.api_url)
                .await?
        }
        Commands::Config => poeprice::commands::config(runtime, cli.league, cli.api_url)?,
    }
    Ok(())
}
