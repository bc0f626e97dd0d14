use alloy::primitives::Address;
use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;

use exchange_quote_client::source::{
    connect, measure_end, measure_start, sample_addrs, sample_amounts, ClientConfig,
    ClientError, ContractHandle, DEVELOPMENT,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the built-in endpoints and exchange address
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = DEVELOPMENT)]
    environment: String,
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    match run(&args).await {
        Ok(()) => {
            println!("\nAll queries completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nFatal error: {:#}", e);
            if let Some(data) = e
                .downcast_ref::<ClientError>()
                .and_then(ClientError::revert_data)
            {
                eprintln!("Contract error data: {}", data);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };

    println!("\n=== Contract Setup ===");
    let client = connect(&config, &args.environment)?;
    let chain_id = client.check_connection().await?;
    println!("Exchange bound at: {}", client.address());
    println!("Chain id: {}", chain_id);

    for signature in client.descriptor() {
        debug!("Exchange method: {}", signature);
    }

    let addrs = sample_addrs();
    let amounts = sample_amounts().map(|amount| amount.to_string());
    let wallet = addrs[0];

    println!("\n=== Price Calculations ===");
    for i in 0..2 {
        quote_pair(&client, wallet, addrs[i], addrs[i + 1], &amounts[i], i + 1).await?;
    }

    println!("\n=== LP Token Estimation ===");
    let start = measure_start("lp_estimates");
    let asymmetric = client
        .estimate_lp_tokens(
            wallet,
            &addrs[1].to_string(),
            &amounts[0],
            &addrs[2].to_string(),
            &amounts[1],
        )
        .await?;
    println!("Estimated LP tokens for asymmetric provision: {}", asymmetric);

    let symmetric = client
        .estimate_lp_tokens(
            wallet,
            &addrs[1].to_string(),
            &amounts[0],
            &addrs[2].to_string(),
            &amounts[0],
        )
        .await?;
    println!("Estimated LP tokens for symmetric provision: {}", symmetric);
    measure_end(start);

    Ok(())
}

async fn quote_pair(
    client: &ContractHandle,
    wallet: Address,
    token_a: Address,
    token_b: Address,
    amount: &str,
    case: usize,
) -> Result<()> {
    info!("Quoting case {}: {} {} -> {}", case, amount, token_a, token_b);
    println!("\nCase {}:", case);
    println!("Token A: {}", token_a);
    println!("Token B: {}", token_b);
    println!("Amount: {}", amount);

    let (token_a, token_b) = (token_a.to_string(), token_b.to_string());

    let start = measure_start("get_output_amounts");
    let prices = client
        .get_output_amounts(wallet, amount, &token_a, &token_b)
        .await?;
    measure_end(start);
    println!("Input amount: {}", prices.first().map_or("-", String::as_str));
    println!("Output amount: {}", prices.get(1).map_or("-", String::as_str));

    let estimated = client
        .estimate_output_token(wallet, amount, &token_a, &token_b)
        .await?;
    println!("Estimated output: {}", estimated);

    Ok(())
}
