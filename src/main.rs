use clap::Parser;
use foodscan::{cli, client, config, error, render, session};
use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use error::Result;
use foodscan_common::{FoodScan, ImageRef, MacrosResponse, ResultsView, ReviewSession, SelectedQuantity};
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Scan { image, quantity, yes, json } => {
            let client = ApiClient::from_config(&Config::load()?)?;

            if json {
                let response = client.analyze_image(&image).await?;
                let value = match response {
                    MacrosResponse::NoFood { message } => {
                        serde_json::json!({ "no_food": true, "message": message })
                    }
                    MacrosResponse::Estimate(estimate) => serde_json::to_value(&estimate)?,
                };
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            let mut app = FoodScan::new();
            app.open_camera()?;
            let scanned = session::scan_photo(&mut app, &client, &image).await;
            if scanned.is_ok() {
                if let Some(q) = quantity {
                    session::set_quantity(&mut app, q);
                }
                session::review_results(&mut app, yes)?;
            }

            println!();
            for line in render::transcript_lines(app.transcript().entries()) {
                println!("{}", line);
            }
            scanned?;
        }

        Commands::Chat { message } => {
            let client = ApiClient::from_config(&Config::load()?)?;
            let mut app = FoodScan::new();
            let mut printer = session::TranscriptPrinter::default();
            session::chat_once(&mut app, &client, &message, &mut printer).await;
            printer.flush(&app);
        }

        Commands::Session => {
            let client = ApiClient::from_config(&Config::load()?)?;
            session::run_session(&client).await?;
        }

        Commands::Totals { input, quantity } => {
            let content = std::fs::read_to_string(&input)?;
            let view = match MacrosResponse::from_json(&content)? {
                MacrosResponse::NoFood { message } => {
                    ResultsView::no_food(ImageRef::new(input.display().to_string()), &message)
                }
                MacrosResponse::Estimate(estimate) => {
                    let mut review = ReviewSession::new(ImageRef::new(input.display().to_string()), estimate);
                    if let Some(q) = quantity {
                        review.quantity = SelectedQuantity::new(q);
                    }
                    ResultsView::estimate(&review)
                }
            };
            for line in render::results_lines(&view) {
                println!("{}", line);
            }
        }

        Commands::Config { set_macros_url, set_chat_url, set_timeout, show } => {
            let path = Config::config_path()?;
            let mut stored = Config::load_from(&path)?;
            let changed = set_macros_url.is_some() || set_chat_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_macros_url {
                stored.macros_url = url;
            }
            if let Some(url) = set_chat_url {
                stored.chat_url = url;
            }
            if let Some(secs) = set_timeout {
                stored.timeout_seconds = secs;
            }
            if changed {
                stored.save_to(&path)?;
                println!("✔ 設定を保存しました: {}", path.display());
            }

            if show || !changed {
                let effective = stored.with_env_overrides(|key| std::env::var(key).ok());
                println!("設定:");
                println!("  推定API: {}", effective.macros_url);
                println!("  チャットAPI: {}", effective.chat_url);
                println!("  タイムアウト: {}秒", effective.timeout_seconds);
                println!("  設定ファイル: {}", path.display());
            }
        }
    }

    Ok(())
}
