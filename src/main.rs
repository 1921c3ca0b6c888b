//! Arbitrage profit calculator - Main Entry Point
//!
//! Re-evaluates the opportunities published by the price feed on a fixed
//! interval and records the profit breakdown of each route.

use arb_profit_calc::*;
use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::{info, warn, error};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = CONFIG.clone();
    let output_dir = Path::new(&config.output_dir);

    // Initialize logging
    utils::setup_output_directories(output_dir)?;
    let _logging_guard = utils::setup_logging(output_dir, config.log_json)?;

    info!("💱 Arbitrage Profit Calculator v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Investment: ${}", config.investment_amount);
    info!("   USD/ZAR Rate: {}", config.usd_to_zar_rate);
    info!("   Buy Fee Override: {:?}", config.custom_buy_fee);
    info!("   Sell Fee Override: {:?}", config.custom_sell_fee);
    info!("   Transfer Fee: {:?} (withdrawal fallback: {})", config.transfer_fee, config.apply_withdrawal_fee);
    info!("   Min Net Profit: {}%", config.min_net_profit_pct);
    info!("   Opportunities: {}", config.opportunities_path);

    let fee_table = fees::load_fee_table(config.fee_table_path.as_deref().map(Path::new))?;
    let calculator = ProfitCalculator::new(Arc::new(fee_table));

    let start_time = Instant::now();
    let mut state = MonitoringState::default();

    if config.run_once {
        run_evaluation_cycle(&calculator, &config, &mut state);
        print_final_statistics(start_time, &state);
        return Ok(());
    }

    // Setup shutdown handler
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
        let _ = shutdown_tx.send(());
    });

    info!("\n🚀 Starting evaluation loop (every {}s)...\n", config.poll_interval_secs);

    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_evaluation_cycle(&calculator, &config, &mut state);
                if state.cycles % 10 == 0 {
                    utils::print_session_stats(
                        start_time,
                        state.cycles,
                        state.total_evaluated,
                        state.above_threshold,
                        state.total_potential_profit,
                        state.failed,
                    );
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting main loop...");
                break;
            }
        }
    }

    print_final_statistics(start_time, &state);

    Ok(())
}

/// Monitoring state to track statistics
#[derive(Default)]
struct MonitoringState {
    cycles: u64,
    total_evaluated: u64,
    above_threshold: u64,
    total_potential_profit: Decimal,
    failed: u64,
}

fn run_evaluation_cycle(calculator: &ProfitCalculator, config: &Config, state: &mut MonitoringState) {
    state.cycles += 1;

    let opportunities = match storage::load_opportunities(Path::new(&config.opportunities_path)) {
        Ok(opportunities) => opportunities,
        Err(e) => {
            error!("Failed to load opportunities: {}", e);
            return;
        }
    };

    for opp in &opportunities {
        let evaluation = match arbitrage::evaluate_opportunity(calculator, config, opp) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                state.failed += 1;
                warn!("Skipping {}: {}", opp.route_label(), e);
                continue;
            }
        };

        state.total_evaluated += 1;
        let result = &evaluation.record.result;

        info!(
            "💹 {} | Buy: ${:.2} | Sell: R{:.2} | Net: {:.2} ({:.3}%)",
            evaluation.record.route,
            result.buy_price,
            result.sell_price,
            result.net_profit,
            result.net_profit_percentage
        );

        if !evaluation.meets_threshold {
            continue;
        }

        state.above_threshold += 1;
        state.total_potential_profit += result.net_profit;
        utils::print_calculation(&evaluation.record);

        if config.save_results {
            if let Err(e) = storage::save_calculation(Path::new(&config.output_dir), &evaluation.record) {
                error!("Failed to save calculation: {}", e);
            }
        }
    }
}

/// Print final statistics on shutdown
fn print_final_statistics(start_time: Instant, state: &MonitoringState) {
    info!("\n🛑 Shutting down gracefully...");
    info!("Final statistics:");
    info!("   Total runtime: {:?}", start_time.elapsed());
    info!("   Evaluation cycles: {}", state.cycles);
    info!("   Opportunities evaluated: {}", state.total_evaluated);
    info!("   Above threshold: {}", state.above_threshold);
    info!("   Total potential profit: {:.2}", state.total_potential_profit);
    info!("   Failed calculations: {}", state.failed);
}
