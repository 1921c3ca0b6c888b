//! Display and printing utilities

use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{info, warn};
use crate::types::CalculationRecord;

pub fn print_calculation(record: &CalculationRecord) {
    let result = &record.result;

    warn!("\n🎯 ARBITRAGE CALCULATION #{}", record.id);
    warn!("📍 Route: {}", record.route);
    warn!("💰 Profit Analysis:");
    warn!("   Investment: ${:.2}", result.investment_amount);
    warn!("   Buy Price:  ${:.2} ({})", result.buy_price, result.buy_exchange);
    warn!("   Sell Price: R{:.2} ({})", result.sell_price, result.sell_exchange);
    warn!("   Quantity:   {:.8}", result.quantity);
    warn!("   Fees: buy {:.2} ({}%), sell {:.2} ({}%), transfer {:.2}, total {:.2}",
        result.buy_fee_amount,
        result.buy_fee_percentage,
        result.sell_fee_amount,
        result.sell_fee_percentage,
        result.transfer_fee,
        result.total_fees
    );
    warn!("   Gross Profit: {:.2}", result.gross_profit);
    warn!("   Net Profit:   {:.2} ({:.3}%)", result.net_profit, result.net_profit_percentage);
    warn!("   USD/ZAR: {} (informational)", result.usd_to_zar_rate);

    if record.validation.all_passed {
        warn!("✅ All validation checks passed");
    } else {
        warn!("⚠️  Validation warnings: {:?}", record.validation.warnings);
    }
}

pub fn print_session_stats(
    start_time: Instant,
    cycles: u64,
    total_evaluated: u64,
    profitable: u64,
    total_potential_profit: Decimal,
    failed: u64,
) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("\n📊 Session Statistics ({} minutes, {} cycles)", runtime, cycles);
    info!("   Opportunities evaluated: {}", total_evaluated);
    info!("   Above threshold: {}", profitable);
    info!("   Hit rate: {:.1}%",
        if total_evaluated > 0 {
            (profitable as f64 / total_evaluated as f64) * 100.0
        } else {
            0.0
        }
    );
    info!("   Total potential profit: {:.2}", total_potential_profit);
    info!("   Failed calculations: {}", failed);
    info!("");
}
