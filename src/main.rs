use std::process::ExitCode;

use daily_sales_etl::config::EtlConfig;
use daily_sales_etl::logging;
use daily_sales_etl::pipeline::Pipeline;
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match EtlConfig::from_current_dir() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("daily-sales-etl: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&config.log_path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("daily-sales-etl: {e}");
            return ExitCode::FAILURE;
        }
    };

    match Pipeline::new(config).run() {
        Ok(summary) => {
            info!(
                extracted = summary.extracted_rows,
                dropped = summary.dropped_rows,
                inserted = summary.load.inserted(),
                total_revenue = %summary.total_revenue,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            ExitCode::FAILURE
        }
    }
}
