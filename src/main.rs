use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Read};

use receipt_points::{PointsBreakdown, Receipt};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => match args.get(2) {
            Some(source) => run_score(source),
            None => bail!("usage: receipt-points score <receipt.json | ->"),
        },
        Some("version") => {
            println!("receipt-points {}", receipt_points::VERSION);
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("receipt-points {}", receipt_points::VERSION);
    println!();
    println!("USAGE:");
    println!("    receipt-points score <receipt.json>   Score a receipt file");
    println!("    receipt-points score -                Score a receipt read from stdin");
    println!("    receipt-points version                Print the version");
}

fn run_score(source: &str) -> Result<()> {
    let json = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read receipt from stdin")?;
        buf
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read receipt file: {}", source))?
    };

    let receipt = Receipt::from_json(&json).context("The receipt is invalid")?;
    let breakdown = PointsBreakdown::for_receipt(&receipt);

    println!("🧾 {} ({} items)", receipt.retailer, receipt.items.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (rule, points) in &breakdown.contributions {
        println!("{:>5}  {}", points, rule.description());
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{:>5}  total", breakdown.total());

    Ok(())
}
