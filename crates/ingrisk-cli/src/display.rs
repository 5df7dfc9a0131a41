//! Terminal rendering for classification results.
//!
//! Renders the risk rating as a traffic-light line and the probability
//! distribution as a fixed-width text bar chart, remapping class indices
//! 0–4 to risk levels 1–5 for display.

use ingrisk_core::ClassificationResponse;

const BAR_WIDTH: usize = 40;

/// Intro banner with the risk-level legend.
pub fn print_intro() {
    println!("🍪 Ingredient Risk Classifier");
    println!("Analyze food ingredients and understand their safety levels.");
    println!();
    println!("Risk levels:");
    println!("  🟢 1-2  Very Safe/Safe - natural ingredients");
    println!("  🟡 3    Moderate - refined but generally safe");
    println!("  🟠 4    Concerning - artificial additives");
    println!("  🔴 5    High Risk - potentially harmful substances");
    println!();
}

/// Print the analysis card: rating line plus probability bars.
pub fn print_classification(response: &ClassificationResponse) {
    println!("=== Analysis Result ===");
    println!(
        "{} Risk Level {} - {}",
        risk_icon(response.risk_level),
        response.risk_level,
        response.risk_category
    );
    println!();
    println!("Probability Distribution");
    for (key, &probability) in &response.probabilities {
        println!(
            "  Risk Level {}  {} {:.3}",
            display_level(key),
            bar(probability),
            probability
        );
    }
    println!();
}

/// Icon per risk level, mirroring the traffic-light legend.
pub fn risk_icon(level: u8) -> &'static str {
    match level {
        1 | 2 => "🟢",
        3 => "🟡",
        4 => "🟠",
        5 => "🔴",
        _ => "❓",
    }
}

/// Class indices 0–4 display as risk levels 1–5; anything else passes
/// through untouched.
fn display_level(class_index: &str) -> String {
    match class_index.parse::<usize>() {
        Ok(index) => (index + 1).to_string(),
        Err(_) => class_index.to_string(),
    }
}

/// Fixed-width bar filled proportionally to the probability.
fn bar(probability: f32) -> String {
    let filled = (probability.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}
