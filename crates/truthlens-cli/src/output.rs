//! Terminal output formatting.

use colored::Colorize;
use truthlens_core::AnalysisResponse;

/// Print an analysis result.
pub fn print_analysis(response: &AnalysisResponse) {
    let status = if response.sources.is_empty() {
        response.status.yellow().bold()
    } else if response.is_fake {
        response.status.red().bold()
    } else {
        response.status.green().bold()
    };

    println!();
    println!("{}  {}", status, format!("({:.0}% confidence)", response.confidence * 100.0).dimmed());
    println!();
    println!("{}", response.summary);

    if !response.sources.is_empty() {
        println!();
        println!("{}", "Sources".bold());
        for source in &response.sources {
            if source.url.is_empty() {
                println!("  • {}", source.title);
            } else {
                println!("  • {} {}", source.title, source.url.dimmed());
            }
        }
    }
    println!();
}
