//! Human-readable rendering of query results.

use super::QueryOutput;
use crate::domain::{CycleReport, EdgeListing, HotspotReport, ImpactReport, IngestReport};
use colored::Colorize;

/// Print a query result to stdout.
pub fn print_output(output: &QueryOutput) {
    match output {
        QueryOutput::Ingest(reports) => print_ingest(reports),
        QueryOutput::Edges(listing) => print_edges(listing),
        QueryOutput::Impact(report) => print_impact(report),
        QueryOutput::Cycles(report) => print_cycles(report),
        QueryOutput::Hotspots(report) => print_hotspots(report),
    }
}

fn print_ingest(reports: &[(String, IngestReport)]) {
    if reports.is_empty() {
        println!("{}", "No batches loaded.".dimmed());
        return;
    }

    for (repo, report) in reports {
        println!(
            "{} {}: {} ({} edges)",
            "✓".green(),
            repo.cyan(),
            report.message,
            report.count
        );
    }
}

fn print_edges(listing: &EdgeListing) {
    if listing.edges.is_empty() {
        println!("{}", "No edges.".dimmed());
        return;
    }

    println!("{} edges:", listing.total.to_string().bold());
    for edge in &listing.edges {
        println!(
            "  {} {} {} {}",
            edge.source,
            "→".dimmed(),
            edge.target,
            format!("[{}, {}]", edge.dep_type, edge.weight).dimmed()
        );
    }
}

fn print_impact(report: &ImpactReport) {
    println!(
        "{} {} (depth {})",
        "Impact of".bold(),
        report.source.cyan(),
        report.max_depth
    );

    if report.affected_files.is_empty() {
        println!("    {}", "No affected files.".dimmed());
        return;
    }

    let mut current = 0;
    for file in &report.affected_files {
        if file.distance != current {
            current = file.distance;
            println!("  {} {current}:", "Distance".yellow());
        }
        println!("    {} {}", "•".dimmed(), file.path);
    }
    println!();
    println!("Total: {} affected files", report.total_impact.to_string().bold());
}

fn print_cycles(report: &CycleReport) {
    if report.cycles.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return;
    }

    println!(
        "Found {} circular dependencies:",
        report.total.to_string().red().bold()
    );
    println!();

    for (i, cycle) in report.cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        println!("    {}", cycle.join(" → ").dimmed());
    }
}

fn print_hotspots(report: &HotspotReport) {
    if report.hotspots.is_empty() {
        println!("{}", "No files.".dimmed());
        return;
    }

    println!(
        "  {:>5} {:>5} {:>5}  {}",
        "total".dimmed(),
        "out".dimmed(),
        "in".dimmed(),
        "file".dimmed()
    );
    for hotspot in &report.hotspots {
        println!(
            "  {:>5} {:>5} {:>5}  {}",
            hotspot.total_degree.to_string().bold(),
            hotspot.out_degree,
            hotspot.in_degree,
            hotspot.path
        );
    }
}
