//! Analyze command - classify a file of field descriptors.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use fieldlens::{
    ClassificationReport, ClassifierConfig, DetectionCache, FieldClassifier, FieldDescriptor,
    ImportanceTier,
};

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Classifying".cyan().bold(),
        file.display().to_string().white()
    );

    let classifier = match config {
        Some(path) => FieldClassifier::with_config(ClassifierConfig::from_path(path)?)?,
        None => FieldClassifier::new(),
    };

    let contents = fs::read_to_string(&file)?;
    let fields: Vec<FieldDescriptor> = serde_json::from_str(&contents)?;

    let mut cache = DetectionCache::new();
    let report = classifier.classify(&fields, &mut cache);

    if json || output.is_some() {
        let rendered = serde_json::to_string_pretty(&report)?;
        match output {
            Some(path) => {
                fs::write(&path, rendered)?;
                println!("Report written to {}", path.display().to_string().white());
            }
            None => println!("{rendered}"),
        }
        return Ok(());
    }

    print_summary(&report, verbose);
    Ok(())
}

fn print_summary(report: &ClassificationReport, verbose: bool) {
    println!();
    println!("{}", "Fields:".yellow().bold());
    for field in &report.fields {
        let category = field
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let tier = match field.importance.tier {
            ImportanceTier::Primary => "primary".green(),
            ImportanceTier::Secondary => "secondary".yellow(),
            ImportanceTier::Tertiary => "tertiary".blue(),
        };
        println!("  {:24} {:12} {}", field.path, category, tier);

        if verbose {
            for candidate in &field.candidates {
                println!(
                    "      {:10} {:.2} ({:?})",
                    format!("{:?}", candidate.category).to_lowercase(),
                    candidate.confidence,
                    candidate.level
                );
            }
        }
    }

    if !report.grouping.groups.is_empty() {
        println!();
        println!("{}", "Sections:".yellow().bold());
        for group in &report.grouping.groups {
            println!("  {} ({} fields)", group.label().white().bold(), group.len());
        }
    }

    let summary = &report.summary;
    println!();
    println!(
        "Categorized {} of {} fields ({} high confidence)",
        summary.categorized_fields.to_string().white().bold(),
        summary.total_fields,
        summary.fields_by_level.high.to_string().green()
    );
    println!("{}", summary.recommendation);
}
