//! Print the default configuration for external tuning.

use fieldlens::ClassifierConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClassifierConfig::default();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
