use std::path::Path;

use console::style;
use miette::Result;

use platen::check::check_config;

pub fn run(path: String) -> Result<()> {
    let config_path = Path::new(&path);

    println!(
        "{} {}",
        style("Checking config at").bold(),
        style(config_path.display()).cyan()
    );

    let result = check_config(config_path)?;
    let config = &result.config;

    match &config.template.root {
        Some(root) => println!("  Root: {}", root.display()),
        None => println!("  Root: (template directory)"),
    }
    if let Some(file) = &config.template.file {
        println!("  Template: {}", file.display());
    }
    println!("  Parameters: {}", config.parameters.len());
    println!(
        "  Mode: {}",
        if config.render.strict { "strict" } else { "safe" }
    );
    if !config.render.after_filters.is_empty() {
        println!("  After filters: {}", config.render.after_filters.join(" -> "));
    }

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &result.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    println!("\n{} Config is valid!", style("✓").green().bold());

    Ok(())
}
