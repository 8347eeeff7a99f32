use std::path::PathBuf;

use console::style;
use miette::Result;

use platen::RenderOptions;

pub fn run(
    file: Option<String>,
    config: Option<String>,
    root: Option<String>,
    data: Vec<String>,
    safe: bool,
    output: Option<String>,
) -> Result<()> {
    let options = RenderOptions {
        file: file.map(PathBuf::from),
        config: config.map(PathBuf::from),
        root: root.map(PathBuf::from),
        data,
        safe,
    };

    let text = platen::render_template(options)?;

    match output {
        Some(path) => {
            let path = PathBuf::from(path);
            platen::write_output(&path, &text)?;
            eprintln!(
                "{} Rendered {} bytes to {}",
                style("✓").green().bold(),
                text.len(),
                style(path.display()).cyan()
            );
        }
        None => print!("{text}"),
    }

    Ok(())
}
