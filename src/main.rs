use anyhow::{Context, Result};
use log::{info, warn};
use mdpage::Config;
use std::fs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let renderer = config.renderer();
    let fragment = renderer
        .render_file(&config.input)
        .context("Failed to render markdown")?;

    if config.fragment {
        println!("{}", fragment);
        return Ok(());
    }

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;

    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;

    let stylesheets: Vec<String> = mdpage::write_css_assets(&assets_dir, config.highlight_theme())
        .context("Failed to write CSS assets")?
        .into_iter()
        .map(|name| format!("assets/{}", name))
        .collect();
    let stylesheet_refs: Vec<&str> = stylesheets.iter().map(String::as_str).collect();

    let title = config
        .page_title()
        .context("Failed to determine page title")?;

    let page = mdpage::page_wrapper(
        &title,
        &stylesheet_refs,
        config.classes.scripts(),
        &fragment,
    );

    let index_path = config.output.join("index.html");
    fs::write(&index_path, page.into_string())
        .with_context(|| format!("Failed to write page to {}", index_path.display()))?;

    info!(
        "Rendered {} into {} bytes of HTML",
        config.input.display(),
        fragment.len()
    );
    println!("Generated: {}", index_path.display());

    if !config.no_open
        && let Err(e) = open::that(&index_path)
    {
        warn!("Failed to open {} in browser: {}", index_path.display(), e);
    }

    Ok(())
}
