//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing Markdown fixtures into temporary
//! directories and running the mdpage binary against them.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Contributing guide exercising every construct the renderer supports.
pub const GUIDE: &str = r#"# Contributing

Thanks for helping out! See [the registry](https://example.com/registry) for **all** components.

## Setup

1. Fork the repository
2. Install dependencies with `pnpm install`
3. Run `pnpm dev`

## Checklist

* Add a changelog entry
* Update the docs

| Component | Version | Released |
|-----------|--------:|----------|
| navbar | 1.2 | 2024-05-01 |
| toast | 0.9 | 2024-06-12 |

```js
const html = "<div class='x'>" + a ** 2 + "</div>";
// # not a heading
```

That's it.
"#;

/// Writes a Markdown file into a fresh temporary directory.
///
/// # Returns
///
/// Temporary directory (kept alive by the caller) and the file path
///
/// # Errors
///
/// Returns error if directory creation or writing fails
pub fn write_markdown(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok((dir, path))
}

/// Runs the mdpage binary with the given arguments.
///
/// Always passes `--no-open` so no browser is launched.
///
/// # Errors
///
/// Returns error if the process cannot be spawned
pub fn run_mdpage(args: &[&str], cwd: &Path) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_mdpage"))
        .args(args)
        .arg("--no-open")
        .current_dir(cwd)
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}
