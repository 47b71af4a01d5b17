// ABOUTME: Open subcommand - launches a file in the OS default viewer.
// ABOUTME: Fails with a clear message when the file does not exist.

use std::path::Path;

use office_agent::shell;

pub fn run(path: &Path) -> anyhow::Result<()> {
    shell::open_file(path)?;
    println!("Opening {}", path.display());
    Ok(())
}
