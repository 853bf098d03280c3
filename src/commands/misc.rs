use crate::config::FinderConfig;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;
use std::path::Path;

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "ghfind", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  ghfind completions bash > ~/.local/share/bash-completion/completions/ghfind");
        }
        Shell::Zsh => {
            eprintln!("  ghfind completions zsh > ~/.zsh/completions/_ghfind");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  ghfind completions fish > ~/.config/fish/completions/ghfind.fish");
        }
        _ => {}
    }
}

pub fn config_command(config: &FinderConfig, init: bool) -> Result<()> {
    let path = FinderConfig::config_path()?;
    print!("{}", config_report(config, init, &path)?);
    Ok(())
}

/// `--init` writes the defaults, never the environment or flag overrides in `config`.
pub fn config_report(config: &FinderConfig, init: bool, path: &Path) -> Result<String> {
    let mut out = String::new();
    if init {
        FinderConfig::default().save_to(path)?;
        out.push_str(&format!("✓ Wrote defaults to {}\n", path.display()));
    } else {
        out.push_str(&format!("Config file: {}\n", path.display()));
    }

    let mut shown = config.clone();
    if shown.token.is_some() {
        shown.token = Some("<redacted>".to_string());
    }
    let body = serde_json::to_string_pretty(&shown).context("Failed to serialize config")?;
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}
