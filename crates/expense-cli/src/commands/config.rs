use crate::app::AppContext;
use crate::config::{write_config, ExpenseConfig};
use crate::errors::CliError;
use crate::ui::{badge, kv, print, Badge};

pub fn handle_config_path(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.config_path()?;
    let ui = ctx.ui_or_flags();
    if ui.mode.is_json() {
        println!(
            "{}",
            serde_json::json!({ "path": path, "exists": path.exists() })
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

pub fn handle_config_init(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let path = ctx.config_path()?;
    if path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            path.display()
        ))
        .into());
    }

    write_config(&path, &ExpenseConfig::default())?;
    tracing::info!(path = %path.display(), "wrote default config");

    if !ctx.quiet() {
        let ui = ctx.ui()?;
        print(&ui, &badge(&ui, Badge::Ok, "Wrote default config"));
        print(&ui, &kv(&ui, "Path", &path.display().to_string()));
    }
    Ok(())
}
