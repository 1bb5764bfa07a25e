use crate::cli::context::ShellContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::{CommandError, CommandResult};

const SETTABLE_KEYS: &str = "locale|currency|group|window|palette|color|data_root";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|set <key> <value>|path]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{SETTABLE_KEYS}> <value>"
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.config.set(key, value.trim())?;
            context.persist_config()?;
            if matches!(key, "ui_color_enabled" | "color") {
                output::set_color_enabled(
                    context.config.ui_color_enabled
                        && context.mode == crate::cli::CliMode::Interactive,
                );
            }
            output::success(format!("{key} updated"));
            Ok(())
        }
        "path" => {
            output::info(context.config_manager.config_path().display());
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  locale            : {}", config.locale));
    output::info(format!("  currency          : {}", config.currency));
    output::info(format!(
        "  current_group     : {}",
        config.current_group.as_deref().unwrap_or("(all)")
    ));
    output::info(format!("  window_half_width : {}", config.window_half_width));
    output::info(format!("  palette           : {}", config.palette.join(",")));
    output::info(format!(
        "  ui_color_enabled  : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    output::info(format!(
        "  data_root         : {}",
        config.resolve_data_root().display()
    ));
}
