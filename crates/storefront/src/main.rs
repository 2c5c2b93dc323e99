//! Terminal entry point.

use std::io::{self, BufRead, Write};

use anyhow::Context;

use greennest_storefront::{HELP, Renderer, Session, StorefrontConfig};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("invalid configuration")?;
    greennest_observability::init(config.log_format, &config.log_filter);

    let catalog = config.load_catalog().context("failed to load catalog")?;
    let mut session = Session::new(catalog, Renderer::from_config(&config));

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    write!(stdout, "{}", session.screen())?;
    writeln!(stdout, "(type `help` for commands)")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line) {
            Ok(step) => {
                if let Some(notice) = step.notice {
                    write!(stdout, "{}", session.renderer().notice(notice))?;
                }
                if step.show_help {
                    writeln!(stdout, "{HELP}")?;
                }
                if step.quit {
                    break;
                }
                if step.rerender {
                    write!(stdout, "{}", session.screen())?;
                }
            }
            Err(err) => writeln!(stdout, "error: {err}")?,
        }
        stdout.flush()?;
    }

    tracing::info!(session_id = %session.id(), items = session.store().summary().item_count, "session ended");
    Ok(())
}
