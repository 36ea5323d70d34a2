//! Terminal output helpers
//!
//! Step lines go to stdout, warnings to stderr. Emoji prefixes degrade
//! to plain ASCII when stdout is not a terminal or the user asked for
//! undecorated output (`NO_COLOR` / `DOCKHAND_NO_COLOR`).

use std::path::Path;

use is_terminal::IsTerminal;

use crate::config::ConfigWarning;

fn fancy() -> bool {
    if std::env::var_os("DOCKHAND_NO_COLOR").is_some() || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Print one pipeline step line
pub fn step(icon: &str, message: &str) {
    if fancy() {
        println!("{icon} {message}");
    } else {
        println!("=> {message}");
    }
}

/// Print the success footer
pub fn done(message: &str) {
    if fancy() {
        println!("✅ {message}");
    } else {
        println!("OK {message}");
    }
}

/// Print non-fatal config warnings collected during load
pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
