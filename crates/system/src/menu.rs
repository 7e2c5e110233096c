use crate::split_command;
use bar_core::{ActionMenu, BarError, Menu, MenuSelection, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Shows menus through a dmenu-compatible program (`rofi -dmenu`, `wofi
/// --dmenu`, `bemenu`, …).
///
/// Items are written to the program's stdin one per line; the line it prints
/// back is mapped to its index.  `{anchor}` in the command is replaced by the
/// requesting widget's id, e.g. `rofi -dmenu -p {anchor}`.
#[derive(Debug, Clone)]
pub struct CommandMenu {
    command: String,
}

impl CommandMenu {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl ActionMenu for CommandMenu {
    fn show(&self, menu: &Menu, anchor: &str) -> Result<MenuSelection> {
        if menu.is_empty() {
            return Ok(MenuSelection::Cancelled);
        }

        let command = self.command.replace("{anchor}", anchor);
        let (program, args) = split_command(&command)
            .ok_or_else(|| BarError::Config("menu command is empty".into()))?;

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BarError::Invocation(format!("cannot start menu '{program}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = menu.items().join("\n") + "\n";
            // A presenter may exit without reading; its answer still counts.
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                debug!("menu stdin closed early: {e}");
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| BarError::Invocation(format!("menu '{program}' failed: {e}")))?;

        Ok(selection_from_output(
            menu,
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
        ))
    }
}

/// Map a presenter's exit status and stdout back onto the menu.
fn selection_from_output(menu: &Menu, success: bool, stdout: &str) -> MenuSelection {
    if !success {
        return MenuSelection::Cancelled;
    }
    let chosen = stdout.lines().next().unwrap_or("").trim();
    menu.items()
        .iter()
        .position(|item| item == chosen)
        .map_or(MenuSelection::Cancelled, MenuSelection::Selected)
}
