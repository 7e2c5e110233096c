//! Local-process collaborators: launching programs and showing menus.

pub mod launcher;
pub mod menu;

pub use launcher::ProcessLauncher;
pub use menu::CommandMenu;

/// Split a command line on whitespace into program and arguments.
///
/// No quoting rules: configured commands are plain program invocations.
pub(crate) fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_program_and_args() {
        let (prog, args) = split_command("  rofi -dmenu   -i ").unwrap();
        assert_eq!(prog, "rofi");
        assert_eq!(args, vec!["-dmenu", "-i"]);
    }

    #[test]
    fn blank_command_has_no_program() {
        assert!(split_command("   ").is_none());
    }
}
