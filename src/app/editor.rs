//! External editor launch for `searchbar config --edit`.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITORS: [&str; 3] = ["nvim", "vim", "vi"];

/// An editor program plus the arguments configured before the file path.
#[derive(Debug, Clone, Eq, PartialEq)]
struct EditorCommand {
    source: String,
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Splits a shell-style command line such as `code --wait`.
    fn parse(source: &str) -> Option<Self> {
        let mut parts = shlex::split(source)?.into_iter();
        let program = parts.next()?;
        Some(Self {
            source: source.to_owned(),
            program,
            args: parts.collect(),
        })
    }
}

/// Opens `path` in `$VISUAL`, `$EDITOR`, then the first of nvim/vim/vi found on `PATH`.
pub fn edit_file_with_system_editor(path: &Path) -> Result<()> {
    let candidates = editor_candidates(env::var_os("VISUAL"), env::var_os("EDITOR"));

    for editor in &candidates {
        let launched = Command::new(&editor.program)
            .args(&editor.args)
            .arg(path)
            .status();
        let status = match launched {
            Ok(status) => status,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("editor `{}` not found", editor.source);
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to launch `{}`", editor.source));
            }
        };

        if !status.success() {
            match status.code() {
                Some(code) => bail!("editor `{}` exited with status {code}", editor.source),
                None => bail!("editor `{}` was terminated by a signal", editor.source),
            }
        }
        return Ok(());
    }

    bail!("no editor found (tried $VISUAL, $EDITOR, nvim, vim, vi)")
}

fn editor_candidates(visual: Option<OsString>, editor: Option<OsString>) -> Vec<EditorCommand> {
    let configured = [visual, editor].into_iter().flatten().filter_map(|value| {
        let value = value.to_string_lossy();
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let parsed = EditorCommand::parse(value);
        if parsed.is_none() {
            log::warn!("ignoring editor command with unbalanced quotes: {value}");
        }
        parsed
    });

    configured
        .chain(FALLBACK_EDITORS.into_iter().filter_map(EditorCommand::parse))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programs(candidates: &[EditorCommand]) -> Vec<&str> {
        candidates
            .iter()
            .map(|editor| editor.program.as_str())
            .collect()
    }

    #[test]
    fn configured_editors_come_before_fallbacks() {
        let candidates = editor_candidates(
            Some(OsString::from("code --wait")),
            Some(OsString::from("  ")),
        );

        assert_eq!(programs(&candidates), vec!["code", "nvim", "vim", "vi"]);
        assert_eq!(candidates[0].args, vec!["--wait".to_owned()]);
    }

    #[test]
    fn quoted_program_paths_stay_whole() {
        let candidates = editor_candidates(None, Some(OsString::from("'my editor' -n")));

        assert_eq!(candidates[0].program, "my editor");
        assert_eq!(candidates[0].args, vec!["-n".to_owned()]);
    }

    #[test]
    fn unbalanced_quotes_are_skipped() {
        let candidates = editor_candidates(Some(OsString::from("\"broken")), None);
        assert_eq!(programs(&candidates), vec!["nvim", "vim", "vi"]);
    }
}
