/// Edit-script replay: a deterministic, line-oriented command
/// language for driving a document from the CLI.
///
/// Commands, one per line (`#` starts a comment):
///   insert <text>      type <text> at the caret
///   key <combo>        press a key combo, e.g. `ctrl+z`, `shift+quote`
///   select <start> <end>
///   break              force the next edit to start a new undo step
///   show               print the current state
use anyhow::{bail, Context, Result};

use jotter_config::EditorConfig;
use jotter_core::{Document, EditorCommand, KeyCode, Keymap, Modifiers};

/// A document plus the keymap driving it.
pub struct Session {
    doc: Document,
    keymap: Keymap,
}

impl Session {
    pub fn new(config: &EditorConfig, initial: String) -> Self {
        let mut doc = Document::open(initial, config.history_config());
        doc.set_indent_style(config.indent_style);
        Self {
            doc,
            keymap: config.keymap(),
        }
    }

    /// Replays a whole script. Stops at the first bad line.
    pub fn run(&mut self, script: &str) -> Result<()> {
        for (idx, raw) in script.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.exec(line)
                .with_context(|| format!("script line {}: {line:?}", idx + 1))?;
        }
        Ok(())
    }

    fn exec(&mut self, line: &str) -> Result<()> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "insert" => {
                self.doc.insert_text(rest);
                Ok(())
            }
            "key" => {
                let (mods, key) = parse_combo(rest)?;
                if let Some(cmd) = self.keymap.resolve(mods, key) {
                    self.apply(cmd);
                } else {
                    tracing::debug!("combo {rest:?} is not bound");
                }
                Ok(())
            }
            "select" => {
                let mut parts = rest.split_whitespace();
                let start: usize = parts
                    .next()
                    .context("select needs <start> <end>")?
                    .parse()
                    .context("invalid start offset")?;
                let end: usize = parts
                    .next()
                    .context("select needs <start> <end>")?
                    .parse()
                    .context("invalid end offset")?;
                self.doc.set_selection(start, end);
                Ok(())
            }
            "break" => {
                self.doc.force_snapshot_break();
                Ok(())
            }
            "show" => {
                println!("{}", self.summary());
                Ok(())
            }
            other => bail!("unknown command {other:?}"),
        }
    }

    fn apply(&mut self, cmd: EditorCommand) {
        match cmd {
            EditorCommand::Undo => {
                if !self.doc.undo() {
                    tracing::debug!("nothing to undo");
                }
            }
            EditorCommand::Redo => {
                if !self.doc.redo() {
                    tracing::debug!("nothing to redo");
                }
            }
            EditorCommand::InsertIndent => self.doc.insert_indent(),
            EditorCommand::InsertNewline => self.doc.insert_newline(),
            EditorCommand::DeleteBackward => self.doc.delete_backward(),
            EditorCommand::CollapseSelection => self.doc.collapse_selection(),
            EditorCommand::InsertPair { open, close } => self.doc.insert_pair(open, close),
            EditorCommand::ToggleTabCapture => {
                self.keymap.tab_inserts_indent = !self.keymap.tab_inserts_indent;
            }
        }
    }

    pub fn summary(&self) -> String {
        let sel = self.doc.selection();
        format!(
            "value: {:?}\nselection: {}..{}\nhistory depth: {}",
            self.doc.value(),
            sel.start,
            sel.end,
            self.doc.history().depth()
        )
    }
}

/// Parses a key combo like `ctrl+shift+z` into modifiers plus key.
fn parse_combo(combo: &str) -> Result<(Modifiers, KeyCode)> {
    let mut mods = Modifiers::default();
    let mut key = None;
    for part in combo.split('+') {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "cmd" => mods.ctrl = true,
            "shift" => mods.shift = true,
            "alt" => mods.alt = true,
            name => {
                if key.is_some() {
                    bail!("combo {combo:?} names more than one key");
                }
                key = Some(key_by_name(name).with_context(|| format!("unknown key {name:?}"))?);
            }
        }
    }
    let key = key.with_context(|| format!("combo {combo:?} names no key"))?;
    Ok((mods, key))
}

fn key_by_name(name: &str) -> Option<KeyCode> {
    match name {
        "backspace" => Some(KeyCode::Backspace),
        "tab" => Some(KeyCode::Tab),
        "enter" => Some(KeyCode::Enter),
        "escape" | "esc" => Some(KeyCode::Escape),
        "parens" | "9" => Some(KeyCode::Parens),
        "m" => Some(KeyCode::M),
        "y" => Some(KeyCode::Y),
        "z" => Some(KeyCode::Z),
        "backquote" | "`" => Some(KeyCode::BackQuote),
        "brackets" | "[" => Some(KeyCode::Brackets),
        "quote" | "'" => Some(KeyCode::Quote),
        _ => None,
    }
}
