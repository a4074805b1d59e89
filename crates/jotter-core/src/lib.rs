/// Headless plain-text editing core.
///
/// A `Document` owns the text buffer and selection, commits a history
/// snapshot after every mutation, and applies snapshots back on
/// undo/redo. `Keymap` maps (modifier-set, key) combinations to
/// editor commands; the history manager itself never sees key codes.
pub mod document;
pub mod indent;
pub mod keymap;
pub mod keys;
pub mod selection;

pub use document::Document;
pub use indent::IndentStyle;
pub use keymap::{EditorCommand, Keymap};
pub use keys::{KeyCode, Modifiers};
pub use selection::Selection;
