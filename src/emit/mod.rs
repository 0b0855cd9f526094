mod rust;
mod typescript;

pub use rust::RustEmitter;
pub use typescript::TypeScriptEmitter;

use crate::schema::Schema;

/// Renders a [`Schema`] as the source text of one target language.
pub trait Emitter {
    fn emit(&self, schema: &Schema) -> String;
}

/// Every type block ends with a blank line; the file itself ends with a
/// single newline.
fn finish(mut output: String) -> String {
    let trimmed = output.trim_end().len();
    output.truncate(trimmed);
    if !output.is_empty() {
        output.push('\n');
    }

    output
}
