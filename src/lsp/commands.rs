//! Workspace commands.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::{TextEdit, Url, WorkspaceEdit};

use crate::document::{replace_all, DocumentState};

/// Replace every literal occurrence of a string in an open document.
pub const REPLACE_ALL_COMMAND: &str = "hlsp.replaceAll";

/// Arguments of [`REPLACE_ALL_COMMAND`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplaceAllArgs {
    pub uri: Url,
    pub find: String,
    pub replace: String,
}

impl ReplaceAllArgs {
    /// Parse either `[uri, find, replace]` or a single `{uri, find, replace}` object.
    pub fn from_arguments(mut arguments: Vec<Value>) -> Result<Self, String> {
        let parsed = if arguments.len() == 1 && arguments[0].is_object() {
            serde_json::from_value(arguments.remove(0))
        } else {
            serde_json::from_value::<(Url, String, String)>(Value::Array(arguments))
                .map(|(uri, find, replace)| Self { uri, find, replace })
        };
        parsed.map_err(|e| format!("invalid {} arguments: {}", REPLACE_ALL_COMMAND, e))
    }
}

/// Build the edit that applies a replace-all to `doc`.
///
/// Returns the edit and the number of replacements, or None when nothing
/// matches.
pub fn replace_all_edit(
    doc: &DocumentState,
    args: &ReplaceAllArgs,
) -> Option<(WorkspaceEdit, usize)> {
    let (new_text, count) = replace_all(doc.text(), &args.find, &args.replace);
    if count == 0 {
        return None;
    }

    let edit = TextEdit {
        range: doc.line_index.full_range(),
        new_text,
    };
    let changes = HashMap::from([(args.uri.clone(), vec![edit])]);
    Some((WorkspaceEdit::new(changes), count))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tower_lsp::lsp_types::{Position, Range};

    use super::*;
    use crate::highlight::Language;

    fn uri() -> Url {
        Url::parse("file:///tmp/a.py").unwrap()
    }

    #[test]
    fn parse_positional_arguments() {
        let args = ReplaceAllArgs::from_arguments(vec![
            json!("file:///tmp/a.py"),
            json!("foo"),
            json!("bar"),
        ])
        .unwrap();
        assert_eq!(
            args,
            ReplaceAllArgs {
                uri: uri(),
                find: "foo".into(),
                replace: "bar".into(),
            }
        );
    }

    #[test]
    fn parse_object_argument() {
        let args = ReplaceAllArgs::from_arguments(vec![json!({
            "uri": "file:///tmp/a.py",
            "find": "x",
            "replace": "",
        })])
        .unwrap();
        assert_eq!(args.find, "x");
        assert_eq!(args.replace, "");
    }

    #[test]
    fn parse_bad_arguments() {
        assert!(ReplaceAllArgs::from_arguments(vec![]).is_err());
        let bad_uri = vec![json!("not a uri"), json!("a"), json!("b")];
        assert!(ReplaceAllArgs::from_arguments(bad_uri).is_err());
        let missing_fields = vec![json!({"uri": "file:///a"})];
        assert!(ReplaceAllArgs::from_arguments(missing_fields).is_err());
    }

    #[test]
    fn edit_replaces_whole_document() {
        let doc = DocumentState::new("foo = 1\nfoo += 1".to_string(), Language::Python, 3);
        let args = ReplaceAllArgs {
            uri: uri(),
            find: "foo".into(),
            replace: "count".into(),
        };

        let (edit, count) = replace_all_edit(&doc, &args).unwrap();
        assert_eq!(count, 2);

        let edits = &edit.changes.unwrap()[&uri()];
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, "count = 1\ncount += 1");
        assert_eq!(
            edits[0].range,
            Range::new(Position::new(0, 0), Position::new(1, 8))
        );
    }

    #[test]
    fn no_edit_without_matches() {
        let doc = DocumentState::new("abc".to_string(), Language::PlainText, 0);
        let args = ReplaceAllArgs {
            uri: uri(),
            find: "z".into(),
            replace: "y".into(),
        };
        assert!(replace_all_edit(&doc, &args).is_none());
    }
}
