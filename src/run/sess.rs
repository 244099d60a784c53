use std::sync::Arc;

use annotate_snippets::display_list::{DisplayList, FormatOptions};
use annotate_snippets::snippet::*;
use codemap::{CodeMap, File};

use crate::grid::Pos;

/// The program source being run, for rendering diagnostics against it.
#[derive(Debug)]
pub struct Sess {
    pub file: Arc<File>,
    pub color: bool,
}

impl Sess {
    pub fn new(name: &str, source: &str, color: bool) -> Sess {
        let mut map = CodeMap::new();
        let file = map.add_file(name.to_string(), source.to_string());
        Sess { file, color }
    }
}

impl Sess {
    /// Character offset of a grid cell within the whole source.
    fn offset(self: &Self, pos: Pos) -> usize {
        let line_start = (self.file.line_span(pos.y).low() - self.file.span.low()) as usize;
        self.file.source()[..line_start].chars().count() + pos.x
    }

    pub fn error_ann<'a>(self: &'a Self, label: &'a str, pos: Pos) -> SourceAnnotation<'a> {
        let start = self.offset(pos);
        SourceAnnotation {
            annotation_type: AnnotationType::Error,
            label,
            range: (start, start + 1),
        }
    }

    pub fn footer_note<'a>(self: &'a Self, label: &'a str) -> Annotation<'a> {
        Annotation {
            id: None,
            label: Some(label),
            annotation_type: AnnotationType::Note,
        }
    }

    pub fn footer_help<'a>(self: &'a Self, label: &'a str) -> Annotation<'a> {
        Annotation {
            id: None,
            label: Some(label),
            annotation_type: AnnotationType::Help,
        }
    }

    /// Renders an error titled `message`. The source is shown only when
    /// there is something to point at.
    pub fn error_snippet(
        self: &Self,
        message: &str,
        annotations: Vec<SourceAnnotation>,
        footer: Vec<Annotation>,
    ) -> String {
        let slices = if annotations.is_empty() {
            vec![]
        } else {
            vec![Slice {
                source: self.file.source(),
                line_start: 1,
                origin: Some(self.file.name()),
                fold: false,
                annotations,
            }]
        };

        let snippet = Snippet {
            title: Some(Annotation {
                id: None,
                label: Some(message),
                annotation_type: AnnotationType::Error,
            }),
            footer,
            slices,
            opt: FormatOptions {
                color: self.color,
                ..Default::default()
            },
        };

        DisplayList::from(snippet).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_lines() {
        let sess = Sess::new("prog", "ab\ncd\n", false);
        assert_eq!(sess.offset(Pos { x: 0, y: 0 }), 0);
        assert_eq!(sess.offset(Pos { x: 1, y: 1 }), 4);
    }

    #[test]
    fn offsets_count_characters() {
        let sess = Sess::new("prog", "éé\nx", false);
        assert_eq!(sess.offset(Pos { x: 0, y: 1 }), 3);
    }

    #[test]
    fn renders_annotation() {
        let sess = Sess::new("prog", "+K\n", false);
        let text = sess.error_snippet(
            "something failed",
            vec![sess.error_ann("here", Pos { x: 1, y: 0 })],
            vec![sess.footer_note("a note")],
        );
        assert!(text.contains("error: something failed"));
        assert!(text.contains("prog"));
        assert!(text.contains("here"));
        assert!(text.contains("note: a note"));
    }
}
