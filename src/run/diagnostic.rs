use super::err::*;
use super::sess::Sess;

impl RError {
    pub fn diagnostic_message(self: &Self, sess: &Sess) -> String {
        let message = self.root().to_string();
        let pos = match self.pos() {
            Some(pos) => pos,
            None => return sess.error_snippet(&message, vec![], vec![]),
        };

        match self.root() {
            RError::Unimplemented { glyph, arity, detail } => {
                let note = format!("`{}` has no {} form{}", glyph, arity, detail.map_or("", |_| " taking values"));
                sess.error_snippet(
                    &message,
                    vec![sess.error_ann("called here", pos)],
                    vec![sess.footer_note(&note)],
                )
            }
            RError::Structural { cause, .. } => {
                let note = format!("caused by: {}", cause);
                sess.error_snippet(
                    &message,
                    vec![sess.error_ann("argument has the wrong structure", pos)],
                    vec![sess.footer_note(&note)],
                )
            }
            RError::Domain { .. } => sess.error_snippet(
                &message,
                vec![sess.error_ann("argument out of domain", pos)],
                vec![],
            ),
            RError::Input(_) => sess.error_snippet(
                &message,
                vec![sess.error_ann("reads this input line", pos)],
                vec![sess.footer_help("input values are written like `12`, `'c`, `\"text\"` or `[1,2]`")],
            ),
            _ => sess.error_snippet(&message, vec![sess.error_ann("fails here", pos)], vec![]),
        }
    }
}
