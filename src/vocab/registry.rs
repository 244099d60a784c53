use std::collections::HashMap;
use std::rc::Rc;

use once_cell::sync::Lazy;

use super::fun::*;

/// What a glyph denotes.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Fun(FunDef),
    Op(OpDef),
}

/// Immutable mapping from glyph to built-in, filled once at start-up.
pub struct Vocab {
    entries: HashMap<char, Entry>,
}

impl Vocab {
    fn new() -> Vocab {
        Vocab {
            entries: HashMap::new(),
        }
    }

    pub(super) fn fun(self: &mut Self, glyph: char, unary: Option<UnaryFn>, binary: Option<BinaryFn>) {
        let prev = self.entries.insert(
            glyph,
            Entry::Fun(FunDef {
                glyph,
                unary,
                binary,
            }),
        );
        debug_assert!(prev.is_none(), "glyph `{}` registered twice", glyph);
    }

    pub(super) fn op(self: &mut Self, glyph: char, unary: Option<OpUnaryFn>, binary: Option<OpBinaryFn>) {
        let prev = self.entries.insert(
            glyph,
            Entry::Op(OpDef {
                glyph,
                unary,
                binary,
            }),
        );
        debug_assert!(prev.is_none(), "glyph `{}` registered twice", glyph);
    }

    pub fn get(self: &Self, glyph: char) -> Option<&Entry> {
        self.entries.get(&glyph)
    }

    pub fn glyphs(self: &Self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }
}

static VOCAB: Lazy<Vocab> = Lazy::new(|| {
    let mut vocab = Vocab::new();

    super::io::register(&mut vocab);
    super::arith::register(&mut vocab);
    super::compare::register(&mut vocab);
    super::list::register(&mut vocab);
    super::combin::register(&mut vocab);

    super::compose::register(&mut vocab);
    super::hook::register(&mut vocab);
    super::rank::register(&mut vocab);
    super::fold::register(&mut vocab);
    super::modify::register(&mut vocab);

    vocab
});

pub fn vocab() -> &'static Vocab {
    &VOCAB
}

pub fn lookup(glyph: char) -> Option<&'static Entry> {
    VOCAB.get(glyph)
}

/// The callable of a built-in function glyph.
pub fn builtin(glyph: char) -> Option<Fun> {
    match lookup(glyph)? {
        Entry::Fun(def) => Some(Rc::new(Builtin { def })),
        Entry::Op(_) => None,
    }
}
