//! Colors used when printing to a terminal.

use pretty::DocAllocator;
use pretty::termcolor::{Color, ColorSpec};

use super::types::*;

const KEYWORD: Color = Color::Magenta;
const CTOR: Color = Color::Blue;
const MEMBER: Color = Color::Green;
const TYPE: Color = Color::Red;
const META: Color = Color::Yellow;

pub trait ThemeExt<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a>;
    fn ctor(&'a self, text: &'a str) -> Builder<'a>;
    /// Fields of classes
    fn member(&'a self, text: &'a str) -> Builder<'a>;
    /// Names of classes and data types
    fn typ(&'a self, text: &'a str) -> Builder<'a>;
    fn meta(&'a self, text: String) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(KEYWORD.spec())
    }

    fn ctor(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(CTOR.spec())
    }

    fn member(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(MEMBER.spec())
    }

    fn typ(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(TYPE.spec())
    }

    fn meta(&'a self, text: String) -> Builder<'a> {
        self.text(text).annotate(META.spec())
    }
}

pub trait ColorExt {
    fn spec(self) -> ColorSpec;
}

impl ColorExt for Color {
    fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(self));
        spec
    }
}
