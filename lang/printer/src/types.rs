use std::io;

use pretty::DocAllocator;
use pretty::termcolor::{ColorSpec, WriteColor};

pub type Alloc<'a> = pretty::Arena<'a, ColorSpec>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, ColorSpec>;

/// Operator precedences
pub type Precedence = u32;

/// Line width used by `print_trace`, wide enough to keep traces on one line.
const TRACE_WIDTH: usize = 10_000;

pub trait Print {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_prec(cfg, alloc, 0)
    }

    /// Print with precedence information about the enclosing context.
    ///
    /// * `_prec` The precedence of the surrounding context.
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.print(cfg, alloc)
    }

    fn print_io<W: io::Write>(&self, cfg: &PrintCfg, out: &mut W) -> io::Result<()> {
        let alloc = Alloc::new();
        let doc_builder = self.print(cfg, &alloc);
        doc_builder.1.render(cfg.width, out)
    }

    fn print_colored<W: WriteColor>(&self, cfg: &PrintCfg, out: &mut W) -> io::Result<()> {
        let alloc = Alloc::new();
        let doc_builder = self.print(cfg, &alloc);
        doc_builder.1.render_colored(cfg.width, out)
    }

    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String {
        let def = PrintCfg::default();
        let cfg = cfg.unwrap_or(&def);
        let mut buf = Vec::new();
        self.print_io(cfg, &mut buf).expect("Failed to print to string");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Render on a single line with metavariable ids, for `log` output.
    fn print_trace(&self) -> String {
        let cfg = PrintCfg { width: TRACE_WIDTH, print_metavar_ids: true, ..Default::default() };
        self.print_to_string(Some(&cfg))
    }
}

impl<T: Print + ?Sized> Print for &T {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

impl<T: Print> Print for Box<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

/// Prints a comma separated, parenthesized list. Prints nothing for an empty list.
impl<T: Print> Print for Vec<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if self.is_empty() {
            return alloc.nil();
        }

        let mut doc = alloc.nil();
        let mut first = true;

        for x in self {
            if !first {
                doc = doc.append(crate::tokens::COMMA).append(alloc.line());
            }
            doc = doc.append(x.print(cfg, alloc));
            first = false;
        }

        doc.align().parens().group()
    }
}

pub struct PrintCfg {
    /// The width of the output terminal/device. Width is used for
    /// the insertion of linebreaks.
    pub width: usize,
    /// How many spaces of indentation are used
    pub indent: isize,
    /// Whether to print the unique ids of metavariables and local variables
    pub print_metavar_ids: bool,
}

impl Default for PrintCfg {
    fn default() -> Self {
        Self { width: crate::DEFAULT_WIDTH, indent: 4, print_metavar_ids: false }
    }
}
