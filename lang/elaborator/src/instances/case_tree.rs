//! Case trees over instance candidates.
//!
//! Comparing the type of every candidate with the required class type is expensive.
//! The case tree discriminates the candidates by the heads of the terms in their
//! types first, in the style of a case tree for constructor patterns: when a term is
//! examined, the arguments of its head are added to the terms still to be examined.
//!
//! See <https://amelia.how/posts/efficient-instance-resolution-for-agda.html>.

use std::collections::VecDeque;

use pretty::DocAllocator;
use tessera_lang_ast::{Exp, Head};
use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::tokens::{CASE, COMMA, FAT_ARROW, OF, PIPE, WILDCARD};
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg};

use super::Instance;
use crate::settings::ClassArgPolicy;

/// The result of examining one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitDef {
    /// A class or data call. Its `remains` are examined next.
    Rigid { head: Head, telescope_size: usize, remains: Vec<Exp> },
    /// Anything else, which matches every pattern.
    Flex,
}

impl SplitDef {
    pub fn head(&self) -> Option<&Head> {
        match self {
            SplitDef::Rigid { head, .. } => Some(head),
            SplitDef::Flex => None,
        }
    }

    pub fn remains(&self) -> &[Exp] {
        match self {
            SplitDef::Rigid { remains, .. } => remains,
            SplitDef::Flex => &[],
        }
    }
}

/// A candidate together with the terms of its type that are not examined yet.
#[derive(Debug, Clone)]
pub struct Preclause {
    pub remains: Vec<Exp>,
    pub done: Instance,
}

impl Preclause {
    pub fn new(remains: Vec<Exp>, done: Instance) -> Self {
        Preclause { remains, done }
    }
}

/// Examine the `idx`-th term along the path to this case.
///
/// Patterns of the clauses are pairwise distinct, at most one clause is a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub idx: usize,
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// `None` for the wildcard
    pub pattern: Option<Head>,
    pub body: CaseBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseBody {
    Case(Box<Case>),
    Done(Vec<Done>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Done {
    pub instance: Instance,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaseTreeCompiler {
    pub class_args: ClassArgPolicy,
}

impl CaseTreeCompiler {
    pub fn new(class_args: ClassArgPolicy) -> Self {
        CaseTreeCompiler { class_args }
    }

    pub fn split_term(&self, term: &Exp) -> SplitDef {
        match term {
            Exp::ClassCall(call) => {
                let remains = match self.class_args {
                    ClassArgPolicy::Opaque => vec![],
                    ClassArgPolicy::Discriminate => call.args.clone(),
                };
                SplitDef::Rigid {
                    head: Head::Class(call.class.clone()),
                    telescope_size: call.args.len(),
                    remains,
                }
            }
            Exp::DataCall(call) => SplitDef::Rigid {
                head: Head::Data(call.data.clone()),
                telescope_size: call.args.len(),
                remains: call.args.clone(),
            },
            _ => SplitDef::Flex,
        }
    }

    /// The splits of `term` and of all its remains, in pre-order.
    pub fn flatten_term(&self, term: &Exp) -> Vec<SplitDef> {
        let split = self.split_term(term);
        let nested: Vec<SplitDef> =
            split.remains().iter().flat_map(|remain| self.flatten_term(remain)).collect();
        let mut out = vec![split];
        out.extend(nested);
        out
    }

    pub fn build_case_tree(&self, idx: usize, preclauses: Vec<Preclause>) -> Case {
        // Groups in the order their head was first seen, `None` for the wildcard
        let mut groups: Vec<(Option<Head>, Vec<Preclause>)> = Vec::new();

        for Preclause { remains, done } in preclauses {
            let mut remains = VecDeque::from(remains);
            let split = match remains.pop_front() {
                Some(first) => self.split_term(&first),
                None => SplitDef::Flex,
            };
            let remains: Vec<Exp> = split.remains().iter().cloned().chain(remains).collect();
            let head = split.head().cloned();
            let preclause = Preclause { remains, done };

            match groups.iter_mut().find(|(h, _)| *h == head) {
                Some((_, group)) => group.push(preclause),
                None => groups.push((head, vec![preclause])),
            }
        }

        let clauses = groups
            .into_iter()
            .map(|(pattern, group)| {
                let body = if group.len() == 1 || group.iter().all(|p| p.remains.is_empty()) {
                    CaseBody::Done(group.into_iter().map(|p| Done { instance: p.done }).collect())
                } else {
                    CaseBody::Case(Box::new(self.build_case_tree(idx + 1, group)))
                };
                Clause { pattern, body }
            })
            .collect();

        Case { idx, clauses }
    }

    /// Collapse every case whose only clause is a wildcard into its body.
    pub fn optimize(case: Case) -> CaseBody {
        let Case { idx, mut clauses } = case;
        if clauses.len() == 1 && clauses[0].pattern.is_none() {
            if let Some(clause) = clauses.pop() {
                return Self::optimize_body(clause.body);
            }
        }

        let clauses = clauses
            .into_iter()
            .map(|Clause { pattern, body }| Clause { pattern, body: Self::optimize_body(body) })
            .collect();
        CaseBody::Case(Box::new(Case { idx, clauses }))
    }

    pub fn optimize_body(body: CaseBody) -> CaseBody {
        match body {
            CaseBody::Case(case) => Self::optimize(*case),
            done @ CaseBody::Done(_) => done,
        }
    }

    /// The candidates of an optimized tree whose remains may match `query`, in tree order.
    ///
    /// Positions removed by [CaseTreeCompiler::optimize] are skipped. Below a flexible
    /// position of the query, every candidate is kept.
    pub fn lookup<'a>(&self, body: &'a CaseBody, query: &[Exp]) -> Vec<&'a Instance> {
        let mut out = Vec::new();
        self.lookup_body(body, 0, query.iter().cloned().collect(), &mut out);
        out
    }

    fn lookup_body<'a>(
        &self,
        body: &'a CaseBody,
        consumed: usize,
        query: VecDeque<Exp>,
        out: &mut Vec<&'a Instance>,
    ) {
        match body {
            CaseBody::Done(dones) => out.extend(dones.iter().map(|done| &done.instance)),
            CaseBody::Case(case) => self.lookup_case(case, consumed, query, out),
        }
    }

    fn lookup_case<'a>(
        &self,
        case: &'a Case,
        mut consumed: usize,
        mut query: VecDeque<Exp>,
        out: &mut Vec<&'a Instance>,
    ) {
        // Terms examined by collapsed wildcard cases
        while consumed < case.idx {
            query.pop_front();
            consumed += 1;
        }

        let split = match query.pop_front() {
            Some(term) => self.split_term(&term),
            None => SplitDef::Flex,
        };

        for clause in &case.clauses {
            match (&clause.pattern, &split) {
                (None, _) => self.lookup_body(&clause.body, consumed + 1, query.clone(), out),
                (Some(pattern), SplitDef::Rigid { head, remains, .. }) => {
                    if pattern == head {
                        let query = remains.iter().cloned().chain(query.iter().cloned()).collect();
                        self.lookup_body(&clause.body, consumed + 1, query, out);
                    }
                }
                (Some(_), SplitDef::Flex) => collect_all(&clause.body, out),
            }
        }
    }
}

fn collect_all<'a>(body: &'a CaseBody, out: &mut Vec<&'a Instance>) {
    match body {
        CaseBody::Done(dones) => out.extend(dones.iter().map(|done| &done.instance)),
        CaseBody::Case(case) => {
            for clause in &case.clauses {
                collect_all(&clause.body, out);
            }
        }
    }
}

impl Case {
    /// All candidates in the leaves of this case, in tree order.
    pub fn leaves(&self) -> Vec<&Instance> {
        let mut out = Vec::new();
        for clause in &self.clauses {
            collect_all(&clause.body, &mut out);
        }
        out
    }
}

impl Print for Case {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let header = alloc
            .keyword(CASE)
            .append(alloc.space())
            .append(alloc.text(self.idx.to_string()))
            .append(alloc.space())
            .append(alloc.keyword(OF));
        let clauses = alloc.intersperse(
            self.clauses.iter().map(|clause| clause.print(cfg, alloc)),
            alloc.hardline(),
        );
        header.append(alloc.hardline()).append(clauses)
    }
}

impl Print for Clause {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let pattern = match &self.pattern {
            Some(head) => head.print(cfg, alloc),
            None => alloc.text(WILDCARD),
        };
        alloc
            .text(PIPE)
            .append(alloc.space())
            .append(pattern)
            .append(alloc.space())
            .append(FAT_ARROW)
            .append(alloc.space())
            .append(self.body.print(cfg, alloc).nest(2))
    }
}

impl Print for CaseBody {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            CaseBody::Case(case) => alloc.hardline().append(case.print(cfg, alloc)),
            CaseBody::Done(dones) => alloc.intersperse(
                dones.iter().map(|done| done.instance.print(cfg, alloc)),
                alloc.text(COMMA).append(alloc.space()),
            ),
        }
    }
}
