//! Test-only front end: de Bruijn terms lowered to positional templates and
//! linked into a global table.

#![allow(dead_code)]

use lambda_builtins::prelude;
use lambda_machine::{GlobalTable, LiveNode, Template};
use lambda_types::{FileInfo, MetaInfo};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Surface term with de Bruijn indices.
pub enum Term {
    Var(usize),
    Global(&'static str),
    Int(i64),
    Lam(Box<Term>),
    App(Box<Term>, Box<Term>),
}

pub fn var(index: usize) -> Term {
    Term::Var(index)
}

pub fn global(name: &'static str) -> Term {
    Term::Global(name)
}

pub fn int(n: i64) -> Term {
    Term::Int(n)
}

pub fn lam(body: Term) -> Term {
    Term::Lam(Box::new(body))
}

/// `f a b c ...`
pub fn apps(f: Term, args: Vec<Term>) -> Term {
    args.into_iter()
        .fold(f, |acc, arg| Term::App(Box::new(acc), Box::new(arg)))
}

fn free_vars(term: &Term) -> BTreeSet<usize> {
    match term {
        Term::Var(i) => BTreeSet::from([*i]),
        Term::Global(_) | Term::Int(_) => BTreeSet::new(),
        Term::Lam(body) => free_vars(body)
            .into_iter()
            .filter(|&i| i > 0)
            .map(|i| i - 1)
            .collect(),
        Term::App(left, right) => {
            let mut vars = free_vars(left);
            vars.extend(free_vars(right));
            vars
        }
    }
}

/// Drop the frames `term` does not need from the top of `env`.
fn trim<'a>(env: &'a [usize], term: &Term) -> (usize, &'a [usize]) {
    let drop = match free_vars(term).first() {
        Some(lowest) => env
            .iter()
            .position(|i| i == lowest)
            .expect("free variable missing from environment"),
        None => env.len(),
    };
    (drop, &env[drop..])
}

/// Lower `term`, whose environment holds the context indices in `env`
/// (innermost first).
fn lower_in(term: &Term, env: &[usize], table: &Rc<GlobalTable>) -> Template {
    match term {
        Term::Var(i) => {
            assert_eq!(env.first(), Some(i), "variable is not on top of its environment");
            Template::var()
        }
        Term::Global(name) => {
            let slot = table.lookup(name, None).expect("undefined global");
            let meta = MetaInfo::new(FileInfo::new("test.lambda", 1, 1), *name);
            Template::global(slot).with_meta(meta)
        }
        Term::Int(n) => Template::constant(LiveNode::int(*n)),
        Term::Lam(body) => {
            let used = free_vars(body).contains(&0);
            let inner: Vec<usize> = used
                .then_some(0)
                .into_iter()
                .chain(env.iter().map(|i| i + 1))
                .collect();
            Template::abstraction(used, lower_in(body, &inner, table))
        }
        Term::App(left, right) => {
            let (left_drop, left_env) = trim(env, left);
            let (right_drop, right_env) = trim(env, right);
            Template::application(
                left_drop,
                right_drop,
                lower_in(left, left_env, table),
                lower_in(right, right_env, table),
            )
        }
    }
}

/// Lower a closed term.
pub fn lower(term: &Term, table: &Rc<GlobalTable>) -> Template {
    assert!(free_vars(term).is_empty(), "term is not closed");
    lower_in(term, &[], table)
}

/// Install the prelude, declare every definition, then fill them in order.
pub fn link(defs: Vec<(&'static str, Term)>) -> Rc<GlobalTable> {
    let table = GlobalTable::new();
    prelude::install(&table).unwrap();
    let slots: Vec<_> = defs
        .iter()
        .map(|(name, _)| table.declare(name, None).unwrap())
        .collect();
    for ((_, term), slot) in defs.iter().zip(&slots) {
        let template = lower(term, &table);
        table.define(slot, &template).unwrap();
    }
    table
}

/// `fact = \n -> (== n 0) 1 (* n (fact (- n 1)))`
pub fn factorial() -> Term {
    lam(apps(
        apps(global("=="), vec![var(0), int(0)]),
        vec![
            int(1),
            apps(
                global("*"),
                vec![
                    var(0),
                    apps(global("fact"), vec![apps(global("-"), vec![var(0), int(1)])]),
                ],
            ),
        ],
    ))
}
