//! Property-based tests for the parser.
//!
//! Random expression trees are rendered to fully parenthesised source, lexed,
//! parsed and printed. The printed AST must match the pre-order walk of the
//! generated tree, which checks operator mapping, unary handling and the
//! minus disambiguation together.

use proptest::prelude::*;

use super::ast::print_ast;
use super::parse::parse_source;

const KEYWORDS: &[&str] = &["if", "else", "while", "print", "putc"];

/// (source operator, printed label)
const BINARY_OPS: &[(&str, &str)] = &[
    ("+", "Add"),
    ("-", "Subtract"),
    ("*", "Multiply"),
    ("/", "Divide"),
    ("%", "Mod"),
    ("<", "Less"),
    ("<=", "LessEqual"),
    (">", "Greater"),
    (">=", "GreaterEqual"),
    ("==", "Equal"),
    ("!=", "NotEqual"),
    ("&&", "And"),
    ("||", "Or"),
];

#[derive(Debug, Clone)]
enum Expr {
    Ident(String),
    Int(u32),
    Binary(&'static str, &'static str, Box<Expr>, Box<Expr>),
    Negate(Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    fn source(&self) -> String {
        match self {
            Expr::Ident(name) => name.clone(),
            Expr::Int(n) => n.to_string(),
            Expr::Binary(op, _, l, r) => format!("({} {} {})", l.source(), op, r.source()),
            Expr::Negate(e) => format!("-({})", e.source()),
            Expr::Not(e) => format!("!({})", e.source()),
        }
    }

    fn preorder(&self, out: &mut Vec<String>) {
        match self {
            Expr::Ident(name) => out.push(format!("Identifier {name}")),
            Expr::Int(n) => out.push(format!("Integer {n}")),
            Expr::Binary(_, label, l, r) => {
                out.push(label.to_string());
                l.preorder(out);
                r.preorder(out);
            }
            Expr::Negate(e) => {
                out.push("Negate".to_string());
                e.preorder(out);
            }
            Expr::Not(e) => {
                out.push("Not".to_string());
                e.preorder(out);
            }
        }
    }
}

fn ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("keywords are reserved", |s| !KEYWORDS.contains(&s.as_str()))
}

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        ident().prop_map(Expr::Ident),
        any::<u32>().prop_map(Expr::Int),
    ];

    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            3 => (prop::sample::select(BINARY_OPS), inner.clone(), inner.clone())
                .prop_map(|((op, label), l, r)| Expr::Binary(op, label, Box::new(l), Box::new(r))),
            1 => inner.clone().prop_map(|e| Expr::Negate(Box::new(e))),
            1 => inner.prop_map(|e| Expr::Not(Box::new(e))),
        ]
    })
}

proptest! {
    #[test]
    fn parenthesised_expressions_round_trip(e in expr()) {
        let source = format!("target = {};", e.source());
        let root = parse_source(&source)
            .map_err(|err| TestCaseError::fail(format!("{err} in {source:?}")))?;

        let mut expected = vec![
            "Sequence".to_string(),
            ";".to_string(),
            "Assign".to_string(),
            "Identifier target".to_string(),
        ];
        e.preorder(&mut expected);

        let printed = print_ast(&root);
        let actual: Vec<&str> = printed.lines().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(printed.lines().count(), root.size());
    }

    #[test]
    fn statement_count_matches_separators(names in prop::collection::vec(ident(), 0..20)) {
        let source: String = names.iter().map(|n| format!("{n} = 1;\n")).collect();
        let root = parse_source(&source)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let printed = print_ast(&root);
        let separators = printed.lines().filter(|l| *l == ";").count();
        let expected = if names.is_empty() { 1 } else { names.len() };
        prop_assert_eq!(separators, expected);
    }
}
