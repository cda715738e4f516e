//! Static string values of call arguments.

use swc_ecma_ast::{BinaryOp, Expr, ExprOrSpread, Lit};

/// What a call argument at a mapped position turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// The call has no argument at that position.
    Missing,
    /// A statically known string.
    Value(String),
    /// Present, but not a static string (variable, call, interpolation, ...).
    Unresolvable,
}

impl ArgumentValue {
    pub fn at(args: &[ExprOrSpread], index: usize) -> Self {
        match args.get(index) {
            None => ArgumentValue::Missing,
            Some(arg) if arg.spread.is_some() => ArgumentValue::Unresolvable,
            Some(arg) => match static_string(&arg.expr) {
                Some(value) => ArgumentValue::Value(value),
                None => ArgumentValue::Unresolvable,
            },
        }
    }
}

/// Evaluate an expression to a string when it is built only from literals.
///
/// Supports:
/// - String literals: `"text"`, `'text'`
/// - Template literals without substitutions: `` `text` ``
/// - Concatenation of the above: `"a" + 'b' + `c``
/// - Parentheses around any of these
pub fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(String::from),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|quasi| quasi.cooked.as_ref().and_then(|c| c.as_str()))
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let left = static_string(&bin.left)?;
            let right = static_string(&bin.right)?;
            Some(left + right.as_str())
        }
        Expr::Paren(paren) => static_string(&paren.expr),
        _ => None,
    }
}
