//! Call-site recognition for configured translation functions.
//!
//! A translation function is configured as a dotted callee path such as
//! `gettext`, `i18n.gettext` or `this.i18n.gettext`. [`CalleePath::matches`]
//! decides whether the callee of a parsed call is that function.
//!
//! Recognition is conservative: only identifier references,
//! plain member accesses and `this` are understood. Computed access
//! (`i18n["gettext"]`), optional chains, call results and anything else never
//! match.
//!
//! ## `this` leniency
//!
//! A path whose receiver is a single identifier also matches the same member
//! reached through `this`, so `i18n.gettext` matches both `i18n.gettext(..)`
//! and `this.i18n.gettext(..)`. The leniency applies at the root only, one
//! level deep. A path may also spell the receiver out as `this` or `[this]`
//! (`this.gettext`, `[this].gettext`), which then only matches `this.gettext(..)`.

use swc_ecma_ast::{Expr, MemberProp};

/// Marker that stands for the implicit `this` receiver in a callee path.
pub const THIS_MARKER: &str = "[this]";

/// Shape of a callee expression, as far as recognition cares.
#[derive(Debug)]
pub enum CalleeShape<'a, E: ?Sized> {
    /// Bare name: `gettext`
    Identifier(&'a str),
    /// Member access with a plain name: `<object>.gettext`
    Member { object: &'a E, property: &'a str },
    /// The implicit receiver: `this`
    This,
    /// Anything else; never matches.
    Unsupported,
}

/// Parsed callee expressions that can be classified for matching.
pub trait CalleeExpression {
    fn shape(&self) -> CalleeShape<'_, Self>;
}

impl CalleeExpression for Expr {
    fn shape(&self) -> CalleeShape<'_, Self> {
        match self {
            Expr::Ident(ident) => CalleeShape::Identifier(ident.sym.as_str()),
            Expr::This(_) => CalleeShape::This,
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => CalleeShape::Member {
                    object: &member.obj,
                    property: prop.sym.as_str(),
                },
                _ => CalleeShape::Unsupported,
            },
            _ => CalleeShape::Unsupported,
        }
    }
}

/// A configured callee path, split into its dotted segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalleePath {
    name: String,
    segments: Vec<String>,
}

impl CalleePath {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let segments = name.split('.').map(String::from).collect();
        Self { name, segments }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `callee` is a call of this path.
    pub fn matches<E: CalleeExpression + ?Sized>(&self, callee: &E) -> bool {
        match self.segments.split_last() {
            None => false,
            Some((last, [])) => {
                matches!(callee.shape(), CalleeShape::Identifier(name) if name == last)
            }
            Some((last, receiver)) => match callee.shape() {
                CalleeShape::Member { object, property } if property == last => {
                    receiver_matches(receiver, object)
                }
                _ => false,
            },
        }
    }
}

/// Shorthand for a one-off check without keeping a `CalleePath` around.
pub fn callee_name_matches<E: CalleeExpression + ?Sized>(callee_name: &str, callee: &E) -> bool {
    CalleePath::new(callee_name).matches(callee)
}

fn receiver_matches<E: CalleeExpression + ?Sized>(segments: &[String], expr: &E) -> bool {
    let Some((last, rest)) = segments.split_last() else {
        return false;
    };

    match expr.shape() {
        CalleeShape::Identifier(name) => rest.is_empty() && name == last,
        CalleeShape::This => rest.is_empty() && is_this_segment(last),
        CalleeShape::Member { object, property } => {
            if property != last {
                return false;
            }
            if rest.is_empty() {
                // `svc.t` reached as `this.svc.t`
                matches!(object.shape(), CalleeShape::This)
            } else {
                receiver_matches(rest, object)
            }
        }
        CalleeShape::Unsupported => false,
    }
}

fn is_this_segment(segment: &str) -> bool {
    segment == "this" || segment == THIS_MARKER
}
