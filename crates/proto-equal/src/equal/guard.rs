//! Identity and nil short-circuits applied before descending into a message.

use crate::model::Message;

/// Outcome of guarding a pair of possibly-absent messages.
#[derive(Debug, Clone, Copy)]
pub enum Guard<'m> {
    /// Decided without looking at any field.
    Resolved(bool),
    /// Both present and distinct; fields must be compared.
    Descend(&'m Message, &'m Message),
}

/// Applies the identity rule first, then the nil rules.
///
/// - same instance: equal
/// - both absent: equal
/// - exactly one absent: not equal
#[inline]
pub fn check<'m>(a: Option<&'m Message>, b: Option<&'m Message>) -> Guard<'m> {
    match (a, b) {
        (Some(x), Some(y)) if x.is_same(y) => Guard::Resolved(true),
        (Some(x), Some(y)) => Guard::Descend(x, y),
        (None, None) => Guard::Resolved(true),
        _ => Guard::Resolved(false),
    }
}

/// A pair of distinct instances of a bound message type awaiting comparison.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pending<'m> {
    /// Index of the bound message type.
    pub message: usize,
    pub a: &'m Message,
    pub b: &'m Message,
}
