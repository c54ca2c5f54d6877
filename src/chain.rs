//! Chain-aware matching
//!
//! Identity and type tests over cause chains. Contextual errors are stepped
//! through explicitly; everything else follows `source()`, fanning out into
//! every cause of a [`Joined`] aggregate.

use std::any::TypeId;
use std::error::Error as StdError;

use crate::context::ErrCtx;
use crate::types::Joined;

type DynError = dyn StdError + 'static;

/// Whether `target` is `err` or appears in its chain
///
/// Contextual errors at the head of the chain are skipped, however deeply
/// nested, before the comparison starts. Matching is by identity, the same
/// error instance, never by message: two errors built separately from the
/// same text do not match. `target` itself is never unwrapped.
///
/// Zero-sized errors have no address of their own, so two of them only match
/// when they are also the same type. Hold a zero-sized sentinel in a [`Cause`]
/// to give it a distinct identity.
///
/// [`Cause`]: crate::Cause
pub fn is(err: &DynError, target: &DynError) -> bool {
    if let Some(ctx) = err.downcast_ref::<ErrCtx>() {
        return is(ctx.cause().as_error(), target);
    }
    chain_contains(err, target)
}

/// [`is`] for possibly absent errors
///
/// Two absent errors match; an absent error never matches a present one.
pub fn is_option(err: Option<&DynError>, target: Option<&DynError>) -> bool {
    match (err, target) {
        (Some(err), Some(target)) => is(err, target),
        (None, None) => true,
        _ => false,
    }
}

/// [`as_target`] for a possibly absent error
///
/// An absent error contains nothing, so this is `false` and `target` is left
/// untouched.
pub fn as_target_option<T>(err: Option<&DynError>, target: &mut T) -> bool
where
    T: StdError + Clone + 'static,
{
    err.is_some_and(|err| as_target(err, target))
}

/// Find an error of type `T` in `err`'s chain and copy it into `target`
///
/// Contextual errors are stepped through like in [`is`], with one shortcut:
/// when `T` is [`ErrCtx`] and a contextual error is reached, this returns
/// `true` straight away and leaves `target` untouched. The presence of any
/// contextual error satisfies the test; its contents are never compared or
/// copied.
///
/// For any other `T`, the first match found walking `source()` and joined
/// causes is cloned into `target`.
pub fn as_target<T>(err: &DynError, target: &mut T) -> bool
where
    T: StdError + Clone + 'static,
{
    if let Some(ctx) = err.downcast_ref::<ErrCtx>() {
        if TypeId::of::<T>() == TypeId::of::<ErrCtx>() {
            return true;
        }
        return as_target(ctx.cause().as_error(), target);
    }

    match find_in_chain::<T>(err) {
        Some(found) => {
            *target = found.clone();
            true
        }
        None => false,
    }
}

/// Borrow the first error of type `T` in `err`'s chain
///
/// Walks the chain in the same order as [`as_target`]. For `T = ErrCtx` the
/// first contextual error encountered is returned.
pub fn find_as<T>(err: &DynError) -> Option<&T>
where
    T: StdError + 'static,
{
    if let Some(ctx) = err.downcast_ref::<ErrCtx>() {
        return err
            .downcast_ref::<T>()
            .or_else(|| find_as::<T>(ctx.cause().as_error()));
    }
    find_in_chain::<T>(err)
}

/// The first contextual error in `err`'s chain, `err` included
pub fn find_context(err: &DynError) -> Option<&ErrCtx> {
    find_in_chain::<ErrCtx>(err)
}

fn chain_contains(err: &DynError, target: &DynError) -> bool {
    let mut current = Some(err);
    while let Some(node) = current {
        if same_error(node, target) {
            return true;
        }
        if let Some(joined) = node.downcast_ref::<Joined>() {
            return joined
                .causes()
                .iter()
                .any(|cause| chain_contains(cause.as_error(), target));
        }
        current = node.source();
    }
    false
}

fn same_error(node: &DynError, target: &DynError) -> bool {
    // Zero-sized values may share an address; the vtable tells their types apart.
    if std::mem::size_of_val(node) == 0 || std::mem::size_of_val(target) == 0 {
        return std::ptr::eq(node, target);
    }
    std::ptr::addr_eq(node, target)
}

fn find_in_chain<T>(err: &DynError) -> Option<&T>
where
    T: StdError + 'static,
{
    let mut current = Some(err);
    while let Some(node) = current {
        if let Some(found) = node.downcast_ref::<T>() {
            return Some(found);
        }
        if let Some(joined) = node.downcast_ref::<Joined>() {
            return joined
                .causes()
                .iter()
                .find_map(|cause| find_in_chain::<T>(cause.as_error()));
        }
        current = node.source();
    }
    None
}
