use super::ActionTable;
use crate::context::Context;

/// A value exposing one named action per supported request.
///
/// Controllers are borrowed immutably for the duration of a dispatch. A
/// controller shared between concurrent requests must therefore be
/// stateless or synchronise its own interior state.
pub trait Controller: Send + Sync + Sized + 'static {
    /// Register every action of this controller type.
    ///
    /// Names must match resolved action names exactly, including case and
    /// any `_post` suffix.
    fn actions(table: &mut ActionTable<Self>);

    /// Capability query for the optional [`Filter`] role.
    ///
    /// Implementing [`Filter`] alone does nothing: the dispatcher only runs
    /// hooks reached through this method. A controller with a filter must
    /// return `Some(self)` here, which `#[gof::controller(filter)]` does.
    fn as_filter(&self) -> Option<&dyn Filter> {
        None
    }

    /// Identity used in error messages and logs.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Pre/post hooks run around a single action invocation.
///
/// # Enabling
///
/// The hooks only run when [`Controller::as_filter`] exposes them. Without
/// that, `requesting` is never called and returning `false` from it blocks
/// nothing, so an auth gate written as a `Filter` would be silently skipped.
/// Either register through the macro:
///
/// ```rust
/// use gof::context::Context;
/// use gof::controller::Filter;
///
/// struct Admin;
///
/// #[gof::controller(filter)]
/// impl Admin {
///     #[action]
///     fn index(&self, ctx: &mut Context) {
///         ctx.response_mut().write_str("admin");
///     }
/// }
///
/// impl Filter for Admin {
///     fn requesting(&self, ctx: &mut Context) -> bool {
///         ctx.request().headers().contains_key("authorization")
///     }
/// }
/// ```
///
/// or override `as_filter` by hand to return `Some(self)`.
pub trait Filter: Send + Sync {
    /// Gate run before the action is looked up. Returning `false` ends the
    /// dispatch; the response is whatever the gate wrote.
    fn requesting(&self, _ctx: &mut Context) -> bool {
        true
    }

    /// Runs after the action completed.
    fn request_end(&self, _ctx: &mut Context) {}
}
