use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

use super::{Arg, ArgMismatch, Controller, FromArg};
use crate::context::Context;

/// A function usable as an action on controller type `C`.
///
/// Implemented for every `Fn(&C, &mut Context, A1, .., An)` with up to
/// eight extra parameters, each implementing [`FromArg`]. `Args` is the
/// tuple of extra parameter types and only serves to keep the impls apart.
pub trait IntoAction<C, Args>: Send + Sync + 'static {
    /// Declared parameter count, including the leading context slot.
    fn param_count() -> usize;

    /// Extract the extra arguments and call the handler.
    ///
    /// Every argument is converted before the handler runs, so a mismatch
    /// never leaves the handler half-executed.
    fn call(&self, controller: &C, ctx: &mut Context, args: &[Arg]) -> Result<(), ArgMismatch>;
}

macro_rules! impl_into_action {
    ($($ty:ident $var:ident),*) => {
        impl<C, F, $($ty,)*> IntoAction<C, ($($ty,)*)> for F
        where
            F: Fn(&C, &mut Context, $($ty,)*) + Send + Sync + 'static,
            $($ty: FromArg,)*
        {
            fn param_count() -> usize {
                1 + <[&str]>::len(&[$(stringify!($ty)),*])
            }

            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn call(
                &self,
                controller: &C,
                ctx: &mut Context,
                args: &[Arg],
            ) -> Result<(), ArgMismatch> {
                let mut slots = args.iter();
                let mut position = 0;
                $(
                    position += 1;
                    let $var = ArgMismatch::extract::<$ty>(slots.next(), position)?;
                )*
                (self)(controller, ctx, $($var,)*);
                Ok(())
            }
        }
    };
}

impl_into_action!();
impl_into_action!(A1 a1);
impl_into_action!(A1 a1, A2 a2);
impl_into_action!(A1 a1, A2 a2, A3 a3);
impl_into_action!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_action!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_into_action!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_into_action!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_into_action!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

trait ErasedAction<C>: Send + Sync {
    fn invoke(&self, controller: &C, ctx: &mut Context, args: &[Arg]) -> Result<(), ArgMismatch>;
}

struct Handler<H, Args> {
    handler: H,
    _args: PhantomData<fn() -> Args>,
}

impl<C, H, Args> ErasedAction<C> for Handler<H, Args>
where
    H: IntoAction<C, Args>,
{
    fn invoke(&self, controller: &C, ctx: &mut Context, args: &[Arg]) -> Result<(), ArgMismatch> {
        self.handler.call(controller, ctx, args)
    }
}

/// A registered action: its name, declared arity and type-erased handler.
pub struct Action<C> {
    name: Arc<str>,
    param_count: usize,
    handler: Arc<dyn ErasedAction<C>>,
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            param_count: self.param_count,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("param_count", &self.param_count)
            .finish_non_exhaustive()
    }
}

impl<C> Action<C> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter count, including the context slot.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Number of extra arguments the caller must supply.
    #[must_use]
    pub fn required_args(&self) -> usize {
        self.param_count - 1
    }

    /// Invoke with the context followed by `args`, positionally.
    ///
    /// `args` beyond [`required_args`](Self::required_args) are ignored.
    pub fn invoke(&self, controller: &C, ctx: &mut Context, args: &[Arg]) -> Result<(), ArgMismatch> {
        self.handler.invoke(controller, ctx, args)
    }
}

/// Exact-name registry of a controller type's actions.
pub struct ActionTable<C> {
    actions: HashMap<String, Action<C>>,
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for ActionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("actions", &self.names())
            .finish()
    }
}

impl<C: Controller> ActionTable<C> {
    /// Build the table by running the controller's registration.
    #[must_use]
    pub fn build() -> Self {
        let mut table = Self::new();
        C::actions(&mut table);
        table
    }
}

impl<C> ActionTable<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    ///
    /// A second registration under the same name replaces the first.
    pub fn action<Args, H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: IntoAction<C, Args>,
        Args: 'static,
        C: 'static,
    {
        let name = name.into();
        let action = Action {
            name: Arc::from(name.as_str()),
            param_count: H::param_count(),
            handler: Arc::new(Handler {
                handler,
                _args: PhantomData,
            }),
        };

        if let Some(old) = self.actions.insert(name, action) {
            warn!(
                controller = std::any::type_name::<C>(),
                action = %old.name,
                "Replaced existing action registration"
            );
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action<C>> {
        self.actions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
