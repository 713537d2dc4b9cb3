use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span, error};

use super::{ActionCache, DispatchError};
use crate::action::resolve_action;
use crate::context::Context;
use crate::controller::{ActionTable, Arg, Controller};
use crate::runtime_config::RuntimeConfig;

/// Successful end of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The action ran (and the post hook, if the controller has a filter).
    Completed,
    /// The filter gate returned `false`; nothing else ran.
    Halted,
}

/// Path dispatch: resolve the action from the context's path and method,
/// then proceed as [`dispatch_action`].
///
/// With `post_suffix`, POST requests resolve to `<Action>_post`.
pub fn dispatch<C: Controller>(
    controller: &C,
    ctx: &mut Context,
    post_suffix: bool,
    args: &[Arg],
) -> Result<Dispatched, DispatchError> {
    let action = resolved(ctx, post_suffix);
    dispatch_action(controller, ctx, &action, args)
}

/// Named dispatch: call `action` on `controller` without consulting the path.
///
/// The context is always the first argument; `args` fill the action's
/// remaining parameters in order and any surplus is ignored. Errors have
/// already been written to the response when this returns.
pub fn dispatch_action<C: Controller>(
    controller: &C,
    ctx: &mut Context,
    action: &str,
    args: &[Arg],
) -> Result<Dispatched, DispatchError> {
    let table = ActionTable::<C>::build();
    run(controller, ctx, action, args, &table, false)
}

/// Dispatcher driven by a [`RuntimeConfig`].
///
/// Cheap to clone; clones share the action cache when it is enabled.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: RuntimeConfig,
    cache: Option<ActionCache>,
}

impl Dispatcher {
    /// Dispatcher with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Dispatcher configured from `GOF_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        debug!(
            post_suffix = config.post_suffix,
            action_cache = config.action_cache,
            recover_panics = config.recover_panics,
            "Dispatcher configured"
        );
        Self {
            config,
            cache: config.action_cache.then(ActionCache::new),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The action cache, when enabled.
    #[must_use]
    pub fn cache(&self) -> Option<&ActionCache> {
        self.cache.as_ref()
    }

    /// Drop cached action tables. No-op without a cache.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Path dispatch using the configured POST suffix convention.
    pub fn handle<C: Controller>(
        &self,
        controller: &C,
        ctx: &mut Context,
        args: &[Arg],
    ) -> Result<Dispatched, DispatchError> {
        let action = resolved(ctx, self.config.post_suffix);
        self.handle_action(controller, ctx, &action, args)
    }

    /// Named dispatch.
    pub fn handle_action<C: Controller>(
        &self,
        controller: &C,
        ctx: &mut Context,
        action: &str,
        args: &[Arg],
    ) -> Result<Dispatched, DispatchError> {
        let table = match &self.cache {
            Some(cache) => cache.get_or_build::<C>(),
            None => Arc::new(ActionTable::<C>::build()),
        };
        run(
            controller,
            ctx,
            action,
            args,
            &table,
            self.config.recover_panics,
        )
    }
}

fn resolved(ctx: &Context, post_suffix: bool) -> String {
    let action = resolve_action(ctx.path(), ctx.method(), post_suffix);
    debug!(
        request_id = %ctx.request_id(),
        method = %ctx.method(),
        path = ctx.path(),
        action = %action,
        "Action resolved"
    );
    action
}

fn run<C: Controller>(
    controller: &C,
    ctx: &mut Context,
    action: &str,
    args: &[Arg],
    table: &ActionTable<C>,
    recover_panics: bool,
) -> Result<Dispatched, DispatchError> {
    let request_id = ctx.request_id();
    let span = debug_span!(
        "dispatch",
        request_id = %request_id,
        controller = controller.type_name(),
        action = %action
    );
    let _entered = span.enter();

    let filter = controller.as_filter();
    if let Some(filter) = filter {
        if !filter.requesting(ctx) {
            debug!(request_id = %request_id, "Filter gate halted dispatch");
            return Ok(Dispatched::Halted);
        }
    }

    if let Err(err) = invoke(controller, ctx, action, args, table, recover_panics) {
        error!(
            request_id = %request_id,
            controller = err.controller(),
            action = %err.action(),
            status = err.status().as_u16(),
            error = %err,
            "Dispatch failed"
        );
        ctx.response_mut().error(err.status(), &err.to_string());
        return Err(err);
    }

    if let Some(filter) = filter {
        filter.request_end(ctx);
    }
    Ok(Dispatched::Completed)
}

fn invoke<C: Controller>(
    controller: &C,
    ctx: &mut Context,
    action: &str,
    args: &[Arg],
    table: &ActionTable<C>,
    recover_panics: bool,
) -> Result<(), DispatchError> {
    let Some(entry) = table.get(action) else {
        debug!(available = ?table.names(), "Action lookup missed");
        return Err(DispatchError::ActionNotFound {
            action: action.to_string(),
            controller: controller.type_name(),
        });
    };

    let required = entry.required_args();
    if args.len() < required {
        return Err(DispatchError::ArgumentCountMismatch {
            action: action.to_string(),
            controller: controller.type_name(),
            required,
            supplied: args.len(),
        });
    }
    if args.len() > required {
        debug!(
            required = required,
            supplied = args.len(),
            "Ignoring surplus arguments"
        );
    }
    let selected = &args[..required];

    let start = Instant::now();
    let outcome = if recover_panics {
        catch_unwind(AssertUnwindSafe(|| entry.invoke(controller, ctx, selected))).map_err(
            |panic| DispatchError::ActionPanicked {
                action: action.to_string(),
                controller: controller.type_name(),
                message: panic_message(panic.as_ref()),
            },
        )?
    } else {
        entry.invoke(controller, ctx, selected)
    };

    outcome.map_err(|mismatch| DispatchError::ArgumentTypeMismatch {
        action: action.to_string(),
        controller: controller.type_name(),
        mismatch,
    })?;

    debug!(
        elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        "Action complete"
    );
    Ok(())
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
