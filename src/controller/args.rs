use serde_json::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Maximum extra arguments stored inline before an [`ArgVec`] spills to the heap.
pub const MAX_INLINE_ARGS: usize = 4;

/// Stack-allocated list of extra arguments for the common case.
pub type ArgVec = SmallVec<[Arg; MAX_INLINE_ARGS]>;

/// An extra argument supplied by the caller of a dispatch.
///
/// Values are tagged so that a handler parameter of the wrong kind is
/// detected before the handler is called. Anything that is not a scalar or
/// JSON document travels as [`Arg::Any`] and is recovered as an `Arc<T>`.
#[derive(Debug, Clone)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Json(Value),
    Any(Arc<dyn Any + Send + Sync>),
}

impl Arg {
    /// Wrap an arbitrary value; handlers receive it as `Arc<T>`.
    pub fn any<T: Any + Send + Sync>(value: T) -> Self {
        Arg::Any(Arc::new(value))
    }

    /// Share an existing `Arc` without copying the value.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Arg::Any(value)
    }

    /// Short label of the variant, used in mismatch reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) => "int",
            Arg::Float(_) => "float",
            Arg::Bool(_) => "bool",
            Arg::Json(_) => "json",
            Arg::Any(_) => "any",
        }
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(i64::from(v))
    }
}

impl From<u32> for Arg {
    fn from(v: u32) -> Self {
        Arg::Int(i64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Json(v)
    }
}

/// Conversion from an [`Arg`] into a handler parameter.
///
/// No coercion between variants takes place: a string never becomes a
/// number. Integer parameters narrower than `i64` accept `Arg::Int` only
/// when the value fits.
pub trait FromArg: Sized {
    /// Label of the expected kind, used in mismatch reports.
    fn expected() -> &'static str;

    fn from_arg(arg: &Arg) -> Option<Self>;
}

impl FromArg for String {
    fn expected() -> &'static str {
        "string"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromArg for i64 {
    fn expected() -> &'static str {
        "int"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromArg for i32 {
    fn expected() -> &'static str {
        "int (i32)"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FromArg for u64 {
    fn expected() -> &'static str {
        "int (u64)"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FromArg for f64 {
    fn expected() -> &'static str {
        "float"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromArg for bool {
    fn expected() -> &'static str {
        "bool"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromArg for Value {
    fn expected() -> &'static str {
        "json"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Json(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Pass-through for handlers that inspect the tag themselves.
impl FromArg for Arg {
    fn expected() -> &'static str {
        "any"
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        Some(arg.clone())
    }
}

impl<T: Any + Send + Sync> FromArg for Arc<T> {
    fn expected() -> &'static str {
        std::any::type_name::<T>()
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Any(v) => Arc::clone(v).downcast::<T>().ok(),
            _ => None,
        }
    }
}

/// Never fails: a value of the wrong kind becomes `None`.
impl<T: FromArg> FromArg for Option<T> {
    fn expected() -> &'static str {
        T::expected()
    }

    fn from_arg(arg: &Arg) -> Option<Self> {
        Some(T::from_arg(arg))
    }
}

/// Extra argument that could not be converted into its handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgMismatch {
    /// 1-based position among the extra arguments (the context is slot 0)
    pub position: usize,
    pub expected: &'static str,
    pub found: &'static str,
}

impl ArgMismatch {
    pub(crate) fn extract<T: FromArg>(arg: Option<&Arg>, position: usize) -> Result<T, Self> {
        let Some(arg) = arg else {
            return Err(ArgMismatch {
                position,
                expected: T::expected(),
                found: "nothing",
            });
        };
        T::from_arg(arg).ok_or(ArgMismatch {
            position,
            expected: T::expected(),
            found: arg.kind(),
        })
    }
}

impl fmt::Display for ArgMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "argument {} expects {} but got {}",
            self.position, self.expected, self.found
        )
    }
}

impl std::error::Error for ArgMismatch {}
