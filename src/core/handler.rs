//! # Actions
//!
//! Anything a menu item can run. Closures of up to six parameters implement
//! [`Handler`] for the tuple of their parameter types, so
//!
//! ```rust,ignore
//! Action::new(|| beep());
//! Action::new(|user: String, count: u32| greet(&user, count));
//! ```
//!
//! both produce the same `Action` type. The parameter tuple is recovered from
//! an [`ArgPipeline`] at call time.

use std::fmt;

use crate::core::args::{ArgPipeline, ArgType, FromArgs};
use crate::core::error::MenuError;

/// A callable taking the argument tuple `Args`.
pub trait Handler<Args>: 'static {
    fn call(&mut self, args: Args);
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        impl<Func, $($ty),*> Handler<($($ty,)*)> for Func
        where
            Func: FnMut($($ty),*) + 'static,
        {
            #[allow(non_snake_case)]
            fn call(&mut self, args: ($($ty,)*)) {
                let ($($ty,)*) = args;
                (self)($($ty),*)
            }
        }
    };
}

impl_handler!();
impl_handler!(A);
impl_handler!(A, B);
impl_handler!(A, B, C);
impl_handler!(A, B, C, D);
impl_handler!(A, B, C, D, E);
impl_handler!(A, B, C, D, E, F);

type ErasedCall = Box<dyn FnMut(&ArgPipeline) -> Result<(), MenuError>>;

/// A handler with its signature erased.
pub struct Action {
    call: ErasedCall,
    signature: Vec<ArgType>,
}

impl Action {
    pub fn new<Args, H>(mut handler: H) -> Self
    where
        Args: FromArgs + 'static,
        H: Handler<Args>,
    {
        Self {
            call: Box::new(move |pipeline: &ArgPipeline| {
                let args = pipeline.extract::<Args>()?;
                handler.call(args);
                Ok(())
            }),
            signature: Args::expected(),
        }
    }

    /// The parameter types the wrapped handler expects, in order.
    pub fn signature(&self) -> &[ArgType] {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    /// Check that `bound` can fill the trailing parameters of this action.
    pub fn accepts_tail(&self, bound: &ArgPipeline) -> Result<(), MenuError> {
        let bound_types = bound.types();
        let fits = bound_types.len() <= self.signature.len()
            && self.signature[self.signature.len() - bound_types.len()..] == bound_types[..];
        if fits {
            Ok(())
        } else {
            Err(MenuError::TypeMismatch {
                expected: self.signature.iter().map(|t| t.name).collect(),
                found: bound.type_names(),
            })
        }
    }

    pub fn invoke(&mut self, pipeline: &ArgPipeline) -> Result<(), MenuError> {
        (self.call)(pipeline)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.signature.iter().map(|t| t.name).collect();
        write!(f, "Action({})", names.join(", "))
    }
}
