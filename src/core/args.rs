//! # Argument Pipeline
//!
//! An ordered, type-tagged bundle of values. Tuples go in through
//! [`IntoArgs`] and come back out through [`FromArgs`]:
//!
//! ```text
//! ("alice", 3u32).into_args()  →  [Arg<&str>, Arg<u32>]  →  extract::<(&str, u32)>()
//! ```
//!
//! Values are stored behind `Arc`, so cloning a pipeline is cheap and
//! extracting clones the values out. A pipeline can be replayed any number of
//! times, which is what lets one menu item be selected repeatedly.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::core::error::MenuError;

/// The runtime identity of one argument slot.
#[derive(Debug, Clone, Copy)]
pub struct ArgType {
    pub id: TypeId,
    pub name: &'static str,
}

impl ArgType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

impl PartialEq for ArgType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgType {}

/// A single type-erased value.
#[derive(Clone)]
pub struct Arg {
    value: Arc<dyn Any + Send + Sync>,
    ty: ArgType,
}

impl Arg {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            ty: ArgType::of::<T>(),
        }
    }

    pub fn arg_type(&self) -> ArgType {
        self.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    /// Clone the value out if it has type `T`.
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arg<{}>", self.ty.name)
    }
}

#[derive(Clone, Default, Debug)]
pub struct ArgPipeline {
    args: Vec<Arg>,
}

impl ArgPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoArgs) -> Self {
        Self {
            args: values.into_args(),
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn types(&self) -> Vec<ArgType> {
        self.args.iter().map(Arg::arg_type).collect()
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.args.iter().map(Arg::type_name).collect()
    }

    /// Put `values` in front of everything already stored, keeping the order
    /// of both groups.
    pub fn prepend(&mut self, values: impl IntoArgs) {
        let mut args = values.into_args();
        args.append(&mut self.args);
        self.args = args;
    }

    pub fn append(&mut self, values: impl IntoArgs) {
        self.args.extend(values.into_args());
    }

    /// A new pipeline holding `self` followed by `other`.
    pub fn concat(&self, other: &ArgPipeline) -> ArgPipeline {
        let mut args = Vec::with_capacity(self.args.len() + other.args.len());
        args.extend(self.args.iter().cloned());
        args.extend(other.args.iter().cloned());
        ArgPipeline { args }
    }

    /// Reinterpret the bundle as the tuple `T`.
    ///
    /// The requested sequence must match the stored one exactly.
    pub fn extract<T: FromArgs>(&self) -> Result<T, MenuError> {
        T::from_args(&self.args)
    }
}

/// Anything that can become an ordered list of arguments.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for ArgPipeline {
    fn into_args(self) -> Vec<Arg> {
        self.args
    }
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

/// A tuple that can be rebuilt from an argument list.
pub trait FromArgs: Sized {
    fn expected() -> Vec<ArgType>;

    fn from_args(args: &[Arg]) -> Result<Self, MenuError>;
}

fn mismatch(expected: &[ArgType], args: &[Arg]) -> MenuError {
    MenuError::TypeMismatch {
        expected: expected.iter().map(|t| t.name).collect(),
        found: args.iter().map(Arg::type_name).collect(),
    }
}

macro_rules! impl_tuple_args {
    ($($ty:ident),*) => {
        impl<$($ty: Any + Send + Sync),*> IntoArgs for ($($ty,)*) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($ty,)*) = self;
                vec![$(Arg::new($ty)),*]
            }
        }

        impl<$($ty: Any + Clone),*> FromArgs for ($($ty,)*) {
            fn expected() -> Vec<ArgType> {
                vec![$(ArgType::of::<$ty>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn from_args(args: &[Arg]) -> Result<Self, MenuError> {
                let expected = Self::expected();
                if args.len() != expected.len() {
                    return Err(mismatch(&expected, args));
                }
                let mut iter = args.iter();
                $(
                    let $ty = iter
                        .next()
                        .and_then(|arg| arg.downcast::<$ty>())
                        .ok_or_else(|| mismatch(&expected, args))?;
                )*
                Ok(($($ty,)*))
            }
        }
    };
}

impl_tuple_args!();
impl_tuple_args!(A);
impl_tuple_args!(A, B);
impl_tuple_args!(A, B, C);
impl_tuple_args!(A, B, C, D);
impl_tuple_args!(A, B, C, D, E);
impl_tuple_args!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_keeps_both_orders() {
        let mut pipeline = ArgPipeline::new();
        pipeline.prepend(("a".to_string(), 2u32));
        pipeline.prepend((true,));

        let (c, a, b) = pipeline.extract::<(bool, String, u32)>().unwrap();
        assert!(c);
        assert_eq!(a, "a");
        assert_eq!(b, 2);
    }

    #[test]
    fn test_extract_wrong_order_is_type_mismatch() {
        let pipeline = ArgPipeline::from_values((1u8, 'x'));
        let err = pipeline.extract::<(char, u8)>().unwrap_err();
        assert_eq!(
            err,
            MenuError::TypeMismatch {
                expected: vec!["char", "u8"],
                found: vec!["u8", "char"],
            }
        );
    }

    #[test]
    fn test_extract_wrong_length_is_type_mismatch() {
        let pipeline = ArgPipeline::from_values((1u8,));
        assert!(matches!(
            pipeline.extract::<(u8, u8)>(),
            Err(MenuError::TypeMismatch { .. })
        ));
        assert!(matches!(
            pipeline.extract::<()>(),
            Err(MenuError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_pipeline_extracts_unit() {
        let pipeline = ArgPipeline::new();
        assert!(pipeline.is_empty());
        pipeline.extract::<()>().unwrap();
    }

    #[test]
    fn test_extract_does_not_consume() {
        let pipeline = ArgPipeline::from_values((vec![1, 2, 3],));
        let (first,) = pipeline.extract::<(Vec<i32>,)>().unwrap();
        let (second,) = pipeline.extract::<(Vec<i32>,)>().unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn test_concat_leaves_inputs_untouched() {
        let left = ArgPipeline::from_values((1i32,));
        let right = ArgPipeline::from_values(("r",));
        let joined = left.concat(&right);

        assert_eq!(joined.type_names(), vec!["i32", "&str"]);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn test_append_goes_to_back() {
        let mut pipeline = ArgPipeline::from_values((1i32,));
        pipeline.append((2i64,));
        assert_eq!(pipeline.extract::<(i32, i64)>().unwrap(), (1, 2));
    }

    #[test]
    fn test_arg_type_equality_uses_type_id() {
        assert_eq!(ArgType::of::<u32>(), ArgType::of::<u32>());
        assert_ne!(ArgType::of::<u32>(), ArgType::of::<i32>());
        assert_eq!(format!("{:?}", Arg::new(5u16)), "Arg<u16>");
    }
}
