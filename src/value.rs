use crate::{Flags, ValueError};
use std::marker::PhantomData;

/// A settable, printable view of some storage, usually a field of a config struct.
///
/// Every flag carries one of these. Parsers hand it the raw text of each occurrence of the flag
/// through [`Value::set`], and read the current value back through [`Value::render`].
pub trait Value {
    /// Parse `raw` and store it. On error the storage must be left unchanged.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// The current value as text, such that `set(render())` reproduces it
    fn render(&self) -> String;

    /// Short name of the kind of value, like `string`, `int64` or `stringSlice`
    fn type_name(&self) -> String;

    /// True if the flag may be given without an argument, like a switch
    fn is_bool_flag(&self) -> bool {
        false
    }

    /// True if repeated occurrences accumulate rather than overwrite
    fn is_cumulative(&self) -> bool {
        false
    }
}

impl<V: Value + ?Sized> Value for &mut V {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        (**self).set(raw)
    }
    fn render(&self) -> String {
        (**self).render()
    }
    fn type_name(&self) -> String {
        (**self).type_name()
    }
    fn is_bool_flag(&self) -> bool {
        (**self).is_bool_flag()
    }
    fn is_cumulative(&self) -> bool {
        (**self).is_cumulative()
    }
}

impl<V: Value + ?Sized> Value for Box<V> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        (**self).set(raw)
    }
    fn render(&self) -> String {
        (**self).render()
    }
    fn type_name(&self) -> String {
        (**self).type_name()
    }
    fn is_bool_flag(&self) -> bool {
        (**self).is_bool_flag()
    }
    fn is_cumulative(&self) -> bool {
        (**self).is_cumulative()
    }
}

/// What a field turns into when the walker reaches it
pub enum Bound<'a> {
    /// A leaf: the field becomes one flag
    Value(Box<dyn Value + 'a>),
    /// A nested struct: its fields are walked in turn
    Struct(&'a mut (dyn Flags + 'a)),
    /// Neither, the field is skipped
    Unsupported,
}

/// Implemented by every type which may appear as a field of a `#[derive(Flags)]` struct.
///
/// The crate implements it for the built-in value kinds, `Option<T>`, `Box<T>` and
/// `Option<Regex>`. The derive implements it for the struct itself. For a custom [`Value`] type,
/// use [`value_field!`](crate::value_field).
///
/// Fields whose type doesn't implement it are skipped by the walk.
pub trait Field {
    /// Borrow this field for the duration of a walk.
    ///
    /// This may modify the field, e.g. an absent `Option<T>` becomes `Some(T::absent())`, so that
    /// it has storage which later parsing can write to.
    fn bind(&mut self) -> Bound<'_>;

    /// What an absent `Option<Self>` is filled with when it is walked.
    ///
    /// `None` means there is nothing sensible to start from, and an absent `Option<Self>` is
    /// skipped. The derive and [`value_field!`](crate::value_field) use `Default` when the type
    /// has it.
    fn absent() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// Picks `Some(T::default())` for types with `Default`, and `None` for the rest.
///
/// Generated code calls `(&Absent::<T>::new()).__absent()` with both absent traits in scope, for a
/// concrete `T`. [`AbsentDefault`] wins when it applies, otherwise [`AbsentNone`] is reached
/// through one more autoref.
#[doc(hidden)]
pub struct Absent<T>(PhantomData<T>);

impl<T> Absent<T> {
    /// Make the dispatcher
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

#[doc(hidden)]
pub trait AbsentDefault<T> {
    /// The value an absent option is filled with
    fn __absent(&self) -> Option<T>;
}

impl<T: Default> AbsentDefault<T> for Absent<T> {
    fn __absent(&self) -> Option<T> {
        Some(T::default())
    }
}

#[doc(hidden)]
pub trait AbsentNone<T> {
    /// The value an absent option is filled with
    fn __absent(&self) -> Option<T>;
}

impl<T> AbsentNone<T> for &Absent<T> {
    fn __absent(&self) -> Option<T> {
        None
    }
}

/// Implement [`Field`] for types which implement [`Value`] themselves.
///
/// ```ignore
/// struct Level(u8);
/// impl structflags::Value for Level { ... }
/// structflags::value_field!(Level);
/// ```
#[macro_export]
macro_rules! value_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Field for $ty {
                fn bind(&mut self) -> $crate::Bound<'_> {
                    $crate::Bound::Value(::std::boxed::Box::new(self))
                }

                fn absent() -> ::core::option::Option<Self> {
                    #[allow(unused_imports)]
                    use $crate::__private::{AbsentDefault as _, AbsentNone as _};
                    (&$crate::__private::Absent::<Self>::new()).__absent()
                }
            }
        )*
    };
}

impl<T: Field> Field for Option<T> {
    fn bind(&mut self) -> Bound<'_> {
        if self.is_none() {
            *self = T::absent();
            tracing::debug!(
                type_name = std::any::type_name::<T>(),
                materialized = self.is_some(),
                "binding absent field"
            );
        }
        match self {
            Some(inner) => inner.bind(),
            None => Bound::Unsupported,
        }
    }
}

impl<T: Field + ?Sized> Field for Box<T> {
    fn bind(&mut self) -> Bound<'_> {
        (**self).bind()
    }
}

impl<T: ?Sized> Field for PhantomData<T> {
    fn bind(&mut self) -> Bound<'_> {
        Bound::Unsupported
    }
}
