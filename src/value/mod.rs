mod compound;
mod list;
mod ser;

pub use self::compound::Compound;
pub use self::list::{List, TypedIter, TypedIterMut};

use crate::error::{Error, Result};
use crate::Tag;

/// Value is a complete NBT value. It owns its data. Compounds and Lists hold
/// their children directly, so dropping a value drops everything below it.
///
/// The active variant is the only type information a value carries; see
/// [`Value::tag`]. There is no variant for [`Tag::End`], which only exists on
/// the wire.
///
/// Equality is structural: same variant and equal payloads. Floats compare
/// with `==`, so a value holding NaN is not equal to itself.
///
/// ```
/// # use nbtree::{Value, Tag};
/// let v = Value::from(42);
/// assert_eq!(v.tag(), Tag::Int);
/// assert_eq!(v.as_int().unwrap(), 42);
/// assert!(v.as_long().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

mod private {
    // Only this crate can implement this trait. Other traits can inherit from
    // Sealed in order to prevent other crates from creating implementations.
    pub trait Sealed {}
}

/// The payload held by one variant of [`Value`]. Lets the generic accessors
/// such as [`Value::try_as`], [`Compound::get_as`] and [`List::iter_as`] be
/// told which variant to expect by type.
///
/// | Type | Variant |
/// | ---- | ------- |
/// | `i8` | [`Value::Byte`] |
/// | `i16` | [`Value::Short`] |
/// | `i32` | [`Value::Int`] |
/// | `i64` | [`Value::Long`] |
/// | `f32` | [`Value::Float`] |
/// | `f64` | [`Value::Double`] |
/// | `Vec<i8>` | [`Value::ByteArray`] |
/// | `String` | [`Value::String`] |
/// | [`List`] | [`Value::List`] |
/// | [`Compound`] | [`Value::Compound`] |
/// | `Vec<i32>` | [`Value::IntArray`] |
/// | `Vec<i64>` | [`Value::LongArray`] |
pub trait Payload: private::Sealed + Sized {
    /// Tag of the variant holding this payload.
    const TAG: Tag;

    #[doc(hidden)]
    fn from_value(value: &Value) -> Option<&Self>;

    #[doc(hidden)]
    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

macro_rules! payload {
    ($type:ty, $variant:ident) => {
        impl private::Sealed for $type {}

        impl Payload for $type {
            const TAG: Tag = Tag::$variant;

            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}
payload!(i8, Byte);
payload!(i16, Short);
payload!(i32, Int);
payload!(i64, Long);
payload!(f32, Float);
payload!(f64, Double);
payload!(Vec<i8>, ByteArray);
payload!(String, String);
payload!(List, List);
payload!(Compound, Compound);
payload!(Vec<i32>, IntArray);
payload!(Vec<i64>, LongArray);

impl Value {
    /// The tag of the active variant.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    /// Borrow the payload as `T`, failing with a type mismatch if this value
    /// is a different variant.
    ///
    /// ```
    /// # use nbtree::Value;
    /// let v = Value::from("hello");
    /// assert_eq!(v.try_as::<String>().unwrap(), "hello");
    /// assert!(v.try_as::<i32>().unwrap_err().is_type_mismatch());
    /// ```
    pub fn try_as<T: Payload>(&self) -> Result<&T> {
        T::from_value(self).ok_or_else(|| Error::type_mismatch(T::TAG, self.tag()))
    }

    /// Mutably borrow the payload as `T`. Only the payload can be changed,
    /// never the variant.
    pub fn try_as_mut<T: Payload>(&mut self) -> Result<&mut T> {
        let found = self.tag();
        T::from_value_mut(self).ok_or_else(|| Error::type_mismatch(T::TAG, found))
    }

    pub fn as_byte(&self) -> Result<i8> {
        self.try_as::<i8>().copied()
    }

    pub fn as_short(&self) -> Result<i16> {
        self.try_as::<i16>().copied()
    }

    pub fn as_int(&self) -> Result<i32> {
        self.try_as::<i32>().copied()
    }

    pub fn as_long(&self) -> Result<i64> {
        self.try_as::<i64>().copied()
    }

    pub fn as_float(&self) -> Result<f32> {
        self.try_as::<f32>().copied()
    }

    pub fn as_double(&self) -> Result<f64> {
        self.try_as::<f64>().copied()
    }

    pub fn as_byte_array(&self) -> Result<&[i8]> {
        self.try_as::<Vec<i8>>().map(Vec::as_slice)
    }

    pub fn as_int_array(&self) -> Result<&[i32]> {
        self.try_as::<Vec<i32>>().map(Vec::as_slice)
    }

    pub fn as_long_array(&self) -> Result<&[i64]> {
        self.try_as::<Vec<i64>>().map(Vec::as_slice)
    }

    pub fn as_str(&self) -> Result<&str> {
        self.try_as::<String>().map(String::as_str)
    }

    pub fn as_list(&self) -> Result<&List> {
        self.try_as()
    }

    pub fn as_list_mut(&mut self) -> Result<&mut List> {
        self.try_as_mut()
    }

    pub fn as_compound(&self) -> Result<&Compound> {
        self.try_as()
    }

    pub fn as_compound_mut(&mut self) -> Result<&mut Compound> {
        self.try_as_mut()
    }

    pub fn into_list(self) -> Result<List> {
        match self {
            Value::List(list) => Ok(list),
            other => Err(Error::type_mismatch(Tag::List, other.tag())),
        }
    }

    pub fn into_compound(self) -> Result<Compound> {
        match self {
            Value::Compound(compound) => Ok(compound),
            other => Err(Error::type_mismatch(Tag::Compound, other.tag())),
        }
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

#[cfg(feature = "arbitrary1")]
fn arb_list(u: &mut arbitrary::Unstructured) -> arbitrary::Result<List> {
    let tag = match u.arbitrary::<Tag>()? {
        Tag::End => return Ok(List::new()),
        tag => tag,
    };

    let len = u.arbitrary_len::<Value>()?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(arb_value(u, tag)?);
    }
    Ok(List::from_parts(tag, items))
}

#[cfg(feature = "arbitrary1")]
fn arb_value(u: &mut arbitrary::Unstructured, tag: Tag) -> arbitrary::Result<Value> {
    Ok(match tag {
        Tag::End => return Err(arbitrary::Error::IncorrectFormat),
        Tag::Byte => Value::Byte(u.arbitrary()?),
        Tag::Short => Value::Short(u.arbitrary()?),
        Tag::Int => Value::Int(u.arbitrary()?),
        Tag::Long => Value::Long(u.arbitrary()?),
        Tag::Float => Value::Float(u.arbitrary()?),
        Tag::Double => Value::Double(u.arbitrary()?),
        Tag::ByteArray => Value::ByteArray(u.arbitrary()?),
        Tag::String => Value::String(u.arbitrary()?),
        Tag::IntArray => Value::IntArray(u.arbitrary()?),
        Tag::LongArray => Value::LongArray(u.arbitrary()?),
        Tag::Compound => Value::Compound(u.arbitrary()?),

        // Lists need to all be the same type.
        Tag::List => Value::List(arb_list(u)?),
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        match u.arbitrary::<Tag>()? {
            Tag::End => Err(arbitrary::Error::IncorrectFormat),
            tag => arb_value(u, tag),
        }
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Compound {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary_iter::<(String, Value)>()?.collect()
    }
}
