// Adapted from the json! macro in serde_json
// https://github.com/serde-rs/json/blob/829175e6069fb16672875f125f6afdd7c6da1dec/src/macros.rs#L60-L303
//
// The source uses the MIT license, which is repeated here:
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

/// Build a [`Value`][`crate::Value`] with JSON-like syntax.
///
/// ```rust
/// use nbtree::{nbt, Tag};
///
/// let level = nbt!({
///     "name": "Bananrama",
///     "version": 19133,
///     "spawn": [0i64, 64i64, 0i64],
///     "hardcore": false,
/// });
///
/// let level = level.as_compound().unwrap();
/// let keys: Vec<&str> = level.keys().collect();
/// assert_eq!(keys, ["name", "version", "spawn", "hardcore"]);
/// assert_eq!(level.get_as::<i32>("version").unwrap(), &19133);
/// assert_eq!(level.get_as::<nbtree::List>("spawn").unwrap().element_tag(), Tag::Long);
/// ```
///
/// Compound keys must be quoted strings or parenthesised expressions, and
/// entries keep the order they are written in. Leaf values go through
/// `Value::from`, so an unsuffixed integer is an `Int` and `true`/`false` are
/// bytes.
///
/// Arrays use [SNBT](https://minecraft.wiki/w/NBT_format#SNBT_format) syntax:
///
/// ```rust
/// # use nbtree::nbt;
/// let arrays = nbt!({
///     "bytes": [B; 1, 2, 3],
///     "ints": [I; 1, 2, 3],
///     "longs": [L; 1, 2, 3],
/// });
/// # assert_eq!(arrays.as_compound().unwrap().get("longs").unwrap().as_long_array().unwrap(), &[1, 2, 3]);
/// ```
///
/// # Panics
///
/// A list literal whose elements are not all of the same kind, such as
/// `nbt!([1, "two"])`, panics.
#[macro_export(local_inner_macros)]
macro_rules! nbt {
    ($($nbt:tt)+) => {
        nbt_internal!($($nbt)+)
    };
}

#[macro_export(local_inner_macros)]
#[doc(hidden)]
macro_rules! nbt_internal {
    //////////////////////////////////////////////////////////////////////////
    // Elements of a list [...], each turned into a Value.
    //
    // Must be invoked as: nbt_internal!(@list [] $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    (@list [$($elems:expr,)*]) => {
        nbt_internal_vec![$($elems,)*]
    };

    (@list [$($elems:expr),*]) => {
        nbt_internal_vec![$($elems),*]
    };

    (@list [$($elems:expr,)*] [$($inner:tt)*] $($rest:tt)*) => {
        nbt_internal!(@list [$($elems,)* nbt_internal!([$($inner)*])] $($rest)*)
    };

    (@list [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        nbt_internal!(@list [$($elems,)* nbt_internal!({$($map)*})] $($rest)*)
    };

    (@list [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        nbt_internal!(@list [$($elems,)* nbt_internal!($next),] $($rest)*)
    };

    (@list [$($elems:expr,)*] $last:expr) => {
        nbt_internal!(@list [$($elems,)* nbt_internal!($last)])
    };

    (@list [$($elems:expr),*] , $($rest:tt)*) => {
        nbt_internal!(@list [$($elems,)*] $($rest)*)
    };

    (@list [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        nbt_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////////
    // Elements of an array [B; ...], [I; ...] or [L; ...]. These stay plain
    // expressions so the element type comes from the array.
    //////////////////////////////////////////////////////////////////////////

    (@array [$($elems:expr,)*]) => {
        nbt_internal_vec![$($elems,)*]
    };

    (@array [$($elems:expr),*]) => {
        nbt_internal_vec![$($elems),*]
    };

    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        nbt_internal!(@array [$($elems,)* $next,] $($rest)*)
    };

    (@array [$($elems:expr,)*] $last:expr) => {
        nbt_internal!(@array [$($elems,)* $last])
    };

    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        nbt_internal!(@array [$($elems,)*] $($rest)*)
    };

    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        nbt_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////////
    // Entries of a compound {...}, inserted into the given variable in the
    // order written.
    //
    // Must be invoked as: nbt_internal!(@compound $c () ($($tt)*) ($($tt)*))
    //
    // The second copy of the input is only used to point errors at the
    // right token.
    //////////////////////////////////////////////////////////////////////////

    (@compound $c:ident () () ()) => {};

    (@compound $c:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $c.insert(($($key)+), $value);
        nbt_internal!(@compound $c () ($($rest)*) ($($rest)*));
    };

    (@compound $c:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        nbt_unexpected!($unexpected);
    };

    (@compound $c:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $c.insert(($($key)+), $value);
    };

    (@compound $c:ident ($($key:tt)+) (: [$($inner:tt)*] $($rest:tt)*) $copy:tt) => {
        nbt_internal!(@compound $c [$($key)+] (nbt_internal!([$($inner)*])) $($rest)*);
    };

    (@compound $c:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        nbt_internal!(@compound $c [$($key)+] (nbt_internal!({$($map)*})) $($rest)*);
    };

    (@compound $c:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        nbt_internal!(@compound $c [$($key)+] (nbt_internal!($value)) , $($rest)*);
    };

    (@compound $c:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        nbt_internal!(@compound $c [$($key)+] (nbt_internal!($value)));
    };

    // Key with a colon but no value.
    (@compound $c:ident ($($key:tt)+) (:) $copy:tt) => {
        nbt_internal!();
    };

    // Key with neither colon nor value.
    (@compound $c:ident ($($key:tt)+) () $copy:tt) => {
        nbt_internal!();
    };

    (@compound $c:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        nbt_unexpected!($colon);
    };

    (@compound $c:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        nbt_unexpected!($comma);
    };

    (@compound $c:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        nbt_internal!(@compound $c ($key) (: $($rest)*) (: $($rest)*));
    };

    (@compound $c:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        nbt_expect_expr_comma!($($unexpected)+);
    };

    // Munch one more token into the key.
    (@compound $c:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        nbt_internal!(@compound $c ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////////
    // Entry point.
    //////////////////////////////////////////////////////////////////////////

    ([B;]) => {
        $crate::Value::ByteArray(nbt_internal_vec![])
    };

    ([I;]) => {
        $crate::Value::IntArray(nbt_internal_vec![])
    };

    ([L;]) => {
        $crate::Value::LongArray(nbt_internal_vec![])
    };

    ([]) => {
        $crate::Value::List($crate::List::new())
    };

    ([B; $($tt:tt)+ ]) => {
        $crate::Value::ByteArray(nbt_internal!(@array [] $($tt)+))
    };

    ([I; $($tt:tt)+ ]) => {
        $crate::Value::IntArray(nbt_internal!(@array [] $($tt)+))
    };

    ([L; $($tt:tt)+ ]) => {
        $crate::Value::LongArray(nbt_internal!(@array [] $($tt)+))
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::List(
            <$crate::List as ::core::convert::TryFrom<_>>::try_from(
                nbt_internal!(@list [] $($tt)+)
            )
            .expect("nbt! list elements must all be the same kind"),
        )
    };

    ({}) => {
        $crate::Value::Compound($crate::Compound::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Compound({
            let mut compound = $crate::Compound::new();
            nbt_internal!(@compound compound () ($($tt)+) ($($tt)+));
            compound
        })
    };

    // Numbers, strings, bools, variables and anything else with a
    // From impl for Value.
    ($other:expr) => {
        <$crate::Value as ::core::convert::From<_>>::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! nbt_unexpected {
    () => {};
}

#[macro_export]
#[doc(hidden)]
macro_rules! nbt_expect_expr_comma {
    ($e:expr , $($tt:tt)*) => {};
}

// nbt_internal uses local_inner_macros, so a vec! written there would resolve
// to $crate::vec. Go through this one instead.
#[macro_export]
#[doc(hidden)]
macro_rules! nbt_internal_vec {
    ($($content:tt)*) => {
        vec![$($content)*]
    };
}
