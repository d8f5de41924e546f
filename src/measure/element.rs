use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A single value inside an item.
///
/// Set based policies compare elements through [`Element::key`], numeric
/// policies through [`Element::to_real`]. A type may support only one of the
/// two, in which case `to_real` returns `None`.
pub trait Element {
    type Key: Eq + Hash;

    fn key(&self) -> Self::Key;

    fn to_real(&self) -> Option<f64>;
}

/// Canonical bit pattern for set membership of floats: `-0.0 == 0.0` and all NaNs are one value
fn real_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

macro_rules! impl_integer_element {
    [$( $t:ty ),*] => {
        $(
            impl Element for $t {
                type Key = $t;

                #[inline]
                fn key(&self) -> Self::Key {
                    *self
                }

                #[inline]
                fn to_real(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    }
}

impl_integer_element![i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize];

macro_rules! impl_float_element {
    [$( $t:ty ),*] => {
        $(
            impl Element for $t {
                type Key = u64;

                #[inline]
                fn key(&self) -> Self::Key {
                    real_key(*self as f64)
                }

                #[inline]
                fn to_real(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    }
}

impl_float_element![f32, f64];

impl Element for bool {
    type Key = bool;

    fn key(&self) -> Self::Key {
        *self
    }

    fn to_real(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl Element for char {
    type Key = char;

    fn key(&self) -> Self::Key {
        *self
    }

    fn to_real(&self) -> Option<f64> {
        None
    }
}

impl Element for String {
    type Key = String;

    fn key(&self) -> Self::Key {
        self.clone()
    }

    fn to_real(&self) -> Option<f64> {
        None
    }
}

impl<'a> Element for &'a str {
    type Key = &'a str;

    fn key(&self) -> Self::Key {
        *self
    }

    fn to_real(&self) -> Option<f64> {
        None
    }
}

/// Dynamically typed element, as found in JSON item lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

/// Set identity of an [`Atom`]. Integral reals and booleans share the integer key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomKey {
    Int(i64),
    Real(u64),
    Text(String),
}

impl Element for Atom {
    type Key = AtomKey;

    fn key(&self) -> Self::Key {
        match self {
            Atom::Bool(b) => AtomKey::Int(*b as i64),
            Atom::Int(i) => AtomKey::Int(*i),
            Atom::Real(x) => {
                let fits = x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64;
                if fits {
                    AtomKey::Int(*x as i64)
                } else {
                    AtomKey::Real(real_key(*x))
                }
            }
            Atom::Text(s) => AtomKey::Text(s.clone()),
        }
    }

    fn to_real(&self) -> Option<f64> {
        match self {
            Atom::Bool(b) => b.to_real(),
            Atom::Int(i) => Some(*i as f64),
            Atom::Real(x) => Some(*x),
            Atom::Text(_) => None,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Bool(b) => write!(f, "{}", b),
            Atom::Int(i) => write!(f, "{}", i),
            Atom::Real(x) => write!(f, "{}", x),
            Atom::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Atom {
    fn from(i: i64) -> Self {
        Atom::Int(i)
    }
}

impl From<f64> for Atom {
    fn from(x: f64) -> Self {
        Atom::Real(x)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zero_and_nan_collapse() {
        assert_eq!((-0.0_f64).key(), 0.0_f64.key());
        assert_eq!(f64::NAN.key(), (-f64::NAN).key());
        assert_ne!(1.0_f64.key(), 2.0_f64.key());
    }

    #[test]
    fn atom_numeric_keys_unify() {
        assert_eq!(Atom::Int(1).key(), Atom::Real(1.0).key());
        assert_eq!(Atom::Bool(true).key(), Atom::Int(1).key());
        assert_ne!(Atom::Real(1.5).key(), Atom::Int(1).key());
        assert_ne!(Atom::Text("1".into()).key(), Atom::Int(1).key());
    }

    #[test]
    fn atoms_from_literals() {
        let items = vec![
            vec![Atom::from(1_i64), Atom::from(2.0), Atom::from("x")],
            vec![Atom::from(2_i64), Atom::from("x")],
        ];
        assert_eq!(items[0][1], Atom::Real(2.0));
        assert_eq!(items[1][1], Atom::Text("x".into()));

        let m = crate::build_pairwise_matrix(&items, &crate::Policy::Named(crate::PolicyName::Jaccard))
            .unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0 / 3.0], vec![2.0 / 3.0, 1.0]]);
    }

    #[test]
    fn atom_deserializes_untagged() {
        let atoms: Vec<Atom> = serde_json::from_str(r#"[1, 2.5, "a", true]"#).unwrap();
        assert_eq!(
            atoms,
            vec![Atom::Int(1), Atom::Real(2.5), Atom::Text("a".into()), Atom::Bool(true)]
        );
    }

    #[test]
    fn text_is_not_numeric() {
        assert_eq!(Atom::Text("x".into()).to_real(), None);
        assert_eq!("x".to_real(), None);
        assert_eq!(Atom::Int(3).to_real(), Some(3.0));
        assert_eq!(7_u8.to_real(), Some(7.0));
    }
}
