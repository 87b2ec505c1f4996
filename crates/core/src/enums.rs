//! Closed enums with a protocol ordinal and a persistent name.

use crate::error::{CodecError, CodecResult};
use crate::tag::{self, TagSerializer};

/// An enum sent as its ordinal on the network and stored by name in tags.
pub trait ProtocolEnum: Copy + Send + Sync + 'static {
    /// Label used in error messages.
    const KIND: &'static str;

    /// All variants in ordinal order.
    fn values() -> &'static [Self];

    /// Lowercase persistent name.
    fn name(self) -> &'static str;

    /// Position in [`ProtocolEnum::values`].
    fn ordinal(self) -> i32;

    /// Variant for an ordinal.
    fn from_ordinal(ordinal: i32) -> CodecResult<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::values().get(index).copied())
            .ok_or(CodecError::InvalidDiscriminant {
                kind: Self::KIND,
                value: ordinal,
            })
    }

    /// Variant for a persistent name.
    fn from_name(name: &str) -> CodecResult<Self> {
        Self::values()
            .iter()
            .copied()
            .find(|value| value.name() == name)
            .ok_or_else(|| CodecError::UnknownName {
                kind: Self::KIND,
                value: name.to_string(),
            })
    }
}

/// Tag serializer storing a [`ProtocolEnum`] by name.
pub fn named<E: ProtocolEnum>() -> TagSerializer<E> {
    tag::string().try_map(|name| E::from_name(&name), |value: &E| value.name().to_string())
}

/// Declare a fieldless enum implementing [`ProtocolEnum`].
///
/// Variants are listed in protocol order with their persistent names.
#[macro_export]
macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::ProtocolEnum for $name {
            const KIND: &'static str = $kind;

            fn values() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn ordinal(self) -> i32 {
                self as i32
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    protocol_enum! {
        /// Test enum.
        enum Fruit("fruit") {
            Apple => "apple",
            Pear => "pear",
        }
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        assert_eq!(Fruit::Apple.ordinal(), 0);
        assert_eq!(Fruit::from_ordinal(1).unwrap(), Fruit::Pear);
        assert!(matches!(
            Fruit::from_ordinal(2),
            Err(CodecError::InvalidDiscriminant { kind: "fruit", value: 2 })
        ));
        assert!(Fruit::from_ordinal(-1).is_err());
    }

    #[test]
    fn names_round_trip_through_tags() {
        let serializer = named::<Fruit>();
        assert_eq!(serializer.write(&Fruit::Pear), Tag::String("pear".into()));
        assert_eq!(serializer.read(&Tag::String("apple".into())).unwrap(), Fruit::Apple);
        assert!(serializer.read(&Tag::String("plum".into())).is_err());
    }
}
