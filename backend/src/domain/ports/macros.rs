//! Defines helper macros for generating domain port error enums.
//!
//! Every variant names the [`ErrorKind`](crate::domain::ErrorKind) it
//! classifies as, so callers branch on a discriminant instead of comparing
//! message text.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    [$kind:ident] => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Classification of this failure in the fixed error taxonomy.
            pub fn kind(&self) -> $crate::domain::ErrorKind {
                match self {
                    $( Self::$variant { .. } => $crate::domain::ErrorKind::$kind, )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::ErrorKind;

    define_port_error! {
        pub enum ExamplePortError {
            Missing [ConfigurationError] => "credential missing",
            Refused { message: String } [UpstreamUnavailable] => "refused: {message}",
            Rejected { status: u16, message: String } [UpstreamError] =>
                "rejected with {status}: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        let err = ExamplePortError::missing();
        assert_eq!(err.to_string(), "credential missing");
        assert_eq!(err.kind(), ErrorKind::ConfigurationError);
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::refused("connection reset");
        assert_eq!(err.to_string(), "refused: connection reset");
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::rejected(503_u16, "maintenance");
        assert_eq!(err.to_string(), "rejected with 503: maintenance");
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
    }
}
