//! Helper macro for generating port error enums.
//!
//! Each variant declares its display message and the [`ErrorCode`] it maps to
//! when it crosses into the domain. The macro derives `thiserror::Error`,
//! emits snake-case constructors whose string fields accept `impl Into`, and
//! implements `From<PortError> for Error`.
//!
//! [`ErrorCode`]: crate::domain::ErrorCode

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:literal as $code:ident
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

            /// Domain error code this failure surfaces as.
            pub fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $( Self::$variant { .. } => $crate::domain::ErrorCode::$code, )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(err: $name) -> Self {
                $crate::domain::Error::new(err.code(), err.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum ExamplePortError {
            Offline { message: String } => "store offline: {message}" as ServiceUnavailable,
            Missing { id: u32 } => "row {id} missing" as NotFound,
            Both { message: String, id: u32 } => "{message} ({id})" as InternalError,
            Duplicate => "duplicate row" as Conflict,
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::offline("refused");
        assert_eq!(err.to_string(), "store offline: refused");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn constructors_support_mixed_and_unit_variants() {
        assert_eq!(ExamplePortError::both("boom", 7_u32).to_string(), "boom (7)");
        assert_eq!(ExamplePortError::duplicate().code(), ErrorCode::Conflict);
    }

    #[test]
    fn converts_into_domain_error_with_declared_code() {
        let err: Error = ExamplePortError::missing(3_u32).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "row 3 missing");
    }
}
