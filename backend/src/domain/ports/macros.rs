//! `define_port_error!` builds a port error enum together with one
//! snake_case constructor per variant. String fields accept `impl Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum DeliveryPortError {
            Rejected { target: String } => "delivery to {target} rejected",
            Throttled { retry_after_secs: u64 } => "throttled for {retry_after_secs}s",
            Failed { target: String, attempts: u32 } => "delivery to {target} failed after {attempts} attempts",
            Closed => "channel closed",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = DeliveryPortError::rejected("ops@x.com");
        assert_eq!(err.to_string(), "delivery to ops@x.com rejected");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = DeliveryPortError::throttled(30_u64);
        assert_eq!(err, DeliveryPortError::Throttled { retry_after_secs: 30 });
    }

    #[test]
    fn mixed_fields_and_unit_variants_build() {
        assert_eq!(
            DeliveryPortError::failed("ops@x.com", 3_u32).to_string(),
            "delivery to ops@x.com failed after 3 attempts"
        );
        assert_eq!(DeliveryPortError::closed().to_string(), "channel closed");
    }
}
