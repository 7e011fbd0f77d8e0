//! Macros for reducing boilerplate when defining admin records
//!
//! These macros generate the record struct, its typed field enum and the
//! [`Record`](crate::core::entity::Record) implementation for each entity
//! type, so every table gets compile-time checked field names.

/// Declare a status enum stored as a snake_case string
///
/// Generates the enum with serde renames, `ALL`, `as_str`, `Display`,
/// `FromStr` and a [`ToFieldValue`](crate::core::field::ToFieldValue)
/// implementation. The first variant is the default.
///
/// # Example
/// ```rust,ignore
/// status_enum!(
///     /// Lifecycle of a bill
///     BillStatus {
///         Pending => "pending",
///         Paid => "paid",
///     }
/// );
///
/// assert_eq!(BillStatus::Paid.as_str(), "paid");
/// ```
#[macro_export]
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_label:literal
            $(, $variant:ident => $label:literal )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            #[default]
            #[serde(rename = $first_label)]
            $first,
            $(
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            /// The stored string form
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $( $name::$variant => $label, )*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $first_label => Ok($name::$first),
                    $( $label => Ok($name::$variant), )*
                    other => Err(format!("unknown {} '{}'", stringify!($name), other)),
                }
            }
        }

        impl $crate::core::field::ToFieldValue for $name {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                $crate::core::field::FieldValue::String(self.as_str().to_string())
            }
        }
    };
}

/// Declare an admin record with its field enum and `Record` implementation
///
/// Each member is listed as `name: Type => Variant`; the member name is the
/// backend column name and the variant is its key in the generated field
/// enum. Members keep their declaration order, which is also the CSV column
/// order. The struct must have an `id` member.
///
/// Optional trailing sections:
/// - `search: [Variant, ...]` default free-text search fields
/// - `date: Variant` field used by the date range filter
/// - `status: |record| expr` status label (`&str`) for the status filter
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(
///     /// A recurring bill
///     Bill, "bills", "bill", BillField,
///     {
///         id: Uuid => Id,
///         name: String => Name,
///         amount: f64 => Amount,
///         status: BillStatus => Status,
///         created_at: DateTime<Utc> => CreatedAt,
///     },
///     search: [Name, Status],
///     date: CreatedAt,
///     status: |bill| bill.status.as_str()
/// );
///
/// assert_eq!(BillField::from_name("amount"), Some(BillField::Amount));
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident, $plural:literal, $singular:literal, $field_enum:ident,
        {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $field_type:ty => $variant:ident
            ),+ $(,)?
        }
        $(, search: [ $( $search:ident ),* $(,)? ] )?
        $(, date: $date:ident )?
        $(, status: |$record:ident| $status:expr )?
        $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            $(
                $(#[$field_meta])*
                pub $field: $field_type,
            )+
        }

        #[doc = concat!("Typed columns of [`", stringify!($type), "`]")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $field_enum {
            $( $variant, )+
        }

        impl $crate::core::entity::FieldKey for $field_enum {
            fn all() -> &'static [Self] {
                &[ $( $field_enum::$variant ),+ ]
            }

            fn name(&self) -> &'static str {
                match self {
                    $( $field_enum::$variant => stringify!($field), )+
                }
            }
        }

        impl $crate::core::entity::Record for $type {
            type Id = ::uuid::Uuid;
            type Field = $field_enum;

            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: $field_enum) -> $crate::core::field::FieldValue {
                use $crate::core::field::ToFieldValue;
                match field {
                    $( $field_enum::$variant => self.$field.to_field_value(), )+
                }
            }

            $(
                fn search_fields() -> &'static [$field_enum] {
                    &[ $( $field_enum::$search ),* ]
                }
            )?

            $(
                fn date_field() -> Option<$field_enum> {
                    Some($field_enum::$date)
                }
            )?

            $(
                fn status(&self) -> Option<::std::borrow::Cow<'_, str>> {
                    let $record = self;
                    Some(::std::borrow::Cow::Borrowed($status))
                }
            )?
        }
    };
}
