//! Macros for reducing boilerplate when defining projection types
//!
//! These macros generate the field tables the shaping layer reads instead of
//! runtime introspection.

/// Declare the public field table of a projection type
///
/// Implements [`Shape`](crate::core::shape::Shape) and
/// [`Shapeable`](crate::core::shape::Shapeable) for `$type`. Each entry maps a
/// public (wire) field name to a struct field; the value is cloned and
/// converted with `FieldValue::from`, so every listed field must have a
/// `From` conversion into [`FieldValue`](crate::core::field::FieldValue).
///
/// Field order in the macro is the declaration order used when a client asks
/// for all fields.
///
/// # Example
///
/// ```rust,ignore
/// use course_library::prelude::*;
///
/// #[derive(Debug, Clone, Serialize)]
/// pub struct AuthorDto {
///     pub id: Uuid,
///     pub name: String,
///     pub age: i32,
///     pub main_category: String,
/// }
///
/// impl_shape!(AuthorDto, {
///     "id" => id,
///     "name" => name,
///     "age" => age,
///     "mainCategory" => main_category,
/// });
///
/// let record = dto.shape(Some("id,name"))?;
/// ```
#[macro_export]
macro_rules! impl_shape {
    (
        $type:ident,
        {
            $( $public_name:literal => $field:ident ),* $(,)?
        }
    ) => {
        impl $crate::core::shape::Shape for $type {
            fn type_name() -> &'static str {
                stringify!($type)
            }

            fn descriptors() -> &'static [$crate::core::field::FieldDescriptor<Self>] {
                const DESCRIPTORS: &[$crate::core::field::FieldDescriptor<$type>] = &[
                    $(
                        $crate::core::field::FieldDescriptor {
                            name: $public_name,
                            accessor: |source: &$type| {
                                $crate::core::field::FieldValue::from(source.$field.clone())
                            },
                        }
                    ),*
                ];
                DESCRIPTORS
            }
        }

        impl $crate::core::shape::Shapeable for $type {
            fn source_name(&self) -> &str {
                stringify!($type)
            }

            fn field_names(&self) -> Vec<&str> {
                <Self as $crate::core::shape::Shape>::descriptors()
                    .iter()
                    .map(|descriptor| descriptor.name)
                    .collect()
            }

            fn field_at(&self, position: usize) -> Option<$crate::core::field::FieldValue> {
                <Self as $crate::core::shape::Shape>::descriptors()
                    .get(position)
                    .map(|descriptor| descriptor.read(self))
            }
        }
    };
}

/// Build a [`PropertyMapping`](crate::core::mapping::PropertyMapping) from a
/// table of public names and storage columns
///
/// Prefix the column list with `revert` when ordering by the public field runs
/// opposite to ordering by the columns.
///
/// # Example
///
/// ```rust,ignore
/// let mapping = property_mapping! {
///     "Id" => ["Id"],
///     "Age" => revert ["DateOfBirth"],
///     "Name" => ["FirstName", "LastName"],
/// }?;
/// ```
#[macro_export]
macro_rules! property_mapping {
    (@value revert [ $( $column:literal ),* ]) => {
        $crate::core::mapping::PropertyMappingValue::reverted([ $( $column ),* ])
    };
    (@value [ $( $column:literal ),* ]) => {
        $crate::core::mapping::PropertyMappingValue::new([ $( $column ),* ])
    };
    ( $( $public_name:literal => $( $revert:ident )? [ $( $column:literal ),* $(,)? ] ),* $(,)? ) => {
        $crate::core::mapping::PropertyMapping::new([
            $(
                (
                    $public_name,
                    $crate::property_mapping!(@value $( $revert )? [ $( $column ),* ]),
                )
            ),*
        ])
    };
}
