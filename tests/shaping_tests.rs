//! Tests for the shaping pipeline from outside the crate
//!
//! These tests verify that:
//! - Projection tables declared with `impl_shape!` shape like the built-in DTOs
//! - Property mappings declared with `property_mapping!` drive sorting
//! - Pagination and sorting compose over a repository

use course_library::core::error::{MappingError, ShapingError};
use course_library::prelude::*;
use course_library::storage::InMemoryLibraryRepository;

#[derive(Debug, Clone)]
struct ShipDto {
    name: String,
    guns: i32,
    sunk: bool,
}

impl_shape!(ShipDto, {
    "name" => name,
    "guns" => guns,
    "sunk" => sunk,
});

struct Ship;

fn fleet() -> Vec<ShipDto> {
    vec![
        ShipDto {
            name: "Black Pearl".to_string(),
            guns: 32,
            sunk: false,
        },
        ShipDto {
            name: "Queen Anne's Revenge".to_string(),
            guns: 40,
            sunk: true,
        },
    ]
}

mod shaping {
    use super::*;

    #[test]
    fn test_custom_projection_shapes_all_fields_in_declaration_order() {
        let record = fleet()[0].shape(None).unwrap();
        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "guns", "sunk"]);
    }

    #[test]
    fn test_field_names_ignore_case_and_keep_request_order() {
        let record = fleet()[1].shape(Some(" SUNK , Name ")).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "sunk": true, "name": "Queen Anne's Revenge" })
        );
    }

    #[test]
    fn test_has_fields_for_custom_projection() {
        assert!(has_fields::<ShipDto>("guns,name"));
        assert!(has_fields::<ShipDto>(""));
        assert!(!has_fields::<ShipDto>("guns,crew"));
    }

    #[test]
    fn test_shape_many_rejects_unknown_field() {
        let err = shape_many(Some(fleet().as_slice()), Some("crew")).unwrap_err();
        assert!(matches!(err, ShapingError::UnknownField { .. }));
    }

    #[test]
    fn test_shape_many_of_nothing_is_empty_even_for_unknown_fields() {
        let empty: Vec<ShipDto> = Vec::new();
        let shaped = shape_many(Some(empty.as_slice()), Some("crew")).unwrap();
        assert!(shaped.is_empty());
    }

    #[test]
    fn test_absent_source_is_an_error() {
        let err = shape_one::<ShipDto>(None, None).unwrap_err();
        assert!(matches!(err, ShapingError::NullSource { .. }));
    }

    #[test]
    fn test_reshaping_a_shaped_record() {
        let record = fleet()[0].shape(Some("name,guns")).unwrap();
        let narrowed = record.shape(Some("guns")).unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed.get("GUNS").and_then(FieldValue::as_integer), Some(32));
    }
}

mod mapping {
    use super::*;

    fn registry() -> PropertyMappingRegistry {
        let mapping = property_mapping! {
            "Name" => ["Name"],
            "Firepower" => revert ["Guns"],
        }
        .unwrap();

        let mut builder = PropertyMappingRegistry::builder();
        builder.register::<ShipDto, Ship>(mapping);
        builder.build()
    }

    #[test]
    fn test_registered_pair_is_found() {
        let registry = registry();
        let mapping = registry.get_mapping::<ShipDto, Ship>().unwrap();
        assert!(mapping.contains("firepower"));
    }

    #[test]
    fn test_reversed_pair_is_not_found() {
        let registry = registry();
        let err = registry.get_mapping::<Ship, ShipDto>().unwrap_err();
        assert!(matches!(err, MappingError::NotFound { .. }));
    }

    #[test]
    fn test_sort_gate() {
        let registry = registry();
        assert!(registry.valid_mapping_exists_for::<ShipDto, Ship>("").unwrap());
        assert!(
            registry
                .valid_mapping_exists_for::<ShipDto, Ship>("firepower desc, name")
                .unwrap()
        );
        assert!(
            !registry
                .valid_mapping_exists_for::<ShipDto, Ship>("crew")
                .unwrap()
        );
    }

    #[test]
    fn test_reverted_mapping_flips_direction() {
        let registry = registry();
        let mapping = registry.get_mapping::<ShipDto, Ship>().unwrap();

        let ordering = translate("firepower desc, name", mapping);
        let clauses: Vec<(String, bool)> = ordering
            .clauses()
            .iter()
            .map(|clause| (clause.field.clone(), clause.descending))
            .collect();
        assert_eq!(
            clauses,
            [("Guns".to_string(), false), ("Name".to_string(), false)]
        );
    }
}

mod paging {
    use super::*;

    #[test]
    fn test_paginate_custom_items() {
        let page = paginate(fleet(), 2, 1);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items()[0].name, "Queen Anne's Revenge");
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_sorted_repository_page() {
        let repository = InMemoryLibraryRepository::with_seed_data().unwrap();
        let mapping = course_library::entities::author::author_property_mapping().unwrap();
        let ordering = translate("mainCategory, name desc", &mapping);

        let page = tokio_test::block_on(repository.get_author_page(
            &AuthorFilter::default(),
            &ordering,
            1,
            3,
        ))
        .unwrap();

        let names: Vec<String> = page.items().iter().map(Author::name).collect();
        assert_eq!(
            names,
            [
                "Seabury Toxic Reyson",
                "Rushing Buttler",
                "Nancy Swashbuckler Rye",
            ]
        );
        assert_eq!(page.metadata().total_pages, 2);
    }
}
