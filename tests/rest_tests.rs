//! HTTP-level tests for the course library
//!
//! Every test runs against the full router built by `ServerBuilder` over a
//! seeded in-memory repository:
//! JSON → HTTP request → handler → repository → HTTP response → JSON.

use axum::http::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use course_library::core::extractors::{AcceptedMediaType, AuthorCreationKind};
use course_library::prelude::*;
use serde_json::{Value, json};

fn make_server() -> TestServer {
    let repository =
        InMemoryLibraryRepository::with_seed_data().expect("seed data should be valid");
    let app = ServerBuilder::new()
        .with_repository(repository)
        .register_module(CatalogModule)
        .expect("catalog module should register")
        .build()
        .expect("router should build");
    TestServer::new(app)
}

fn pagination(response: &axum_test::TestResponse) -> PaginationMeta {
    let header = response.header("x-pagination");
    serde_json::from_slice(header.as_bytes()).expect("X-Pagination should be JSON")
}

fn rels(links: &Value) -> Vec<&str> {
    links
        .as_array()
        .expect("links should be an array")
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect()
}

/// Id of the first author in the default (name) order
async fn first_author_id(server: &TestServer) -> String {
    let response = server.get("/api/authors").await;
    let body: Value = response.json();
    body["value"][0]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = make_server();

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "course-library");
        assert_eq!(
            body["entities"],
            json!(["author", "course", "author_collection"])
        );
    }
}

// =============================================================================
// Author list
// =============================================================================

mod author_list {
    use super::*;

    #[tokio::test]
    async fn test_default_listing_is_ordered_by_name() {
        let server = make_server();

        let response = server.get("/api/authors").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let names: Vec<&str> = body["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|author| author["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "Arnold The Unseen Stafford",
                "Berry Griffin Beak Eldritch",
                "Eli Ivory Bones Sweet",
                "Nancy Swashbuckler Rye",
                "Rushing Buttler",
                "Seabury Toxic Reyson",
            ]
        );
    }

    #[tokio::test]
    async fn test_pagination_header() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("pageNumber", "2")
            .add_query_param("pageSize", "2")
            .await;
        response.assert_status_ok();

        assert_eq!(
            pagination(&response),
            PaginationMeta {
                total_count: 6,
                page_size: 2,
                current_page: 2,
                total_pages: 3,
            }
        );

        let body: Value = response.json();
        assert_eq!(body["value"].as_array().unwrap().len(), 2);
        assert_eq!(body["value"][0]["name"], "Eli Ivory Bones Sweet");
    }

    #[tokio::test]
    async fn test_collection_links() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("pageNumber", "2")
            .add_query_param("pageSize", "2")
            .await;
        let body: Value = response.json();

        assert_eq!(rels(&body["links"]), ["self", "next-page", "previous-page"]);

        let next = body["links"][1]["href"].as_str().unwrap();
        let previous = body["links"][2]["href"].as_str().unwrap();
        assert!(next.starts_with("http://localhost:3000/api/authors?"));
        assert!(next.contains("pageNumber=3"));
        assert!(next.contains("pageSize=2"));
        assert!(previous.contains("pageNumber=1"));
    }

    #[tokio::test]
    async fn test_first_page_has_no_previous_link() {
        let server = make_server();

        let response = server.get("/api/authors").await;
        let body: Value = response.json();

        assert_eq!(rels(&body["links"]), ["self"]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("pageNumber", "9")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert!(body["value"].as_array().unwrap().is_empty());
        assert_eq!(pagination(&response).total_count, 6);
    }

    #[tokio::test]
    async fn test_page_size_is_clamped() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("pageSize", "500")
            .await;
        assert_eq!(pagination(&response).page_size, 20);
    }

    #[tokio::test]
    async fn test_order_by_age_descending_lists_oldest_first() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("orderBy", "age desc")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["value"][0]["name"], "Berry Griffin Beak Eldritch");
        assert_eq!(body["value"][5]["name"], "Rushing Buttler");
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("orderBy", "parrot")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_SORT_EXPRESSION");
        assert_eq!(body["details"]["orderBy"], "parrot");
    }

    #[tokio::test]
    async fn test_fields_shape_each_item() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("fields", "name,id")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let first = body["value"][0].as_object().unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.contains_key("name") && first.contains_key("id"));
        assert_eq!(rels(&first["links"]).len(), 4);

        // requested order survives on the wire
        let text = response.text();
        let name_at = text.find("\"name\":").unwrap();
        let id_at = text.find("\"id\":").unwrap();
        assert!(name_at < id_at);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("fields", "id,parrot")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_FIELDS");
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let server = make_server();

        let response = server
            .get("/api/authors")
            .add_query_param("mainCategory", "rum")
            .await;
        assert_eq!(pagination(&response).total_count, 2);

        let response = server
            .get("/api/authors")
            .add_query_param("searchQuery", "sing")
            .await;
        assert_eq!(pagination(&response).total_count, 2);
    }

    #[tokio::test]
    async fn test_head_carries_pagination_header() {
        let server = make_server();

        let response = server.method(Method::HEAD, "/api/authors").await;
        response.assert_status_ok();
        assert_eq!(pagination(&response).total_count, 6);
    }

    #[tokio::test]
    async fn test_options_lists_allowed_methods() {
        let server = make_server();

        let response = server.method(Method::OPTIONS, "/api/authors").await;
        response.assert_status_ok();
        assert_eq!(response.header("allow"), "GET,OPTIONS,POST");
    }
}

// =============================================================================
// Single author
// =============================================================================

mod single_author {
    use super::*;

    #[tokio::test]
    async fn test_plain_json_has_no_links() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server.get(&format!("/api/authors/{id}")).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["id"], id);
        assert_eq!(body["name"], "Arnold The Unseen Stafford");
        assert!(body.get("links").is_none());
    }

    #[tokio::test]
    async fn test_hateoas_media_type_adds_links() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_query_param("fields", "id,name")
            .add_header(ACCEPT, HeaderValue::from_static(AcceptedMediaType::HATEOAS))
            .await;
        response.assert_status_ok();
        assert_eq!(response.header(CONTENT_TYPE), AcceptedMediaType::HATEOAS);

        let body: Value = response.json();
        assert_eq!(
            rels(&body["links"]),
            ["self", "delete_author", "create_course_for_author", "courses"]
        );
        let self_href = body["links"][0]["href"].as_str().unwrap();
        assert!(self_href.contains(&id));
        assert!(self_href.contains("fields=id"));
    }

    #[tokio::test]
    async fn test_full_representation() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_header(ACCEPT, HeaderValue::from_static(AcceptedMediaType::AUTHOR_FULL))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["firstName"], "Arnold");
        assert_eq!(body["lastName"], "The Unseen Stafford");
        assert!(body.get("age").is_none());
    }

    #[tokio::test]
    async fn test_fields_are_checked_against_the_selected_representation() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_query_param("fields", "firstName")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_query_param("fields", "firstName")
            .add_header(ACCEPT, HeaderValue::from_static(AcceptedMediaType::AUTHOR_FULL))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "firstName": "Arnold" }));
    }

    #[tokio::test]
    async fn test_unsupported_accept_is_406() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_header(ACCEPT, HeaderValue::from_static("application/xml"))
            .await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_malformed_accept_is_400() {
        let server = make_server();
        let id = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authors/{id}"))
            .add_header(ACCEPT, HeaderValue::from_static("not-a-media-type"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_author_is_404() {
        let server = make_server();

        let response = server
            .get(&format!("/api/authors/{}", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_id_is_400() {
        let server = make_server();

        let response = server.get("/api/authors/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Author creation and deletion
// =============================================================================

mod author_lifecycle {
    use super::*;

    fn author_payload() -> Value {
        json!({
            "firstName": "Jack",
            "lastName": "Sparrow",
            "dateOfBirth": "1690-06-09T00:00:00Z",
            "mainCategory": "Rum",
            "courses": [
                { "title": "Escaping Gallows", "description": "Talk your way out." }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_author_returns_201_with_location() {
        let server = make_server();

        let response = server.post("/api/authors").json(&author_payload()).await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let id = body["id"].as_str().unwrap();
        assert_eq!(body["name"], "Jack Sparrow");
        assert_eq!(rels(&body["links"]).len(), 4);

        let location = response.header(LOCATION);
        assert_eq!(
            location.to_str().unwrap(),
            format!("http://localhost:3000/api/authors/{id}")
        );

        let courses = server.get(&format!("/api/authors/{id}/courses")).await;
        courses.assert_status_ok();
        let courses: Value = courses.json();
        assert_eq!(courses.as_array().unwrap().len(), 1);
        assert_eq!(courses[0]["authorId"], id);
    }

    #[tokio::test]
    async fn test_create_author_with_date_of_death() {
        let server = make_server();

        let mut payload = author_payload();
        payload["dateOfDeath"] = json!("1730-06-08T00:00:00Z");

        let response = server
            .post("/api/authors")
            .content_type(AuthorCreationKind::WITH_DATE_OF_DEATH)
            .bytes(serde_json::to_vec(&payload).unwrap().into())
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["age"], 39);
    }

    #[tokio::test]
    async fn test_create_author_with_unsupported_content_type() {
        let server = make_server();

        let response = server
            .post("/api/authors")
            .content_type("text/csv")
            .bytes(serde_json::to_vec(&author_payload()).unwrap().into())
            .await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_create_author_validation_errors() {
        let server = make_server();

        let response = server
            .post("/api/authors")
            .json(&json!({
                "firstName": "  ",
                "lastName": "Sparrow",
                "dateOfBirth": "yesterday",
                "mainCategory": "Rum"
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["details"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|error| error["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"firstName"));
        assert!(fields.contains(&"dateOfBirth"));
    }

    #[tokio::test]
    async fn test_delete_author() {
        let server = make_server();
        let id = first_author_id(&server).await;

        server
            .delete(&format!("/api/authors/{id}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/authors/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/authors/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Courses
// =============================================================================

mod courses {
    use super::*;

    #[tokio::test]
    async fn test_course_lifecycle() {
        let server = make_server();
        let author_id = first_author_id(&server).await;
        let courses_path = format!("/api/authors/{author_id}/courses");

        let response = server
            .post(&courses_path)
            .json(&json!({ "title": "  Shanties  ", "description": "" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let course: Value = response.json();
        assert_eq!(course["title"], "Shanties");
        assert_eq!(course["description"], Value::Null);
        let course_id = course["id"].as_str().unwrap();

        let location = response.header(LOCATION);
        assert!(
            location
                .to_str()
                .unwrap()
                .ends_with(&format!("/api/authors/{author_id}/courses/{course_id}"))
        );

        server
            .get(&format!("{courses_path}/{course_id}"))
            .await
            .assert_status_ok();
        server
            .delete(&format!("{courses_path}/{course_id}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("{courses_path}/{course_id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_title_equal_to_description_is_422() {
        let server = make_server();
        let author_id = first_author_id(&server).await;

        let response = server
            .post(&format!("/api/authors/{author_id}/courses"))
            .json(&json!({ "title": "Rum", "description": "Rum" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_course() {
        let server = make_server();
        let author_id = first_author_id(&server).await;
        let courses_path = format!("/api/authors/{author_id}/courses");

        let created: Value = server
            .post(&courses_path)
            .json(&json!({ "title": "Shanties", "description": "Songs at sea" }))
            .await
            .json();
        let course_path = format!("{courses_path}/{}", created["id"].as_str().unwrap());

        server
            .put(&course_path)
            .json(&json!({ "title": "  Sea Shanties  " }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let course: Value = server.get(&course_path).await.json();
        assert_eq!(course["id"], created["id"]);
        assert_eq!(course["title"], "Sea Shanties");
        assert_eq!(course["description"], Value::Null);
    }

    #[tokio::test]
    async fn test_put_unknown_course_creates_it() {
        let server = make_server();
        let author_id = first_author_id(&server).await;
        let course_id = Uuid::new_v4();
        let course_path = format!("/api/authors/{author_id}/courses/{course_id}");

        let response = server
            .put(&course_path)
            .json(&json!({ "title": "Knots", "description": "Bowline first" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let location = response.header(LOCATION);
        assert!(location.to_str().unwrap().ends_with(&course_path));
        let body: Value = response.json();
        assert_eq!(body["id"], course_id.to_string());
        assert_eq!(body["authorId"], author_id);

        server.get(&course_path).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_put_invalid_course_is_422() {
        let server = make_server();
        let author_id = first_author_id(&server).await;

        let response = server
            .put(&format!("/api/authors/{author_id}/courses/{}", Uuid::new_v4()))
            .json(&json!({ "title": "x".repeat(101) }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_put_for_unknown_author_is_404() {
        let server = make_server();

        let response = server
            .put(&format!(
                "/api/authors/{}/courses/{}",
                Uuid::new_v4(),
                Uuid::new_v4()
            ))
            .json(&json!({ "title": "Knots" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_courses_of_unknown_author_is_404() {
        let server = make_server();

        let response = server
            .get(&format!("/api/authors/{}/courses", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Author collections
// =============================================================================

mod author_collections {
    use super::*;

    #[tokio::test]
    async fn test_create_then_fetch_collection() {
        let server = make_server();

        let response = server
            .post("/api/authorcollections")
            .json(&json!([
                {
                    "firstName": "Anne",
                    "lastName": "Bonny",
                    "dateOfBirth": "1697-03-08T00:00:00Z",
                    "mainCategory": "Ships"
                },
                {
                    "firstName": "Mary",
                    "lastName": "Read",
                    "dateOfBirth": "1685-01-01T00:00:00Z",
                    "mainCategory": "Ships"
                }
            ]))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: Value = response.json();
        let ids: Vec<&str> = created
            .as_array()
            .unwrap()
            .iter()
            .map(|author| author["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);

        let location = response.header(LOCATION);
        let location = location.to_str().unwrap();
        assert!(location.contains("/api/authorcollections/"));

        let fetched = server
            .get(&format!("/api/authorcollections/({})", ids.join(",")))
            .await;
        fetched.assert_status_ok();
        let fetched: Value = fetched.json();
        assert_eq!(fetched.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_collection_with_missing_id_is_404() {
        let server = make_server();
        let existing = first_author_id(&server).await;

        let response = server
            .get(&format!("/api/authorcollections/({existing},{})", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_COLLECTION_INCOMPLETE");
    }

    #[tokio::test]
    async fn test_collection_with_malformed_id_is_400() {
        let server = make_server();

        let response = server.get("/api/authorcollections/(nope)").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
