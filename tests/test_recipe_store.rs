use recipe_site::{HttpSource, RecipeStore, SiteError};

const RECIPES_JSON: &str = r#"
{
    "recipes": [
        {
            "id": "masala-omelette",
            "title": "Masala Omelette",
            "description": "A spicy breakfast classic",
            "time": "15 mins",
            "difficulty": "Easy",
            "category": ["Breakfast", "Quick"],
            "ingredients": ["2 eggs", "1 onion", "1 green chilli"],
            "steps": ["Whisk the eggs", "Cook on a hot pan"],
            "image": "masala-omelette.jpg"
        },
        {
            "id": "dal-tadka",
            "title": "Dal Tadka",
            "time": "40 mins",
            "difficulty": "Medium",
            "category": ["Indian", "Vegetarian"],
            "ingredients": ["1 cup toor dal"],
            "steps": ["Pressure cook the dal", "Temper with ghee"]
        }
    ]
}
"#;

#[tokio::test]
async fn test_load_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/data/recipes.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECIPES_JSON)
        .create();

    let source = HttpSource::new(format!("{}/data/recipes.json", server.url()), None).unwrap();
    let store = RecipeStore::load(&source).await.unwrap();

    assert_eq!(store.len(), 2);
    let dal = store.find_by_id("dal-tadka").unwrap();
    assert_eq!(dal.title, "Dal Tadka");
    assert!(dal.description.is_none());
    assert!(store.find_by_id("paneer").is_none());
}

#[tokio::test]
async fn test_http_error_status_is_load_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/data/recipes.json")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let source = HttpSource::new(format!("{}/data/recipes.json", server.url()), None).unwrap();
    let result = RecipeStore::load(&source).await;

    match result {
        Err(SiteError::LoadFailure(message)) => assert!(message.contains("404")),
        other => panic!("expected load failure, got {:?}", other.map(|s| s.len())),
    }
}

#[tokio::test]
async fn test_malformed_json_is_load_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/data/recipes.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"recipes": [ {"id": "broken""#)
        .create();

    let source = HttpSource::new(format!("{}/data/recipes.json", server.url()), None).unwrap();
    let err = RecipeStore::load(&source).await.unwrap_err();
    assert!(err.is_load_failure());
}

#[tokio::test]
async fn test_missing_recipes_key_loads_empty() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/data/recipes.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version": 2}"#)
        .create();

    let source = HttpSource::new(format!("{}/data/recipes.json", server.url()), None).unwrap();
    let store = RecipeStore::load(&source).await.unwrap();
    assert!(store.is_empty());
    assert!(store.find_by_id("masala-omelette").is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_load_failure() {
    // Nothing listens on port 9 (discard) in test environments
    let source = HttpSource::new("http://127.0.0.1:9/data/recipes.json", None).unwrap();
    let err = RecipeStore::load(&source).await.unwrap_err();
    assert!(err.is_load_failure());
}
