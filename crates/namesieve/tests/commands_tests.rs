//! Command flow tests against a real cache directory

use std::fs;
use std::path::PathBuf;

use namesieve::commands;
use namesieve::Config;
use namesieve_core::service::{AddDatabaseRequest, FindRequest, FindResponse};
use pretty_assertions::assert_eq;
use serde_json::json;

fn config_in(dir: &std::path::Path) -> Config {
    Config::default().with_cache_dir(Some(dir.join("Caches")))
}

fn write(dir: &std::path::Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
    path
}

#[test]
fn test_add_then_find_writes_response_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let add_path = write(
        dir.path(),
        "add.json",
        json!({
            "databaseId": "db1",
            "database": [
                {"name": "Стол 10x5см", "id": 1},
                {"name": "Стул офисный", "id": 2}
            ]
        }),
    );
    let request: AddDatabaseRequest = commands::read_request(&add_path).unwrap();
    let mut searcher = commands::open_searcher(&config).unwrap();
    commands::add(&mut searcher, request).unwrap();
    assert!(dir.path().join("Caches").join("cache_db1.json").is_file());

    let find_path = write(
        dir.path(),
        "find.json",
        json!({
            "databaseId": "db1",
            "search": [{"name": "стол 50", "threshold": 60, "count": 5, "scorer": "default"}]
        }),
    );
    let request: FindRequest = commands::read_request(&find_path).unwrap();
    let searcher = commands::open_searcher(&config).unwrap();
    let response = commands::find(&searcher, &request).unwrap();

    let out = dir.path().join("response.json");
    commands::write_json(&response, Some(out.as_path()), &mut std::io::sink()).unwrap();

    let written: FindResponse =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, response);
    assert_eq!(written.response[0].search_name, "стол 50");
    assert_eq!(written.response[0].results[0].id, json!(1));
}

#[test]
fn test_find_unknown_database_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let searcher = commands::open_searcher(&config_in(dir.path())).unwrap();
    let request: FindRequest = serde_json::from_value(json!({
        "databaseId": "missing-id",
        "search": [{"name": "стол"}]
    }))
    .unwrap();

    let err = commands::find(&searcher, &request).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_malformed_request_is_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"databaseId\": 5}").unwrap();

    let err = commands::read_request::<AddDatabaseRequest>(&path).unwrap_err();
    assert!(matches!(err, namesieve::Error::Serialization(_)));
}

#[test]
fn test_clear_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut searcher = commands::open_searcher(&config_in(dir.path())).unwrap();
    for id in ["b", "a"] {
        commands::add(
            &mut searcher,
            serde_json::from_value(json!({"databaseId": id, "database": [{"name": "Хлеб", "id": 1}]}))
                .unwrap(),
        )
        .unwrap();
    }

    assert_eq!(commands::list(&searcher).unwrap(), vec!["a", "b"]);
    commands::clear(&mut searcher).unwrap();
    assert!(commands::list(&searcher).unwrap().is_empty());
    assert!(!commands::remove(&mut searcher, "a").unwrap());
}
