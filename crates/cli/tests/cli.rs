use assert_cmd::Command;

#[test]
fn openapi_prints_books_paths_under_prefix() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .args(["openapi", "--api-prefix", "/api"])
        .env("SHELF_ENV", "local")
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(document["paths"]["/api/books"]["post"].is_object());
    assert!(document["paths"]["/api/books/{id}"]["put"].is_object());
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("openapi")
        .env("SHELF_ENV", "qa")
        .assert()
        .failure();
}
