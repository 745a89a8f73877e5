//! End-to-end runs of the command line, from argument parsing to the
//! printed text, with latency switched off.

use backoffice::config::ENV_LATENCY_SCALE;
use backoffice::{run, Cli, MockEnv};
use clap::Parser;
use serde_json::Value;

fn backoffice(args: &[&str]) -> anyhow::Result<String> {
    let env = MockEnv::new().with_var(ENV_LATENCY_SCALE, "0");
    let cli = Cli::try_parse_from(std::iter::once("backoffice").chain(args.iter().copied()))
        .expect("arguments should parse");
    run(cli, &env)
}

fn json(args: &[&str]) -> Value {
    let mut full = args.to_vec();
    full.extend(["--output", "json"]);
    let out = backoffice(&full).expect("command should succeed");
    serde_json::from_str(&out).expect("output should be JSON")
}

fn failure(args: &[&str]) -> String {
    let err = backoffice(args).expect_err("command should fail");
    format!("{:#}", err)
}

fn ids(page: &Value) -> Vec<&str> {
    page["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default())
        .collect()
}

#[test]
fn users_list_as_text() {
    let out = backoffice(&["users", "list", "--output", "text"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Users");
    assert!(lines[2].starts_with("ID  Name"));
    assert!(lines[3].starts_with("1   John Doe"));
    assert!(out.contains("Showing 1 to 5 of 5 results"));
    assert!(!out.contains("Pages:"));
    assert!(!out.contains("Filtered by"));
}

#[test]
fn users_list_filters_and_sorts() {
    let page = json(&["users", "list", "--role", "user", "--sort", "name"]);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["David Brown", "Jane Smith", "Sarah Wilson"]);
    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["page_size"], 10);
    assert_eq!(page["pagination"]["total_pages"], 1);
}

#[test]
fn users_filter_summary_in_text() {
    let out = backoffice(&[
        "users", "list", "--status", "active", "--search", "s", "--output", "text",
    ])
    .unwrap();
    assert!(out.contains("Filtered by: matching \"s\""));
    assert!(out.contains("status=active"));
    assert!(out.contains("Sarah Wilson"));
    assert!(!out.contains("David Brown"));
}

#[test]
fn products_default_order_is_newest_first() {
    let page = json(&["products", "list"]);
    assert_eq!(ids(&page), ["1", "5", "3", "2", "4", "6"]);
    assert_eq!(page["pagination"]["page_size"], 12);
}

#[test]
fn products_by_category_and_price() {
    let page = json(&["products", "list", "--category", "Electronics", "--max-price", "250"]);
    assert_eq!(ids(&page), ["2"]);

    let page = json(&["products", "list", "--category", "all", "--min-price", "190"]);
    assert_eq!(ids(&page), ["1", "2", "4"]);
}

#[test]
fn products_paging() {
    let page = json(&["products", "list", "--page-size", "2", "--page", "2"]);
    assert_eq!(ids(&page), ["3", "2"]);
    assert_eq!(page["pagination"]["total_pages"], 3);

    let past_end = json(&["products", "list", "--page-size", "4", "--page", "9"]);
    assert_eq!(past_end["pagination"]["page"], 2);
    assert_eq!(ids(&past_end), ["4", "6"]);
}

#[test]
fn products_paging_as_text() {
    let out = backoffice(&["products", "list", "--page-size", "2", "--output", "text"]).unwrap();
    assert!(out.contains("Showing 1 to 2 of 6 results"));
    assert!(out.contains("Pages: [1] 2 3"));
}

#[test]
fn bad_list_configuration_is_reported() {
    assert_eq!(
        failure(&["users", "list", "--sort", "nope"]),
        "unknown sort field 'nope'"
    );
    assert_eq!(
        failure(&["users", "list", "--sort", "role"]),
        "field 'role' is not sortable"
    );
    assert!(failure(&["products", "list", "--min-price", "300", "--max-price", "100"])
        .starts_with("invalid range"));
    assert_eq!(
        failure(&["products", "list", "--page-size", "0"]),
        "page size must be greater than zero"
    );
}

#[test]
fn categories() {
    let categories = json(&["products", "categories"]);
    assert_eq!(
        categories,
        serde_json::json!([
            "Clothing",
            "Electronics",
            "Food & Beverage",
            "Furniture",
            "Sports & Fitness"
        ])
    );
}

#[test]
fn login() {
    let session = json(&["login", "--email", "admin@example.com", "--password", "password123"]);
    assert_eq!(session["user"]["email"], "admin@example.com");
    assert_eq!(session["user"]["role"], "admin");
    assert_eq!(session["expires_in"], 3600);
    assert!(session["token"].as_str().unwrap().starts_with("mock-jwt-token-"));

    assert_eq!(
        failure(&["login", "--email", "admin@example.com", "--password", "wrong-one"]),
        "login failed: Invalid credentials"
    );
    assert_eq!(
        failure(&["login", "--email", "nobody", "--password", "password123"]),
        "login failed: Invalid email format"
    );
}

#[test]
fn create_user() {
    let user = json(&[
        "users", "create", "--name", "Ada Lovelace", "--email", "ada@example.com", "--password",
        "Secret12",
    ]);
    assert_eq!(user["id"], "6");
    assert_eq!(user["role"], "user");
    assert_eq!(user["status"], "active");
    assert!(user.get("last_login").is_none());

    assert_eq!(
        failure(&[
            "users", "create", "--name", "Jane Two", "--email", "jane.smith@example.com",
            "--password", "Secret12",
        ]),
        "User with this email already exists"
    );
    assert_eq!(
        failure(&[
            "users", "create", "--name", "Ada", "--email", "ada@example.com", "--password",
            "secret12",
        ]),
        "Password must contain at least one uppercase letter, one lowercase letter, and one number"
    );
}

#[test]
fn create_product_as_text() {
    let out = backoffice(&[
        "products", "create", "--name", "Desk Lamp", "--description", "A lamp for the desk",
        "--price", "39.5", "--category", "Furniture", "--stock", "4", "--tags", "home, light",
        "--output", "text",
    ])
    .unwrap();
    assert!(out.starts_with("Product 7"));
    assert!(out.contains("$39.50"));
    assert!(out.contains("home, light"));
    assert!(out.ends_with("Product created."));
}

#[test]
fn update_and_delete() {
    let user = json(&["users", "update", "2", "--status", "suspended"]);
    assert_eq!(user["status"], "suspended");
    assert_eq!(user["name"], "Jane Smith");

    assert!(failure(&["users", "update", "2"]).starts_with("nothing to update"));
    assert!(failure(&["products", "update", "2"]).starts_with("nothing to update"));
    assert_eq!(failure(&["users", "show", "99"]), "User not found");
    assert_eq!(
        failure(&["products", "update", "1", "--sku", "PCB-003"]),
        "Product with this SKU already exists"
    );

    let out = backoffice(&["users", "delete", "3", "--output", "text"]).unwrap();
    assert_eq!(out, "User 3 deleted.");
    let deleted = json(&["products", "delete", "6"]);
    assert_eq!(deleted, serde_json::json!({ "deleted": "6", "kind": "product" }));
}

#[test]
fn csv_lists_items_only() {
    let out = backoffice(&["users", "list", "--output", "csv"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].split(',').any(|h| h == "email"));
    assert!(!out.contains("pagination"));
}

#[test]
fn analytics_reports() {
    let dashboard = json(&["analytics"]);
    assert!(dashboard.get("total_users").is_some());

    let pages = json(&["analytics", "pages", "--limit", "2"]);
    assert_eq!(pages.as_array().unwrap().len(), 2);

    let out = backoffice(&["analytics", "export"]).unwrap();
    assert!(out.starts_with("Date,Revenue,Users,Orders\n2024-01,45000,450,120"));
    assert!(!out.ends_with('\n'));
}

#[test]
fn yaml_output() {
    let out = backoffice(&["users", "show", "1", "--output", "yaml"]).unwrap();
    assert!(out.contains("name: John Doe"));
    assert!(out.contains("role: admin"));
}
