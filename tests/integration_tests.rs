use serde_json::{Value, json};

mod unit;

const BASE_URL: &str = "http://127.0.0.1:8000";

// Live tests log in as existing users, e.g. TEST_MANAGER=alice:secret.
fn credentials(var: &str) -> (String, String) {
    let value = std::env::var(var).unwrap_or_else(|_| panic!("{} is not set", var));
    let (username, password) = value.split_once(':').expect("expected username:password");
    (username.to_string(), password.to_string())
}

async fn login(client: &reqwest::Client, var: &str) -> String {
    let (username, password) = credentials(var);
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("invalid login body");
    body["data"]["access_token"]
        .as_str()
        .expect("missing access token")
        .to_string()
}

#[tokio::test]
#[ignore = "requires running server"]
async fn health_reports_backing_services() {
    let response = reqwest::get(format!("{}/health", BASE_URL))
        .await
        .expect("health request failed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["redis"], true);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn protected_routes_need_a_token() {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/projects", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn logout_revokes_the_token() {
    let client = reqwest::Client::new();
    let token = login(&client, "TEST_MANAGER").await;

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/auth/profile", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn partial_refresh_gets_plain_text_acknowledgements() {
    let client = reqwest::Client::new();
    let manager = login(&client, "TEST_MANAGER").await;
    let auditor = login(&client, "TEST_AUDITOR").await;

    let profile: Value = client
        .get(format!("{}/auth/profile", BASE_URL))
        .bearer_auth(&auditor)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let auditor_id = profile["data"]["id"].as_i64().unwrap();

    let departments: Value = client
        .get(format!("{}/departments", BASE_URL))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let department_id = departments["data"][0]["id"]
        .as_i64()
        .expect("no departments seeded");

    let created: Value = client
        .post(format!("{}/projects", BASE_URL))
        .bearer_auth(&manager)
        .json(&json!({
            "title": "Integration audit",
            "department_id": department_id,
            "auditor_ids": [auditor_id],
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let project_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "created");

    let response = client
        .post(format!("{}/projects/{}/plans", BASE_URL, project_id))
        .bearer_auth(&auditor)
        .header("HX-Request", "true")
        .json(&json!({ "description": "Sample twenty invoices" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.text().await.unwrap(), "Plan submitted successfully!");

    // a second plan while one is pending is refused with the message as text
    let response = client
        .post(format!("{}/projects/{}/plans", BASE_URL, project_id))
        .bearer_auth(&auditor)
        .header("HX-Request", "true")
        .json(&json!({ "description": "Another plan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    assert!(!response.text().await.unwrap().is_empty());

    let detail: Value = client
        .get(format!("{}/projects/{}", BASE_URL, project_id))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["data"]["project"]["status"], "plan_pending");
    assert_eq!(detail["data"]["allowed_actions"][0]["action"], "review_plan");
}
