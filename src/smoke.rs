//! End-to-end check of the HTTP API against a running server.

use clap::Parser;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

pub type StepResult<T> = Result<T, String>;

/// Run the create, read, update, submit and delete flow against a server.
#[derive(Parser, Debug)]
#[command(name = "smoke_test", version, about)]
pub struct SmokeArgs {
    /// Base URL of the running form builder.
    #[arg(env = "FORMBUILDER_SMOKE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,
}

impl SmokeArgs {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub async fn run(client: &Client, base: &str) -> StepResult<()> {
    let schema = json!({
        "components": [
            { "key": "firstName", "label": "First Name", "type": "textfield", "input": true },
            { "key": "lastName", "label": "Last Name", "type": "textfield", "input": true },
            { "key": "email", "label": "Email", "type": "email", "input": true }
        ]
    });

    println!("1. Creating a form");
    let form = send(
        client.post(format!("{base}/api/forms/")),
        Some(json!({ "name": "Smoke Test Form", "schema": schema })),
        StatusCode::CREATED,
    )
    .await?;
    let form_id = form["id"]
        .as_str()
        .ok_or("created form has no id")?
        .to_string();
    println!("   created {form_id}");

    println!("2. Listing forms");
    let list = send(client.get(format!("{base}/api/forms/")), None, StatusCode::OK).await?;
    let count = list["forms"].as_array().map(Vec::len).unwrap_or(0);
    println!("   {count} form(s)");

    println!("3. Fetching the form");
    let fetched = send(
        client.get(format!("{base}/api/forms/{form_id}/")),
        None,
        StatusCode::OK,
    )
    .await?;
    if fetched["schema"] != schema {
        return Err("fetched schema differs from the one submitted".to_string());
    }

    println!("4. Updating the form");
    let updated = send(
        client.put(format!("{base}/api/forms/{form_id}/")),
        Some(json!({ "name": "Updated Smoke Test Form" })),
        StatusCode::OK,
    )
    .await?;
    println!("   renamed to {}", updated["name"]);

    println!("5. Submitting data");
    let submission = send(
        client.post(format!("{base}/api/submissions/")),
        Some(json!({
            "form_id": form_id,
            "data": { "firstName": "John", "lastName": "Doe", "email": "john.doe@example.com" }
        })),
        StatusCode::CREATED,
    )
    .await?;
    println!(
        "   submission {} for {}",
        submission["id"], submission["form_name"]
    );

    println!("6. Listing the form's submissions");
    let submissions = send(
        client.get(format!("{base}/api/forms/{form_id}/submissions/")),
        None,
        StatusCode::OK,
    )
    .await?;
    let count = submissions["submissions"]
        .as_array()
        .map(Vec::len)
        .unwrap_or(0);
    println!("   {count} submission(s)");

    println!("7. Deleting the form");
    send(
        client.delete(format!("{base}/api/forms/{form_id}/")),
        None,
        StatusCode::OK,
    )
    .await?;

    Ok(())
}

async fn send(
    request: reqwest::RequestBuilder,
    body: Option<Value>,
    expected: StatusCode,
) -> StepResult<Value> {
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };

    let resp = request
        .send()
        .await
        .map_err(|e| format!("request failed (is the server running?): {e}"))?;
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);

    if status != expected {
        return Err(format!("expected {expected}, got {status}: {body}"));
    }
    Ok(body)
}
