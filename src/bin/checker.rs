// Lambda entry point for the scheduled update checker

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use patchwatch::checker::{CheckerApp, handler};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    patchwatch::setup_logging();

    let app = &CheckerApp::from_env().await;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(app, event).await
    }))
    .await
}
