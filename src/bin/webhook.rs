use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use patchwatch::webhook::{WebhookApp, handler};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    patchwatch::setup_logging();

    // A config failure is reported per invocation instead of killing the runtime
    let app = &WebhookApp::from_env().await;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(app, event).await
    }))
    .await
}
