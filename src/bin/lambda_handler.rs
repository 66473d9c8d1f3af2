//! AWS Lambda handler for pension estimates
//!
//! Accepts a JSON request tagged with `operation` and returns the estimate
//! as JSON. Validation failures come back as `{"error": "..."}`.
//!
//! ```json
//! {"operation": "compare", "currentAge": 35, "retirementAge": 65,
//!  "currentSalary": 85000, "yearsOfService": 10, "planIds": ["otpp", "cpp"]}
//! ```

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use pension_estimator::{
    EstimateRunner, PlanCatalog, ProjectionConfig, UserScenario,
    cpp::CppRequest,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// Plan catalog CSV to load instead of the built-in plans
const PLANS_CSV_ENV: &str = "PENSION_PLANS_CSV";
/// Directory with assumption overrides
const ASSUMPTIONS_DIR_ENV: &str = "PENSION_ASSUMPTIONS_DIR";

#[derive(Debug, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
enum EstimateRequest {
    #[serde(rename_all = "camelCase")]
    Compare {
        #[serde(flatten)]
        scenario: UserScenario,
        plan_ids: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Detailed {
        #[serde(flatten)]
        scenario: UserScenario,
        plan_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Project {
        #[serde(flatten)]
        scenario: UserScenario,
        plan_ids: Vec<String>,
        annual_return: f64,
        salary_growth: f64,
    },
    Cpp(CppRequest),
}

struct HandlerState {
    catalog: PlanCatalog,
    runner: EstimateRunner,
}

fn error_body(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

/// Route one request to the runner
fn dispatch(state: &HandlerState, payload: Value) -> Result<Value, serde_json::Error> {
    let request: EstimateRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return Ok(error_body(format!("Invalid request: {}", e)));
        }
    };

    let body = match request {
        EstimateRequest::Compare { scenario, plan_ids } => {
            serde_json::to_value(state.runner.compare(&state.catalog, &plan_ids, &scenario))?
        }
        EstimateRequest::Detailed { scenario, plan_id } => {
            match state.runner.detailed(&state.catalog, &plan_id, &scenario) {
                Ok(result) => serde_json::to_value(result)?,
                Err(e) => error_body(e),
            }
        }
        EstimateRequest::Project { scenario, plan_ids, annual_return, salary_growth } => {
            match ProjectionConfig::new(annual_return, salary_growth) {
                Ok(config) => {
                    let timeline = state.runner.project(&state.catalog, &plan_ids, &scenario, config);
                    serde_json::to_value(timeline.points)?
                }
                Err(e) => error_body(e),
            }
        }
        EstimateRequest::Cpp(request) => match state.runner.cpp(&request) {
            Ok(result) => serde_json::to_value(result)?,
            Err(e) => error_body(e),
        },
    };
    Ok(body)
}

async fn handler(state: &HandlerState, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let body = dispatch(state, event.payload)?;
    info!("Request {} handled in {:?}", event.context.request_id, start.elapsed());
    Ok(body)
}

fn load_state() -> Result<HandlerState, Error> {
    let catalog = match std::env::var(PLANS_CSV_ENV) {
        Ok(path) => PlanCatalog::from_csv_path(&path)?,
        Err(_) => PlanCatalog::canadian_defaults(),
    };
    let runner = match std::env::var(ASSUMPTIONS_DIR_ENV) {
        Ok(dir) => EstimateRunner::from_csv_path(Path::new(&dir))?,
        Err(_) => EstimateRunner::new(),
    };
    Ok(HandlerState { catalog, runner })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let state = Arc::new(load_state()?);
    run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
