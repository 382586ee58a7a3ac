use crate::app_state::{AppConfig, AppState, PredictError};
use crate::io_struct::PredictReqInput;
use actix_web::{HttpRequest, HttpResponse, HttpServer, get, post, web};
use serde_json::json;
use std::io::Write;

#[get("/health")]
pub async fn health(_req: HttpRequest, _: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[get("/get_model_info")]
pub async fn get_model_info(_req: HttpRequest, app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "model_path": app_state.model_path,
        "num_features": app_state.model.n_features(),
    }))
}

#[post("/predict")]
pub async fn predict_form(
    _req: HttpRequest,
    form: web::Form<PredictReqInput>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    run_predict(&app_state, form.into_inner())
}

#[post("/v1/predict")]
pub async fn predict_json(
    _req: HttpRequest,
    req: web::Json<PredictReqInput>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    run_predict(&app_state, req.into_inner())
}

// Request-level failures never escape as HTTP errors; they come back as a
// display string the same way a successful verdict does.
fn run_predict(app_state: &AppState, input: PredictReqInput) -> HttpResponse {
    match app_state.predict_outcome(&input.into_record()) {
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "prediction_text": outcome.to_text(),
            "prediction": outcome.verdict(),
            "confidence": outcome.confidence_text(),
        })),
        Err(e) => {
            if let PredictError::Model(_) = e {
                // schema/model mismatch, not bad user input
                log::error!("prediction failed: {}", e);
            }
            HttpResponse::Ok().json(json!({
                "prediction_text": format!("Error: {}", e),
            }))
        }
    }
}

pub async fn startup(config: AppConfig, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    println!("Starting server at {}:{}", config.host, config.port);

    // default level is info
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .init();

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .service(health)
            .service(get_model_info)
            .service(predict_form)
            .service(predict_json)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
