use actix_web::{App, test, web};
use booking_predict::app_state::AppState;
use booking_predict::model::{Classifier, ModelError};
use booking_predict::schema::feature_len;
use booking_predict::server::{get_model_info, health, predict_form, predict_json};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

struct FixedClassifier {
    proba: [f64; 2],
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        feature_len()
    }

    fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], ModelError> {
        Ok(self.proba)
    }
}

fn fake_state(proba: [f64; 2]) -> AppState {
    AppState::with_classifier(
        Arc::new(FixedClassifier { proba }),
        "rf_clf.json".to_string(),
    )
    .unwrap()
}

macro_rules! test_app {
    ($proba:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(fake_state($proba)))
                .service(health)
                .service(get_model_info)
                .service(predict_form)
                .service(predict_json),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!([0.5, 0.5]);
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Ok");
}

#[actix_web::test]
async fn test_model_info_reports_width() {
    let app = test_app!([0.5, 0.5]);
    let req = test::TestRequest::get().uri("/get_model_info").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["num_features"], 75);
    assert_eq!(body["model_path"], "rf_clf.json");
}

#[actix_web::test]
async fn test_predict_form_returns_verdict() {
    let app = test_app!([0.2, 0.8]);
    let mut form = HashMap::new();
    form.insert("lead_time", "7");
    form.insert("country", "prt");
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_form(&form)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["prediction_text"],
        "Prediction: Cancelled (80.00% confidence)"
    );
    assert_eq!(body["prediction"], "Cancelled");
    assert_eq!(body["confidence"], "80.00%");
}

#[actix_web::test]
async fn test_predict_json_returns_verdict() {
    let app = test_app!([0.7, 0.3]);
    let req = test::TestRequest::post()
        .uri("/v1/predict")
        .set_json(json!({"adults": "2", "meal": "BB"}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["prediction_text"],
        "Prediction: Not Cancelled (70.00% confidence)"
    );
}

#[actix_web::test]
async fn test_predict_bad_numeric_comes_back_as_display_error() {
    let app = test_app!([0.5, 0.5]);
    let req = test::TestRequest::post()
        .uri("/v1/predict")
        .set_json(json!({"lead_time": "abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    // request-level failures still answer 200 with an error string
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["prediction_text"], "Error: lead_time must be a number");
}

#[actix_web::test]
async fn test_predict_empty_form_still_answers() {
    let app = test_app!([0.6, 0.4]);
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_form(HashMap::<&str, &str>::new())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["prediction_text"],
        "Prediction: Not Cancelled (60.00% confidence)"
    );
}
