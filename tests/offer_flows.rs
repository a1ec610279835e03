// Testes de ponta a ponta contra um MongoDB real.
//
// Rodar com:
//   MONGODB_TEST_URL=mongodb://localhost:27017 cargo test -- --ignored
//
// Cada teste usa um banco próprio e começa do zero.

use actix_web::{http::StatusCode, test, web, App};
use jobboard_service::config::AppConfig;
use jobboard_service::configure_routes;
use jobboard_service::database::MongoDB;
use jobboard_service::models::Recruiter;
use mongodb::bson::doc;
use serde_json::{json, Value};

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: "0".to_string(),
        database_url: String::new(),
        jwt_secret: "e2e-test-secret".to_string(),
        jwt_issuer: "jobboard-service".to_string(),
        jwt_audience: "jobboard-api".to_string(),
        session_ttl_days: 30,
        allowed_origin: "http://localhost:3000".to_string(),
        image_api_url: "https://api.imgbb.com/1/upload".to_string(),
        image_api_key: None,
    }
}

/// Conecta no banco `name`, apaga o que sobrou de execuções anteriores e
/// reconecta para recriar os índices.
async fn fresh_db(name: &str) -> MongoDB {
    let base = std::env::var("MONGODB_TEST_URL")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let url = format!("{}/{}", base.trim_end_matches('/'), name);

    let db = MongoDB::new(&url)
        .await
        .expect("test MongoDB must be reachable");
    db.database()
        .drop()
        .await
        .expect("failed to drop test database");

    MongoDB::new(&url)
        .await
        .expect("test MongoDB must be reachable")
}

macro_rules! init_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
#[ignore = "needs a running MongoDB (set MONGODB_TEST_URL)"]
async fn join_and_login_flow() {
    let db = fresh_db("jobboard-e2e-auth").await;
    let app = init_app!(db);

    // cadastro
    let req = test::TestRequest::post()
        .uri("/api/join")
        .set_json(json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "password": "super-secret-pw"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);

    // mesmo email de novo: 200 com ok=false e code=1
    let req = test::TestRequest::post()
        .uri("/api/join")
        .set_json(json!({
            "name": "Outra Ana",
            "email": "ana@example.com",
            "password": "another-secret-pw"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], 1);

    // senha errada: 403 com code=3
    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "ana@example.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3);

    // email desconhecido: 404 com code=2
    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "nobody@example.com", "password": "whatever-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2);

    // tipo desconhecido: 400
    let req = test::TestRequest::post()
        .uri("/api/auth?type=x")
        .set_json(json!({ "email": "ana@example.com", "password": "super-secret-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // login correto: token no corpo e cookie httpOnly
    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "ana@example.com", "password": "super-secret-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("session cookie must be set");
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    let token = body["token"].as_str().expect("token in body").to_string();

    // rota protegida sem token: 401
    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .expect_err("request without token must be rejected");
    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::UNAUTHORIZED
    );

    // com o token via Bearer: perfil da sessão, sem hash de senha no corpo
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["name"], "Ana Souza");
    assert!(body.get("password").is_none());

    // ping de usuário responde PONG com a sessão
    let req = test::TestRequest::get()
        .uri("/api/ping/1")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "PONG");
    assert_eq!(body["session"]["role"], "user");
}

#[actix_web::test]
#[ignore = "needs a running MongoDB (set MONGODB_TEST_URL)"]
async fn offer_lifecycle() {
    let db = fresh_db("jobboard-e2e-offers").await;
    let app = init_app!(db);

    // usuário alvo
    let req = test::TestRequest::post()
        .uri("/api/join")
        .set_json(json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "password": "super-secret-pw"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    // recrutador
    let req = test::TestRequest::post()
        .uri("/api/company/join")
        .set_json(json!({
            "name": "Acme RH",
            "email": "rh@acme.example",
            "password": "recruiter-pw-123"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri("/api/auth?type=r")
        .set_json(json!({ "email": "rh@acme.example", "password": "recruiter-pw-123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let recruiter_token = body["token"].as_str().expect("token in body").to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "ana@example.com", "password": "super-secret-pw" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let user_token = body["token"].as_str().expect("token in body").to_string();

    // o user_id do alvo sai do perfil da própria usuária
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let target_uid = body["id"].as_str().expect("user id").to_string();

    // recrutador recém criado ainda não é verificado: 403
    let req = test::TestRequest::post()
        .uri("/api/com/offer")
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .set_json(json!({ "to": target_uid, "position": "Backend Dev" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // verificação é um fato do banco, não do token: a mesma sessão passa
    // a valer assim que a flag vira
    db.collection::<Recruiter>("recruiters")
        .update_one(
            doc! { "email": "rh@acme.example" },
            doc! { "$set": { "verified": true } },
        )
        .await
        .expect("failed to verify recruiter");

    let req = test::TestRequest::post()
        .uri("/api/com/offer")
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .set_json(json!({ "to": target_uid, "position": "Backend Dev" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    let offer_id = body["offer"].as_str().expect("offer id").to_string();

    // destinatário inexistente: 404
    let req = test::TestRequest::post()
        .uri("/api/com/offer")
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .set_json(json!({ "to": "no-such-user" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // segunda oferta para o mesmo par: 409
    let req = test::TestRequest::post()
        .uri("/api/com/offer")
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .set_json(json!({ "to": target_uid, "position": "Senior Backend Dev" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    // recrutador não responde oferta (rota exige sessão de usuário): 403
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=true",
            offer_id
        ))
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // oferta inexistente: 404
    let req = test::TestRequest::get()
        .uri("/api/offer/respond?id=no-such-offer&response=true")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // outra usuária não responde oferta alheia: 403 e a oferta continua lá
    let req = test::TestRequest::post()
        .uri("/api/join")
        .set_json(json!({
            "name": "Bia Lima",
            "email": "bia@example.com",
            "password": "another-secret-pw"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "bia@example.com", "password": "another-secret-pw" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let other_token = body["token"].as_str().expect("token in body").to_string();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=true",
            offer_id
        ))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // destinatária aceita: 200 e a oferta some
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=true",
            offer_id
        ))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);

    // responder de novo: 404, o documento já foi removido
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=true",
            offer_id
        ))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // com a oferta encerrada o recrutador pode ofertar de novo
    let req = test::TestRequest::post()
        .uri("/api/com/offer")
        .insert_header(("Authorization", format!("Bearer {}", recruiter_token)))
        .set_json(json!({ "to": target_uid, "position": "Backend Dev II" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let second_offer = body["offer"].as_str().expect("offer id").to_string();

    // recusar também encerra a oferta
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=false",
            second_offer
        ))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/offer/respond?id={}&response=false",
            second_offer
        ))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
#[ignore = "needs a running MongoDB (set MONGODB_TEST_URL)"]
async fn public_profile_and_edit() {
    let db = fresh_db("jobboard-e2e-profile").await;
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/join")
        .set_json(json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "password": "super-secret-pw"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri("/api/auth?type=u")
        .set_json(json!({ "email": "ana@example.com", "password": "super-secret-pw" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().expect("token in body").to_string();

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let uid = body["id"].as_str().expect("user id").to_string();

    // edita username e bio
    let req = test::TestRequest::post()
        .uri("/api/edit/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "username": "ana", "bio": "Rust dev" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);

    // perfil público sai sem autenticação, com o caminho da requisição
    let req = test::TestRequest::get()
        .uri(&format!("/api/profile/{}", uid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["profileUrl"], format!("/api/profile/{}", uid));
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["username"], "ana");
    assert_eq!(body["bio"], "Rust dev");
    assert!(body.get("password").is_none());

    // uid desconhecido: 404
    let req = test::TestRequest::get()
        .uri("/api/profile/no-such-uid")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // payload inválido na edição: 400
    let req = test::TestRequest::post()
        .uri("/api/edit/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "bio": "x".repeat(1001) }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}
