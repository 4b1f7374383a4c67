#![cfg(feature = "replier")]

use multienv::replier::{self, ReplierIdentity};
use tokio::net::TcpListener;

async fn start_replier(identity: ReplierIdentity) -> String {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = replier::serve_on(listener, identity).await {
            eprintln!("replier error: {}", e);
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_replier_answers_on_root() {
    let base_url = start_replier(ReplierIdentity::new("service3", "master", "3333")).await;

    let body = reqwest::get(format!("{}/", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "I am service3:master listening on port 3333 \n");
}

#[tokio::test]
async fn test_replier_answers_on_any_path() {
    let base_url = start_replier(ReplierIdentity::new("service4", "custom", "4444")).await;

    let response = reqwest::get(format!("{}/health/deep", base_url))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.text().await.unwrap(),
        "I am service4:custom listening on port 4444 \n"
    );
}
